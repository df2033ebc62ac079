use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::helpers::{format_size, truncate_string};
use super::theme;
use crate::app::{Panel, PanelType};
use crate::models::list::ItemKind;

pub fn draw_panel(f: &mut Frame, area: Rect, panel: &mut Panel, is_active: bool) {
    let border_style = if is_active {
        theme::active_border()
    } else {
        theme::inactive_border()
    };

    let title = match &panel.panel_type {
        PanelType::BucketList => "Buckets".to_string(),
        PanelType::ObjectBrowser { bucket, prefix } => format!("{bucket}/{prefix}"),
        PanelType::LocalFilesystem { path } => format!("Local: {}", path.display()),
    };

    let items: Vec<ListItem> = panel
        .list
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (icon_name, size_str, modified_str) = match item.kind {
                ItemKind::ParentDir => ("📁 ..".to_string(), String::new(), String::new()),
                ItemKind::Folder => {
                    let icon = if panel.panel_type == PanelType::BucketList {
                        "🪣"
                    } else {
                        "📁"
                    };
                    let modified_str = item
                        .modified
                        .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    (format!("{icon} {}", item.name), "<DIR>".to_string(), modified_str)
                }
                ItemKind::File => {
                    let size_str = item.size.map(format_size).unwrap_or_default();
                    let modified_str = item
                        .modified
                        .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    (format!("📄 {}", item.name), size_str, modified_str)
                }
            };

            let display = format!(
                "{:<40} {:>10}  {}",
                truncate_string(&icon_name, 40),
                size_str,
                modified_str
            );

            let style = if i == panel.selected_index && is_active {
                theme::selected()
            } else if matches!(item.kind, ItemKind::Folder | ItemKind::ParentDir) {
                theme::folder()
            } else {
                Style::default()
            };
            ListItem::new(display).style(style)
        })
        .collect();

    let visible_height = area.height.saturating_sub(2) as usize;
    panel.visible_height = visible_height;
    let total_items = items.len();

    let scroll_offset = if total_items > visible_height {
        let selected = panel.selected_index;
        if selected < panel.scroll_offset {
            selected
        } else if selected >= panel.scroll_offset + visible_height {
            selected.saturating_sub(visible_height - 1)
        } else {
            panel.scroll_offset
        }
    } else {
        0
    };
    panel.scroll_offset = scroll_offset;

    let visible_items: Vec<ListItem> = items
        .into_iter()
        .skip(scroll_offset)
        .take(visible_height)
        .collect();

    let title = match panel.list.filter_pattern() {
        Some(pattern) => format!("{title} [{}] 🔍 {pattern} ", panel.list.sort_order().label()),
        None => format!("{title} [{}] ", panel.list.sort_order().label()),
    };

    let list = List::new(visible_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );

    f.render_widget(list, area);
}
