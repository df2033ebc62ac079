use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::helpers::truncate_string;
use super::theme;
use crate::app::App;

/// Live status of the one on-screen upload: info line plus progress bar.
pub fn draw_upload_status(f: &mut Frame, app: &App, area: Rect) {
    let Some(active) = &app.active_upload else {
        return;
    };
    let snapshot = active.task.snapshot();

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Upload - 'x' cancel")
        .border_style(Style::default().fg(theme::ACCENT));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let path_width = (inner.width as usize / 3).max(15);
    let (icon, info_style) = if snapshot.error.is_some() {
        ("✗", theme::danger())
    } else if snapshot.uploading {
        ("⟳", Style::default().fg(theme::ACCENT))
    } else {
        ("✓", theme::ok())
    };

    let info_text = match &snapshot.error {
        Some(error) => format!("{icon} {} │ {error}", active.file_name),
        None => format!(
            "{icon} {} → {}/{} ({:3.0}%)",
            truncate_string(&active.file_name, path_width),
            active.bucket,
            truncate_string(&active.key, path_width),
            snapshot.progress
        ),
    };

    let info = Paragraph::new(info_text).style(info_style);
    f.render_widget(info, chunks[0]);

    let bar = progress_bar(snapshot.progress, chunks[1].width as usize);
    let progress = Paragraph::new(bar).style(Style::default().fg(theme::ACCENT));
    f.render_widget(progress, chunks[1]);
}

fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((width as f64 * percentage) / 100.0) as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_is_empty_at_zero() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
    }

    #[test]
    fn progress_bar_is_full_at_100() {
        assert_eq!(progress_bar(100.0, 4), "████");
    }

    #[test]
    fn progress_bar_rounds_down_partial_cells() {
        assert_eq!(progress_bar(50.0, 5), "██░░░");
    }
}
