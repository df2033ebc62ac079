use super::dialogs::{
    draw_delete_confirmation, draw_error_overlay, draw_input_dialog, draw_success_overlay,
};
use super::panels::draw_panel;
use super::theme;
use super::widgets::draw_upload_status;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{ActivePanel, App, Screen};

pub fn draw(f: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Browser => draw_dashboard(f, app),
        Screen::ConfirmDelete => {
            draw_dashboard(f, app);
            draw_delete_confirmation(f, app);
        }
        Screen::Input => {
            draw_dashboard(f, app);
            draw_input_dialog(f, app);
        }
        Screen::Help => draw_help(f, app),
    }

    // Error/success overlays render on top of any screen
    if !app.error_message.is_empty() {
        draw_error_overlay(f, app);
    }
    if !app.success_message.is_empty() {
        draw_success_overlay(f, app);
    }
}

fn draw_dashboard(f: &mut Frame, app: &mut App) {
    let has_upload = app.active_upload.is_some();
    let upload_height = if has_upload { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if has_upload {
            vec![
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(upload_height),
                Constraint::Length(1),
            ]
        } else {
            vec![
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
        })
        .split(f.area());

    let title = Paragraph::new(app.app_title.as_str())
        .style(theme::title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let panel_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let is_left_active = app.active_panel == ActivePanel::Left;
    draw_panel(f, panel_chunks[0], &mut app.left_panel, is_left_active);
    draw_panel(f, panel_chunks[1], &mut app.right_panel, !is_left_active);

    if has_upload {
        draw_upload_status(f, app, chunks[2]);
    }

    let footer_text =
        "F1 Help │ F2 Sort │ F4 Filter │ F5 Upload │ F8 Delete │ F10/q Quit │ Tab Switch";
    let footer = Paragraph::new(footer_text).style(theme::help());
    let footer_chunk = if has_upload { chunks[3] } else { chunks[2] };
    f.render_widget(footer, footer_chunk);
}

fn draw_help(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(f.area());

    let help_title = format!("{} - Help", app.app_title);
    let title = Paragraph::new(help_title.as_str())
        .style(theme::title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let help_text = vec![
        "Navigation:",
        "  ↑/↓         - Navigate in active panel",
        "  PgUp/PgDn   - Navigate a page at a time",
        "  Tab         - Switch between left/right panel",
        "  Enter       - Open selected item (bucket/folder), '..' goes up",
        "",
        "Function Keys:",
        "  F1 or ?     - Show this help",
        "  F2          - Cycle sort order (Name, Size, Date)",
        "  F4          - Filter items (* matches anything)",
        "  F5          - Upload selected local file into the browsed bucket",
        "  F8 or Del   - Delete selected object (asks for confirmation)",
        "  F10 or q    - Quit application",
        "",
        "Uploads:",
        "  x           - Cancel the running upload and clear its state",
        "",
        "General:",
        "  Esc         - Close dialog / go back",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(help_paragraph, chunks[1]);
}
