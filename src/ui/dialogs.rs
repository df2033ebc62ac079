use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::helpers::centered_rect;
use super::theme;
use crate::app::App;

pub fn draw_delete_confirmation(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 30, f.area());

    let block = Block::default()
        .title("Delete Confirmation")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::DANGER));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let question = Paragraph::new("Do you really want to delete this object?")
        .style(theme::selected())
        .alignment(Alignment::Center);
    f.render_widget(question, chunks[0]);

    let target = format!("{}/{}", app.confirm.bucket, app.confirm.key);
    let path_text = Paragraph::new(target)
        .style(Style::default().fg(theme::ACCENT))
        .alignment(Alignment::Center);
    f.render_widget(path_text, chunks[1]);

    let buttons = if app.confirm.button == 0 {
        Paragraph::new("[ DELETE ]  Cancel")
            .style(theme::danger())
            .alignment(Alignment::Center)
    } else {
        Paragraph::new("Delete  [ CANCEL ]")
            .style(theme::ok())
            .alignment(Alignment::Center)
    };
    f.render_widget(buttons, chunks[2]);

    let help = Paragraph::new("←/→ or Tab: Select | Enter: Confirm | Esc: Cancel")
        .style(theme::help())
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}

pub fn draw_input_dialog(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 20, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(app.input.prompt.as_str())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let input = Paragraph::new(app.input.buffer.as_str());
    f.render_widget(input, chunks[0]);

    let cursor_x = chunks[0].x + app.input.cursor as u16;
    f.set_cursor_position((cursor_x, chunks[0].y));

    let help = Paragraph::new("Enter: Confirm | Esc: Cancel")
        .style(theme::help())
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}

pub fn draw_error_overlay(f: &mut Frame, app: &App) {
    draw_message_overlay(f, "Error", &app.error_message, theme::DANGER);
}

pub fn draw_success_overlay(f: &mut Frame, app: &App) {
    draw_message_overlay(f, "Success", &app.success_message, theme::OK);
}

fn draw_message_overlay(f: &mut Frame, title: &str, message: &str, color: ratatui::style::Color) {
    let area = centered_rect(60, 25, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let text = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(text, chunks[0]);

    let help = Paragraph::new("Press any key to continue")
        .style(theme::help())
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[1]);
}
