use crate::app::{App, Screen};
use crate::message::Message;
use crossterm::event::{KeyCode, KeyModifiers};

/// Converts keyboard input to Message based on current screen/state
pub fn key_to_message(app: &App, key: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
    // Any key dismisses error/success overlays
    if !app.error_message.is_empty() || !app.success_message.is_empty() {
        return Some(Message::Clear);
    }

    match app.screen {
        Screen::Browser => browser_key_to_message(app, key),
        Screen::ConfirmDelete => confirm_key_to_message(key),
        Screen::Input => input_key_to_message(key, modifiers),
        Screen::Help => Some(Message::GoBack),
    }
}

fn browser_key_to_message(app: &App, key: KeyCode) -> Option<Message> {
    match key {
        KeyCode::Char('x') | KeyCode::Char('X') => {
            if app.active_upload.is_some() {
                Some(Message::CancelUpload)
            } else {
                None
            }
        }
        KeyCode::Char('q') | KeyCode::F(10) => Some(Message::Quit),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ShowHelp),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::PageUp => Some(Message::NavigatePageUp),
        KeyCode::PageDown => Some(Message::NavigatePageDown),
        KeyCode::Home => Some(Message::NavigateHome),
        KeyCode::End => Some(Message::NavigateEnd),
        KeyCode::Tab => Some(Message::SwitchPanel),
        KeyCode::Enter => Some(Message::EnterSelected),
        KeyCode::F(2) => Some(Message::CycleSort),
        KeyCode::F(4) => Some(Message::ShowFilterPrompt),
        KeyCode::F(5) => Some(Message::ShowUploadPrompt),
        KeyCode::Delete | KeyCode::F(8) => Some(Message::ShowDeleteConfirmation),
        _ => None,
    }
}

fn confirm_key_to_message(key: KeyCode) -> Option<Message> {
    match key {
        KeyCode::Left => Some(Message::ConfirmDialogLeft),
        KeyCode::Right | KeyCode::Tab => Some(Message::ConfirmDialogRight),
        KeyCode::Enter => Some(Message::ConfirmDialogSubmit),
        KeyCode::Esc => Some(Message::GoBack),
        _ => None,
    }
}

fn input_key_to_message(key: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
    match key {
        KeyCode::Enter => Some(Message::InputSubmit),
        KeyCode::Esc => Some(Message::InputCancel),
        KeyCode::Left => Some(Message::InputLeft),
        KeyCode::Right => Some(Message::InputRight),
        KeyCode::Home => Some(Message::InputHome),
        KeyCode::End => Some(Message::InputEnd),
        KeyCode::Backspace => Some(Message::InputBackspace),
        KeyCode::Delete => Some(Message::InputDelete),
        KeyCode::Char(c) => {
            if modifiers.contains(KeyModifiers::CONTROL) {
                None
            } else {
                Some(Message::InputChar { c })
            }
        }
        _ => None,
    }
}
