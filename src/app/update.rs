use super::{navigation, ActiveUpload, App, ConfirmState, InputMode, PanelType, Screen};
use crate::message::Message;
use crate::models::list::{ItemKind, ItemPayload};
use crate::models::validate;
use crate::operations::upload::{FilePayload, UploadRequest};
use anyhow::Result;

/// Central update function following The Elm Architecture (TEA)
/// Takes current app state and a message, applies the change, and optionally returns another message
pub async fn update(app: &mut App, msg: Message) -> Result<Option<Message>> {
    match msg {
        // ===== Application Control =====
        Message::Quit => {
            app.should_quit = true;
            Ok(None)
        }

        // ===== Navigation =====
        Message::NavigateUp => {
            let panel = app.get_active_panel();
            if panel.selected_index > 0 {
                panel.selected_index -= 1;
            }
            Ok(None)
        }
        Message::NavigateDown => {
            let panel = app.get_active_panel();
            if panel.selected_index + 1 < panel.list.len() {
                panel.selected_index += 1;
            }
            Ok(None)
        }
        Message::NavigatePageUp => {
            let panel = app.get_active_panel();
            panel.selected_index = panel.selected_index.saturating_sub(panel.visible_height);
            Ok(None)
        }
        Message::NavigatePageDown => {
            let panel = app.get_active_panel();
            panel.selected_index = (panel.selected_index + panel.visible_height)
                .min(panel.list.len().saturating_sub(1));
            Ok(None)
        }
        Message::NavigateHome => {
            app.get_active_panel().selected_index = 0;
            Ok(None)
        }
        Message::NavigateEnd => {
            let panel = app.get_active_panel();
            panel.selected_index = panel.list.len().saturating_sub(1);
            Ok(None)
        }
        Message::EnterSelected => {
            navigation::enter_selected(app).await?;
            Ok(None)
        }
        Message::GoBack => {
            app.go_back();
            Ok(None)
        }
        Message::SwitchPanel => {
            app.switch_panel();
            Ok(None)
        }

        // ===== UI State Changes =====
        Message::ShowHelp => {
            app.prev_screen = Some(app.screen.clone());
            app.screen = Screen::Help;
            Ok(None)
        }
        Message::CycleSort => {
            app.get_active_panel().list.cycle_sort();
            Ok(None)
        }
        Message::ShowFilterPrompt => {
            let current = app
                .get_active_panel()
                .list
                .filter_pattern()
                .unwrap_or_default()
                .to_string();
            app.input.mode = InputMode::Filter;
            app.input.prompt = "Filter (* matches anything, empty clears): ".to_string();
            app.input.cursor = current.chars().count();
            app.input.buffer = current;
            app.prev_screen = Some(app.screen.clone());
            app.screen = Screen::Input;
            Ok(None)
        }

        // ===== Upload =====
        Message::ShowUploadPrompt => {
            show_upload_prompt(app);
            Ok(None)
        }
        Message::CancelUpload => {
            if let Some(active) = &app.active_upload {
                app.uploads.reset_upload_state(active.task.id()).await;
                let file_name = active.file_name.clone();
                app.show_success(&format!("Upload cancelled: {file_name}"));
            }
            Ok(None)
        }

        // ===== Delete Confirmation =====
        Message::ShowDeleteConfirmation => {
            show_delete_confirmation(app);
            Ok(None)
        }
        Message::ConfirmDialogLeft => {
            if app.confirm.button > 0 {
                app.confirm.button -= 1;
            }
            Ok(None)
        }
        Message::ConfirmDialogRight => {
            if app.confirm.button < 1 {
                app.confirm.button += 1;
            }
            Ok(None)
        }
        Message::ConfirmDialogSubmit => {
            if app.confirm.button == 0 {
                confirm_delete(app).await?;
            }
            Ok(Some(Message::GoBack))
        }

        // ===== Input Messages =====
        Message::InputChar { c } => {
            let byte_pos = app
                .input
                .buffer
                .char_indices()
                .nth(app.input.cursor)
                .map(|(pos, _)| pos)
                .unwrap_or(app.input.buffer.len());
            app.input.buffer.insert(byte_pos, c);
            app.input.cursor += 1;
            Ok(None)
        }
        Message::InputBackspace => {
            if app.input.cursor > 0 {
                app.input.cursor -= 1;
                if let Some((byte_pos, _)) =
                    app.input.buffer.char_indices().nth(app.input.cursor)
                {
                    app.input.buffer.remove(byte_pos);
                }
            }
            Ok(None)
        }
        Message::InputDelete => {
            if let Some((byte_pos, _)) = app.input.buffer.char_indices().nth(app.input.cursor) {
                app.input.buffer.remove(byte_pos);
            }
            Ok(None)
        }
        Message::InputLeft => {
            if app.input.cursor > 0 {
                app.input.cursor -= 1;
            }
            Ok(None)
        }
        Message::InputRight => {
            let char_count = app.input.buffer.chars().count();
            if app.input.cursor < char_count {
                app.input.cursor += 1;
            }
            Ok(None)
        }
        Message::InputHome => {
            app.input.cursor = 0;
            Ok(None)
        }
        Message::InputEnd => {
            app.input.cursor = app.input.buffer.chars().count();
            Ok(None)
        }
        Message::InputSubmit => {
            handle_input_submit(app).await?;
            Ok(Some(Message::GoBack))
        }
        Message::InputCancel => {
            app.input.mode = InputMode::None;
            Ok(Some(Message::GoBack))
        }

        // ===== Messages/Errors =====
        Message::Clear => {
            app.error_message.clear();
            app.success_message.clear();
            Ok(None)
        }
    }
}

/// F5: upload the selected local file into the bucket browsed in the other
/// panel.
fn show_upload_prompt(app: &mut App) {
    if app.active_upload.is_some() {
        app.show_error("An upload is already running");
        return;
    }

    let (bucket, prefix) = match &app.get_inactive_panel().panel_type {
        PanelType::ObjectBrowser { bucket, prefix } => (bucket.clone(), prefix.clone()),
        _ => {
            app.show_error("Open a bucket in the other panel to upload into");
            return;
        }
    };

    let selected_index = app.get_active_panel().selected_index;
    let file = {
        let panel = app.get_active_panel();
        match panel.list.get(selected_index) {
            Some(item) if item.kind == ItemKind::File => match &item.payload {
                ItemPayload::LocalEntry { path, is_dir: false } => Some(FilePayload {
                    name: item.name.clone(),
                    len: item.size.unwrap_or(0),
                    path: path.clone(),
                }),
                _ => None,
            },
            _ => None,
        }
    };
    let Some(file) = file else {
        app.show_error("Select a file in the local panel to upload");
        return;
    };

    app.input.buffer = format!("{prefix}{}", file.name);
    app.input.cursor = app.input.buffer.chars().count();
    app.input.prompt = format!("Upload to '{bucket}' as key (empty = file name): ");
    app.input.mode = InputMode::UploadKey {
        file,
        bucket,
        prefix,
    };
    app.prev_screen = Some(app.screen.clone());
    app.screen = Screen::Input;
}

fn show_delete_confirmation(app: &mut App) {
    let selected_index = app.get_active_panel().selected_index;
    let bucket = match &app.get_active_panel().panel_type {
        PanelType::ObjectBrowser { bucket, .. } => bucket.clone(),
        _ => return,
    };

    let key = {
        let panel = app.get_active_panel();
        match panel.list.get(selected_index) {
            Some(item) if item.kind == ItemKind::File => match &item.payload {
                ItemPayload::Object(obj) => Some(obj.key.clone()),
                _ => None,
            },
            _ => None,
        }
    };

    if let Some(key) = key {
        app.confirm = ConfirmState {
            bucket,
            key,
            button: 0,
        };
        app.prev_screen = Some(app.screen.clone());
        app.screen = Screen::ConfirmDelete;
    }
}

async fn confirm_delete(app: &mut App) -> Result<()> {
    let ConfirmState { bucket, key, .. } = app.confirm.clone();
    let store = app.store.clone();

    match store.delete_object(&bucket, &key).await {
        Ok(()) => {
            app.show_success(&format!("Deleted: {key}"));
            navigation::reload_object_panels(app, &bucket).await?;
        }
        Err(e) => app.show_error(&format!("Failed to delete '{key}': {e}")),
    }
    Ok(())
}

async fn handle_input_submit(app: &mut App) -> Result<()> {
    let mode = std::mem::take(&mut app.input.mode);
    let entered = std::mem::take(&mut app.input.buffer);

    match mode {
        InputMode::Filter => {
            let pattern = entered.trim().to_string();
            app.get_active_panel()
                .list
                .set_filter((!pattern.is_empty()).then_some(pattern));
            app.get_active_panel().selected_index = 0;
        }
        InputMode::UploadKey { file, bucket, .. } => {
            start_upload(app, file, bucket, entered).await;
        }
        InputMode::None => {}
    }
    Ok(())
}

async fn start_upload(app: &mut App, file: FilePayload, bucket: String, entered_key: String) {
    let key = {
        let trimmed = entered_key.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    let request = UploadRequest {
        file,
        bucket_id: bucket.clone(),
        key,
    };

    if let Err(e) = validate::validate_upload_request(&request) {
        app.show_error(&format!("{e}"));
        return;
    }

    let key = request.object_key().to_string();
    let file_name = request.file.name.clone();
    let task = app.uploads.start_upload(request).await;

    app.active_upload = Some(ActiveUpload {
        task,
        bucket,
        key,
        file_name,
        last_progress: 0.0,
    });
}
