use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::Terminal;

use crate::app::{self, App};
use crate::handlers::key_to_message;
use crate::ui;

/// Main application loop following The Elm Architecture (TEA)
pub async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    let mut last_render = std::time::Instant::now();
    let render_interval = std::time::Duration::from_millis(100); // Limit to 10 FPS for smooth rendering
    let mut needs_render = true;

    loop {
        // Pump the active upload (progress updates, completion)
        if process_upload_task(app).await? {
            needs_render = true;
        }

        // Render only when needed and throttled
        let now = std::time::Instant::now();
        if needs_render && now.duration_since(last_render) >= render_interval {
            terminal.draw(|f| ui::draw(f, app))?;
            last_render = now;
            needs_render = false;
        }

        if app.should_quit {
            break;
        }

        if event::poll(std::time::Duration::from_millis(25))? {
            match event::read()? {
                Event::Key(key) => {
                    // Ignore key release events (Windows sends both press and release)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Convert key to message and handle cascading messages
                    if let Some(msg) = key_to_message(app, key.code, key.modifiers) {
                        let mut current_msg = Some(msg);
                        while let Some(message) = current_msg {
                            current_msg = app::update(app, message).await?;
                        }
                        needs_render = true;
                    }
                }
                Event::Resize(_, _) => {
                    needs_render = true;
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Polls the active upload: re-render on progress changes, settle the task
/// once its join handle finishes.
pub async fn process_upload_task(app: &mut App) -> Result<bool> {
    let mut needs_render = false;

    if let Some(active) = app.active_upload.as_mut() {
        let snapshot = active.task.snapshot();
        if (snapshot.progress - active.last_progress).abs() > f64::EPSILON {
            active.last_progress = snapshot.progress;
            needs_render = true;
        }
    }

    let finished = app
        .active_upload
        .as_ref()
        .is_some_and(|active| active.task.is_finished());

    if finished {
        let active = app.active_upload.take().unwrap();
        let cancelled = active.task.is_cancelled();

        match active.task.handle.await {
            Ok(Ok(receipt)) => {
                app.show_success(&format!("Uploaded: {}", receipt.key));
                app::navigation::reload_object_panels(app, &active.bucket).await?;
            }
            Ok(Err(err)) => {
                if cancelled {
                    tracing::info!(file = %active.file_name, "upload cancelled");
                } else {
                    app.show_error(&format!("Upload failed: {err}"));
                }
            }
            Err(err) => {
                app.show_error(&format!("Upload task aborted: {err}"));
            }
        }
        needs_render = true;
    }

    Ok(needs_render)
}
