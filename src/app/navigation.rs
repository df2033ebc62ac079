use super::{App, LocalFile, Panel, PanelType};
use crate::models::list::{ItemKind, ItemPayload, PanelItem};
use crate::operations::store::ObjectStore;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub async fn enter_selected(app: &mut App) -> Result<()> {
    let panel_type = app.get_active_panel().panel_type.clone();
    let selected_index = app.get_active_panel().selected_index;

    match panel_type {
        PanelType::BucketList => {
            let item = app.get_active_panel().list.get(selected_index);
            if let Some(PanelItem {
                payload: ItemPayload::Bucket(bucket),
                ..
            }) = item
            {
                let bucket = bucket.name.clone();
                navigate_to_prefix(app, bucket, String::new()).await?;
            }
        }
        PanelType::ObjectBrowser { bucket, prefix } => {
            let item = app.get_active_panel().list.get(selected_index);

            match item {
                Some(PanelItem {
                    kind: ItemKind::ParentDir,
                    ..
                }) => {
                    if prefix.is_empty() {
                        load_buckets(app).await?;
                    } else {
                        let parent = prefix
                            .trim_end_matches('/')
                            .rsplit_once('/')
                            .map(|(head, _)| format!("{head}/"))
                            .unwrap_or_default();
                        navigate_to_prefix(app, bucket, parent).await?;
                    }
                }
                Some(PanelItem {
                    kind: ItemKind::Folder,
                    payload: ItemPayload::Object(obj),
                    ..
                }) => {
                    let key = obj.key.clone();
                    navigate_to_prefix(app, bucket, key).await?;
                }
                _ => {}
            }
        }
        PanelType::LocalFilesystem { path } => {
            let item = app.get_active_panel().list.get(selected_index);

            match item {
                Some(PanelItem {
                    kind: ItemKind::ParentDir,
                    ..
                }) => {
                    if let Some(parent) = path.parent().map(Path::to_path_buf) {
                        navigate_to_local_dir(app, parent);
                    }
                }
                Some(PanelItem {
                    kind: ItemKind::Folder,
                    payload: ItemPayload::LocalEntry { path, .. },
                    ..
                }) => {
                    let target = path.clone();
                    navigate_to_local_dir(app, target);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Loads the bucket listing into the active panel.
pub async fn load_buckets(app: &mut App) -> Result<()> {
    let store = app.store.clone();
    match store.list_buckets().await {
        Ok(buckets) => {
            let panel = app.get_active_panel();
            panel.panel_type = PanelType::BucketList;
            panel
                .list
                .set_items(super::converters::buckets_to_items(buckets));
            panel.selected_index = 0;
        }
        Err(e) => {
            tracing::warn!("bucket listing failed: {e}");
            app.show_error(&format!("Failed to list buckets: {e}"));
        }
    }
    Ok(())
}

pub async fn navigate_to_prefix(app: &mut App, bucket: String, prefix: String) -> Result<()> {
    let store = app.store.clone();
    match store.list_objects(&bucket, &prefix).await {
        Ok(objects) => {
            let panel = app.get_active_panel();
            panel
                .list
                .set_items(super::converters::objects_to_items(objects, &prefix));
            panel.panel_type = PanelType::ObjectBrowser { bucket, prefix };
            panel.selected_index = 0;
        }
        Err(e) => {
            tracing::warn!(bucket = %bucket, "object listing failed: {e}");
            app.show_error(&format!("Failed to list bucket '{bucket}': {e}"));
        }
    }
    Ok(())
}

pub fn navigate_to_local_dir(app: &mut App, path: PathBuf) {
    match read_local_directory(&path) {
        Ok(files) => {
            let has_parent = path.parent().is_some();
            let panel = app.get_active_panel();
            panel.panel_type = PanelType::LocalFilesystem { path };
            panel
                .list
                .set_items(super::converters::local_files_to_items(files, has_parent));
            panel.selected_index = 0;
        }
        Err(e) => {
            let path_display = path.display();
            app.show_error(&format!("Cannot access '{path_display}': {e}"));
        }
    }
}

pub fn read_local_directory(path: &Path) -> Result<Vec<LocalFile>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let metadata = entry.metadata()?;

        files.push(LocalFile {
            name: entry.file_name().to_string_lossy().to_string(),
            path: entry.path(),
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified: metadata.modified().ok(),
        });
    }

    files.sort_by(|a, b| match (a.is_dir, b.is_dir) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    Ok(files)
}

/// Refreshes any panel currently browsing `bucket` after an upload or
/// delete changed its contents.
pub async fn reload_object_panels(app: &mut App, bucket: &str) -> Result<()> {
    let store = app.store.clone();
    refresh_panel(store.as_ref(), &mut app.left_panel, bucket).await;
    refresh_panel(store.as_ref(), &mut app.right_panel, bucket).await;
    Ok(())
}

async fn refresh_panel(store: &dyn ObjectStore, panel: &mut Panel, bucket: &str) {
    let (bucket, prefix) = match &panel.panel_type {
        PanelType::ObjectBrowser { bucket: b, prefix } if b == bucket => {
            (b.clone(), prefix.clone())
        }
        _ => return,
    };

    match store.list_objects(&bucket, &prefix).await {
        Ok(objects) => {
            panel
                .list
                .set_items(super::converters::objects_to_items(objects, &prefix));
            if panel.selected_index >= panel.list.len() {
                panel.selected_index = panel.list.len().saturating_sub(1);
            }
        }
        Err(e) => tracing::warn!(bucket = %bucket, "panel refresh failed: {e}"),
    }
}
