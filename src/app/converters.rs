use super::LocalFile;
use crate::models::list::{ItemKind, ItemPayload, PanelItem};
use crate::operations::store::{Bucket, ObjectEntry};

fn parent_item() -> PanelItem {
    PanelItem {
        name: "..".to_string(),
        kind: ItemKind::ParentDir,
        size: None,
        modified: None,
        payload: ItemPayload::Parent,
    }
}

pub fn buckets_to_items(buckets: Vec<Bucket>) -> Vec<PanelItem> {
    buckets
        .into_iter()
        .map(|bucket| PanelItem {
            name: bucket.name.clone(),
            kind: ItemKind::Folder,
            size: None,
            modified: bucket.created,
            payload: ItemPayload::Bucket(bucket),
        })
        .collect()
}

pub fn objects_to_items(objects: Vec<ObjectEntry>, prefix: &str) -> Vec<PanelItem> {
    let mut items = vec![parent_item()];

    items.extend(objects.into_iter().map(|obj| {
        let relative = obj.key.strip_prefix(prefix).unwrap_or(&obj.key);
        let name = if obj.is_prefix {
            relative.trim_end_matches('/').to_string()
        } else {
            relative.to_string()
        };

        PanelItem {
            name,
            kind: if obj.is_prefix {
                ItemKind::Folder
            } else {
                ItemKind::File
            },
            size: if obj.is_prefix {
                None
            } else {
                Some(obj.size as u64)
            },
            modified: obj.last_modified,
            payload: ItemPayload::Object(obj),
        }
    }));

    items
}

pub fn local_files_to_items(files: Vec<LocalFile>, has_parent: bool) -> Vec<PanelItem> {
    let mut items = Vec::new();

    if has_parent {
        items.push(parent_item());
    }

    items.extend(files.into_iter().map(|file| {
        let modified = file.modified.and_then(|st| {
            st.duration_since(std::time::UNIX_EPOCH)
                .ok()
                .and_then(|d| chrono::DateTime::from_timestamp(d.as_secs() as i64, 0))
        });

        PanelItem {
            name: file.name.clone(),
            kind: if file.is_dir {
                ItemKind::Folder
            } else {
                ItemKind::File
            },
            size: if file.is_dir { None } else { Some(file.size) },
            modified,
            payload: ItemPayload::LocalEntry {
                path: file.path,
                is_dir: file.is_dir,
            },
        }
    }));

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names_are_relative_to_the_prefix() {
        let objects = vec![
            ObjectEntry {
                key: "banners/".to_string(),
                size: 0,
                last_modified: None,
                is_prefix: true,
            },
            ObjectEntry {
                key: "readme.md".to_string(),
                size: 120,
                last_modified: None,
                is_prefix: false,
            },
        ];

        let items = objects_to_items(objects, "");
        assert_eq!(items[0].kind, ItemKind::ParentDir);
        assert_eq!(items[1].name, "banners");
        assert_eq!(items[1].kind, ItemKind::Folder);
        assert_eq!(items[2].name, "readme.md");
        assert_eq!(items[2].size, Some(120));
    }

    #[test]
    fn nested_object_names_drop_the_browsed_prefix() {
        let objects = vec![ObjectEntry {
            key: "banners/spring-sale.png".to_string(),
            size: 482_113,
            last_modified: None,
            is_prefix: false,
        }];

        let items = objects_to_items(objects, "banners/");
        assert_eq!(items[1].name, "spring-sale.png");
    }
}
