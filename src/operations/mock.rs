//! Static demo fixtures standing in for a remote storage API.
//!
//! The seed table below is served as listing responses; uploads and deletes
//! mutate the in-memory copy for the session only.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::operations::store::{sort_entries, Bucket, ObjectEntry, ObjectStore};
use crate::operations::transfer::{ProgressCallback, SimulatedTransfer, Transfer};
use crate::operations::upload::UploadRequest;

/// Seed table: bucket name, creation date, objects as (key, size).
const FIXTURES: &[(&str, &str, &[(&str, i64)])] = &[
    (
        "media-assets",
        "2024-03-11T09:30:00Z",
        &[
            ("banners/spring-sale.png", 482_113),
            ("banners/winter-sale.png", 511_004),
            ("logos/dark.svg", 8_921),
            ("logos/light.svg", 8_876),
            ("video/intro.mp4", 48_211_992),
        ],
    ),
    (
        "backups",
        "2023-11-02T22:15:00Z",
        &[
            ("db/2026-08-01.dump", 104_857_600),
            ("db/2026-08-02.dump", 105_119_744),
            ("etc/nginx.conf", 3_412),
        ],
    ),
    (
        "user-uploads",
        "2025-06-24T14:02:00Z",
        &[("avatars/u1001.jpg", 44_120), ("avatars/u1002.jpg", 39_887)],
    ),
];

#[derive(Debug, Clone)]
struct MockObject {
    key: String,
    size: i64,
    last_modified: Option<DateTime<Utc>>,
}

pub struct MockStore {
    buckets: Vec<Bucket>,
    objects: Mutex<HashMap<String, Vec<MockObject>>>,
    ticker: SimulatedTransfer,
}

impl MockStore {
    pub fn new(tick: Duration) -> Self {
        let mut buckets = Vec::new();
        let mut objects = HashMap::new();

        for (name, created, entries) in FIXTURES {
            let created = DateTime::parse_from_rfc3339(created)
                .ok()
                .map(|t| t.with_timezone(&Utc));
            buckets.push(Bucket {
                name: name.to_string(),
                created,
            });
            objects.insert(
                name.to_string(),
                entries
                    .iter()
                    .map(|(key, size)| MockObject {
                        key: key.to_string(),
                        size: *size,
                        last_modified: created,
                    })
                    .collect(),
            );
        }

        Self {
            buckets,
            objects: Mutex::new(objects),
            ticker: SimulatedTransfer::with_tick(tick),
        }
    }

    /// Records a finished upload so subsequent listings include it.
    async fn record(&self, bucket: &str, key: &str, size: i64) {
        let mut objects = self.objects.lock().await;
        if let Some(entries) = objects.get_mut(bucket) {
            entries.retain(|obj| obj.key != key);
            entries.push(MockObject {
                key: key.to_string(),
                size,
                last_modified: Some(Utc::now()),
            });
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new(crate::operations::transfer::DEFAULT_TICK)
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        Ok(self.buckets.clone())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectEntry>> {
        let objects = self.objects.lock().await;
        let entries = objects
            .get(bucket)
            .ok_or_else(|| anyhow!("bucket '{bucket}' not found"))?;

        let mut listed = Vec::new();
        let mut folders = BTreeSet::new();

        for obj in entries {
            if !obj.key.starts_with(prefix) || obj.key == prefix {
                continue;
            }
            let rest = &obj.key[prefix.len()..];
            if let Some(slash) = rest.find('/') {
                let folder = format!("{prefix}{}", &rest[..=slash]);
                if folders.insert(folder.clone()) {
                    listed.push(ObjectEntry {
                        key: folder,
                        size: 0,
                        last_modified: None,
                        is_prefix: true,
                    });
                }
            } else {
                listed.push(ObjectEntry {
                    key: obj.key.clone(),
                    size: obj.size,
                    last_modified: obj.last_modified,
                    is_prefix: false,
                });
            }
        }

        sort_entries(&mut listed);
        Ok(listed)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        let mut objects = self.objects.lock().await;
        let entries = objects
            .get_mut(bucket)
            .ok_or_else(|| anyhow!("bucket '{bucket}' not found"))?;
        entries.retain(|obj| obj.key != key);
        Ok(())
    }
}

#[async_trait]
impl Transfer for MockStore {
    async fn send(
        &self,
        request: &UploadRequest,
        progress_callback: Option<ProgressCallback>,
        cancel: &AtomicBool,
    ) -> Result<()> {
        if !self.objects.lock().await.contains_key(&request.bucket_id) {
            return Err(anyhow!("bucket '{}' not found", request.bucket_id));
        }

        self.ticker.send(request, progress_callback, cancel).await?;
        self.record(
            &request.bucket_id,
            request.object_key(),
            request.file.len as i64,
        )
        .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::upload::FilePayload;
    use std::path::PathBuf;

    fn quick_store() -> MockStore {
        MockStore::new(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn serves_the_seeded_buckets() {
        let store = quick_store();
        let buckets = store.list_buckets().await.unwrap();
        let names: Vec<_> = buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["media-assets", "backups", "user-uploads"]);
        assert!(buckets.iter().all(|b| b.created.is_some()));
    }

    #[tokio::test]
    async fn groups_keys_into_folders_at_the_root() {
        let store = quick_store();
        let entries = store.list_objects("media-assets", "").await.unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["banners/", "logos/", "video/"]);
        assert!(entries.iter().all(|e| e.is_prefix));
    }

    #[tokio::test]
    async fn lists_objects_under_a_prefix() {
        let store = quick_store();
        let entries = store.list_objects("media-assets", "banners/").await.unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["banners/spring-sale.png", "banners/winter-sale.png"]);
        assert!(entries.iter().all(|e| !e.is_prefix));
    }

    #[tokio::test]
    async fn unknown_buckets_are_an_error() {
        let store = quick_store();
        let err = store.list_objects("nope", "").await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn delete_removes_the_object() {
        let store = quick_store();
        store
            .delete_object("backups", "etc/nginx.conf")
            .await
            .unwrap();
        let entries = store.list_objects("backups", "etc/").await.unwrap();
        assert!(entries.is_empty());

        // the other folder is untouched
        let db = store.list_objects("backups", "db/").await.unwrap();
        assert_eq!(db.len(), 2);
    }

    #[tokio::test]
    async fn uploads_are_recorded_into_the_fixtures() {
        let store = quick_store();
        let request = UploadRequest {
            file: FilePayload {
                name: "u1003.jpg".to_string(),
                len: 52_000,
                path: PathBuf::from("u1003.jpg"),
            },
            bucket_id: "user-uploads".to_string(),
            key: Some("avatars/u1003.jpg".to_string()),
        };
        let cancel = AtomicBool::new(false);

        store.send(&request, None, &cancel).await.unwrap();

        let entries = store.list_objects("user-uploads", "avatars/").await.unwrap();
        assert_eq!(entries.len(), 3);
        let uploaded = entries
            .iter()
            .find(|e| e.key == "avatars/u1003.jpg")
            .unwrap();
        assert_eq!(uploaded.size, 52_000);
        assert!(uploaded.last_modified.is_some());
    }

    #[tokio::test]
    async fn uploads_to_unknown_buckets_fail() {
        let store = quick_store();
        let request = UploadRequest {
            file: FilePayload {
                name: "a.txt".to_string(),
                len: 10,
                path: PathBuf::from("a.txt"),
            },
            bucket_id: "missing".to_string(),
            key: None,
        };
        let cancel = AtomicBool::new(false);

        let err = store.send(&request, None, &cancel).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
