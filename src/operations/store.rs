use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A bucket as shown on the dashboard.
#[derive(Debug, Clone)]
pub struct Bucket {
    pub name: String,
    pub created: Option<DateTime<Utc>>,
}

/// One listing entry: an object, or a `/`-delimited virtual folder.
#[derive(Debug, Clone)]
pub struct ObjectEntry {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
    pub is_prefix: bool,
}

/// Listing and deletion against an object-storage backend.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list_buckets(&self) -> Result<Vec<Bucket>>;
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectEntry>>;
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;
}

/// Folders first, then keys, the way storage consoles list them.
pub fn sort_entries(entries: &mut [ObjectEntry]) {
    entries.sort_by(|a, b| {
        if a.is_prefix && !b.is_prefix {
            std::cmp::Ordering::Less
        } else if !a.is_prefix && b.is_prefix {
            std::cmp::Ordering::Greater
        } else {
            a.key.cmp(&b.key)
        }
    });
}
