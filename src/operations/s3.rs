use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use chrono::DateTime;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::operations::store::{sort_entries, Bucket, ObjectEntry, ObjectStore};
use crate::operations::transfer::{ProgressCallback, Transfer};
use crate::operations::upload::UploadRequest;

/// Real backend: lists and uploads against any S3-compatible endpoint
/// (AWS, Minio, Ceph, Hetzner, ...).
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub async fn new(region: &str, endpoint_url: Option<&str>, path_style: bool) -> Result<Self> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&config);
        if let Some(endpoint) = endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        // Path-style URLs are required for Minio and Ceph
        if path_style {
            builder = builder.force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        let resp = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| anyhow!("Failed to list buckets: {e:?}"))?;

        let mut buckets = Vec::new();
        for bucket in resp.buckets() {
            if let Some(name) = bucket.name() {
                buckets.push(Bucket {
                    name: name.to_string(),
                    created: bucket
                        .creation_date()
                        .map(|t| DateTime::from_timestamp(t.secs(), 0).unwrap_or_default()),
                });
            }
        }
        Ok(buckets)
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectEntry>> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .delimiter("/")
            .send()
            .await
            .map_err(|e| anyhow!("Failed to list objects in bucket '{bucket}': {e:?}"))?;

        let mut entries = Vec::new();

        for cp in resp.common_prefixes() {
            if let Some(prefix_str) = cp.prefix() {
                entries.push(ObjectEntry {
                    key: prefix_str.to_string(),
                    size: 0,
                    last_modified: None,
                    is_prefix: true,
                });
            }
        }

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                if key != prefix && !key.ends_with('/') {
                    entries.push(ObjectEntry {
                        key: key.to_string(),
                        size: obj.size().unwrap_or(0),
                        last_modified: obj
                            .last_modified()
                            .map(|t| DateTime::from_timestamp(t.secs(), 0).unwrap_or_default()),
                        is_prefix: false,
                    });
                }
            }
        }

        sort_entries(&mut entries);
        Ok(entries)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .context("Failed to delete object")?;

        Ok(())
    }
}

#[async_trait]
impl Transfer for S3Store {
    async fn send(
        &self,
        request: &UploadRequest,
        progress_callback: Option<ProgressCallback>,
        cancel: &AtomicBool,
    ) -> Result<()> {
        // Read the source once to drive byte-count callbacks
        let mut file = File::open(&request.file.path)
            .await
            .context("Failed to open source file")?;
        let mut buffer = vec![0u8; 8 * 1024 * 1024];
        let mut total_transferred = 0u64;

        loop {
            if cancel.load(Ordering::Relaxed) {
                bail!("upload cancelled");
            }

            let bytes_read = file.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            total_transferred += bytes_read as u64;

            if let Some(ref callback) = progress_callback {
                let mut cb = callback.lock().await;
                (*cb)(total_transferred);
            }
        }

        let body = ByteStream::from_path(&request.file.path)
            .await
            .context("Failed to read source file")?;

        self.client
            .put_object()
            .bucket(&request.bucket_id)
            .key(request.object_key())
            .body(body)
            .send()
            .await
            .context("Failed to upload object")?;

        Ok(())
    }
}
