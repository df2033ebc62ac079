use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use rand::Rng;
use tokio::sync::Mutex;

use crate::operations::upload::UploadRequest;

pub type ProgressCallback = Arc<Mutex<dyn FnMut(u64) + Send>>;

/// Moves the bytes of one upload request and reports cumulative progress.
///
/// Implementations report monotonically increasing byte counts through the
/// callback and check the cancel flag between reports.
#[async_trait]
pub trait Transfer: Send + Sync {
    async fn send(
        &self,
        request: &UploadRequest,
        progress_callback: Option<ProgressCallback>,
        cancel: &AtomicBool,
    ) -> Result<()>;
}

/// Default tick length of the simulated transfer.
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);

/// Timer-driven stand-in for a real network transfer.
///
/// Advances by a random number of bytes per tick, at most a fifth of the
/// payload, so a non-empty payload takes at least five ticks. The last tick
/// is clamped to the exact payload length.
pub struct SimulatedTransfer {
    tick: Duration,
}

impl SimulatedTransfer {
    pub fn new() -> Self {
        Self { tick: DEFAULT_TICK }
    }

    pub fn with_tick(tick: Duration) -> Self {
        Self { tick }
    }
}

impl Default for SimulatedTransfer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transfer for SimulatedTransfer {
    async fn send(
        &self,
        request: &UploadRequest,
        progress_callback: Option<ProgressCallback>,
        cancel: &AtomicBool,
    ) -> Result<()> {
        let total = request.file.len;
        let ceiling = (total / 5).max(1);
        let mut sent = 0u64;

        while sent < total {
            tokio::time::sleep(self.tick).await;

            if cancel.load(Ordering::Relaxed) {
                bail!("upload cancelled");
            }

            let step = rand::rng().random_range(1..=ceiling);
            sent = (sent + step).min(total);

            if let Some(ref callback) = progress_callback {
                let mut cb = callback.lock().await;
                (*cb)(sent);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::upload::FilePayload;
    use std::path::PathBuf;

    fn request(len: u64) -> UploadRequest {
        UploadRequest {
            file: FilePayload {
                name: "payload.bin".to_string(),
                len,
                path: PathBuf::from("payload.bin"),
            },
            bucket_id: "b1".to_string(),
            key: None,
        }
    }

    fn collecting_callback() -> (ProgressCallback, Arc<std::sync::Mutex<Vec<u64>>>) {
        let reports = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = reports.clone();
        let callback: ProgressCallback = Arc::new(Mutex::new(move |sent: u64| {
            sink.lock().unwrap().push(sent);
        }));
        (callback, reports)
    }

    #[tokio::test]
    async fn reports_at_least_five_strictly_increasing_ticks() {
        let transfer = SimulatedTransfer::with_tick(Duration::from_millis(1));
        let (callback, reports) = collecting_callback();
        let cancel = AtomicBool::new(false);

        transfer
            .send(&request(1000), Some(callback), &cancel)
            .await
            .unwrap();

        let reports = reports.lock().unwrap();
        assert!(reports.len() >= 5, "got {} ticks", reports.len());
        assert!(reports.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*reports.last().unwrap(), 1000);
    }

    #[tokio::test]
    async fn increments_never_exceed_a_fifth_of_the_payload() {
        let transfer = SimulatedTransfer::with_tick(Duration::from_millis(1));
        let (callback, reports) = collecting_callback();
        let cancel = AtomicBool::new(false);

        transfer
            .send(&request(5000), Some(callback), &cancel)
            .await
            .unwrap();

        let reports = reports.lock().unwrap();
        let mut previous = 0;
        for &sent in reports.iter() {
            assert!(sent - previous <= 1000, "step {} too large", sent - previous);
            previous = sent;
        }
    }

    #[tokio::test]
    async fn empty_payload_completes_without_ticks() {
        let transfer = SimulatedTransfer::with_tick(Duration::from_millis(1));
        let (callback, reports) = collecting_callback();
        let cancel = AtomicBool::new(false);

        transfer
            .send(&request(0), Some(callback), &cancel)
            .await
            .unwrap();

        assert!(reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancel_flag_stops_the_transfer() {
        let transfer = SimulatedTransfer::with_tick(Duration::from_millis(1));
        let cancel = AtomicBool::new(true);

        let result = transfer.send(&request(1000), None, &cancel).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "upload cancelled");
    }
}
