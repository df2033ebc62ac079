use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::operations::transfer::{ProgressCallback, Transfer};

/// Substituted when the transfer mechanism fails without a usable message.
pub const GENERIC_UPLOAD_ERROR: &str = "Upload failed";

pub type UploadId = u64;

/// A local file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub name: String,
    pub len: u64,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: FilePayload,
    pub bucket_id: String,
    pub key: Option<String>,
}

impl UploadRequest {
    /// Destination key: the explicit key if provided, else the file name.
    pub fn object_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.file.name)
    }
}

/// Observable state of one upload attempt.
///
/// `progress` is non-decreasing within an attempt and reaches 100 only in
/// the same snapshot that clears `uploading` on success. `error` and
/// `uploading` are never set together.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadState {
    pub uploading: bool,
    pub progress: f64,
    pub error: Option<String>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            uploading: false,
            progress: 0.0,
            error: None,
        }
    }
}

/// Success value of a settled upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub key: String,
}

/// Handle returned by [`UploadController::start_upload`].
///
/// The join handle resolves with the receipt or the failure message; the
/// state channel is the synchronous side channel the dashboard renders from.
pub struct UploadTask {
    id: UploadId,
    state: watch::Receiver<UploadState>,
    cancelled: Arc<AtomicBool>,
    pub handle: JoinHandle<Result<UploadReceipt>>,
}

impl UploadTask {
    pub fn id(&self) -> UploadId {
        self.id
    }

    /// Read-only snapshot of the current state.
    pub fn snapshot(&self) -> UploadState {
        self.state.borrow().clone()
    }

    /// Subscription for callers that want to await state changes.
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

struct UploadSlot {
    tx: Arc<watch::Sender<UploadState>>,
    cancel: Arc<AtomicBool>,
}

/// Drives upload requests through their lifecycle.
///
/// Every request gets its own state slot, keyed by upload id and registered
/// at start time, so concurrently running uploads never write into each
/// other's observable state. The controller is reusable across any number
/// of requests.
pub struct UploadController {
    transfer: Arc<dyn Transfer>,
    slots: Mutex<HashMap<UploadId, UploadSlot>>,
    next_id: AtomicU64,
}

impl UploadController {
    pub fn new(transfer: Arc<dyn Transfer>) -> Self {
        Self {
            transfer,
            slots: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Starts an upload and returns immediately.
    ///
    /// The fresh slot is published as `{uploading: true, progress: 0,
    /// error: None}` before the transfer begins, so the error of a previous
    /// attempt never leaks into a new one. Callers are expected to have
    /// validated the request (see `models::validate`).
    pub async fn start_upload(&self, request: UploadRequest) -> UploadTask {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let key = request.object_key().to_string();
        let total = request.file.len;

        let (tx, rx) = watch::channel(UploadState {
            uploading: true,
            progress: 0.0,
            error: None,
        });
        let tx = Arc::new(tx);
        let cancel = Arc::new(AtomicBool::new(false));

        self.slots.lock().await.insert(
            id,
            UploadSlot {
                tx: tx.clone(),
                cancel: cancel.clone(),
            },
        );

        let progress_tx = tx.clone();
        let progress_cancel = cancel.clone();
        let progress: ProgressCallback = Arc::new(Mutex::new(move |sent: u64| {
            let pct = percent_of(sent, total);
            let current = progress_tx.borrow().progress;
            // 100 is published together with uploading=false on success only
            if pct < 100.0 && pct > current {
                publish(
                    &progress_tx,
                    &progress_cancel,
                    UploadState {
                        uploading: true,
                        progress: pct,
                        error: None,
                    },
                );
            }
        }));

        let transfer = self.transfer.clone();
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            tracing::info!(bucket = %request.bucket_id, key = %key, "upload started");
            match transfer.send(&request, Some(progress), &task_cancel).await {
                Ok(()) => {
                    publish(
                        &tx,
                        &task_cancel,
                        UploadState {
                            uploading: false,
                            progress: 100.0,
                            error: None,
                        },
                    );
                    tracing::info!(key = %key, "upload finished");
                    Ok(UploadReceipt { key })
                }
                Err(err) => {
                    let message = failure_message(&err);
                    let last = tx.borrow().progress;
                    publish(
                        &tx,
                        &task_cancel,
                        UploadState {
                            uploading: false,
                            progress: last,
                            error: Some(message.clone()),
                        },
                    );
                    tracing::warn!(key = %key, error = %message, "upload failed");
                    Err(anyhow!(message))
                }
            }
        });

        UploadTask {
            id,
            state: rx,
            cancelled: cancel,
            handle,
        }
    }

    /// Returns the slot to idle and cancels the transfer if it is still
    /// running. The cancel flag is flipped under the channel lock that
    /// serializes publishes, so a late progress report can never overwrite
    /// the reset values.
    pub async fn reset_upload_state(&self, id: UploadId) {
        if let Some(slot) = self.slots.lock().await.remove(&id) {
            slot.tx.send_modify(|state| {
                slot.cancel.store(true, Ordering::Relaxed);
                *state = UploadState::default();
            });
        }
    }

    /// Snapshot for any upload id; unknown or reset ids read as idle.
    pub async fn upload_state(&self, id: UploadId) -> UploadState {
        self.slots
            .lock()
            .await
            .get(&id)
            .map(|slot| slot.tx.borrow().clone())
            .unwrap_or_default()
    }
}

fn percent_of(sent: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        (sent as f64 / total as f64 * 100.0).min(100.0)
    }
}

fn publish(tx: &watch::Sender<UploadState>, cancel: &AtomicBool, next: UploadState) {
    tx.send_modify(|state| {
        if !cancel.load(Ordering::Relaxed) {
            *state = next;
        }
    });
}

fn failure_message(err: &anyhow::Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_UPLOAD_ERROR.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::transfer::SimulatedTransfer;
    use async_trait::async_trait;
    use std::time::Duration;

    fn request(name: &str, len: u64, bucket: &str, key: Option<&str>) -> UploadRequest {
        UploadRequest {
            file: FilePayload {
                name: name.to_string(),
                len,
                path: PathBuf::from(name),
            },
            bucket_id: bucket.to_string(),
            key: key.map(str::to_string),
        }
    }

    fn quick_controller() -> UploadController {
        UploadController::new(Arc::new(SimulatedTransfer::with_tick(Duration::from_millis(
            1,
        ))))
    }

    /// Reports a quarter of the payload, then fails with a fixed message.
    struct FailingTransfer {
        message: &'static str,
    }

    #[async_trait]
    impl Transfer for FailingTransfer {
        async fn send(
            &self,
            request: &UploadRequest,
            progress_callback: Option<ProgressCallback>,
            _cancel: &AtomicBool,
        ) -> Result<()> {
            if let Some(ref callback) = progress_callback {
                let mut cb = callback.lock().await;
                (*cb)(request.file.len / 4);
            }
            Err(anyhow!("{}", self.message))
        }
    }

    /// Reports once, then runs until cancelled.
    struct StallingTransfer;

    #[async_trait]
    impl Transfer for StallingTransfer {
        async fn send(
            &self,
            request: &UploadRequest,
            progress_callback: Option<ProgressCallback>,
            cancel: &AtomicBool,
        ) -> Result<()> {
            if let Some(ref callback) = progress_callback {
                let mut cb = callback.lock().await;
                (*cb)(request.file.len / 2);
            }
            loop {
                if cancel.load(Ordering::Relaxed) {
                    return Err(anyhow!("upload cancelled"));
                }
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        }
    }

    #[test]
    fn object_key_defaults_to_the_file_name() {
        assert_eq!(request("photo.png", 1, "b1", None).object_key(), "photo.png");
        assert_eq!(
            request("photo.png", 1, "b1", Some("images/photo.png")).object_key(),
            "images/photo.png"
        );
    }

    #[tokio::test]
    async fn resolves_with_the_file_name_when_no_key_is_given() {
        let controller = quick_controller();
        let task = controller
            .start_upload(request("photo.png", 4096, "b1", None))
            .await;

        let receipt = task.handle.await.unwrap().unwrap();
        assert_eq!(receipt.key, "photo.png");
    }

    #[tokio::test]
    async fn resolves_with_the_explicit_key_when_given() {
        let controller = quick_controller();
        let task = controller
            .start_upload(request("photo.png", 4096, "b1", Some("images/photo.png")))
            .await;

        let receipt = task.handle.await.unwrap().unwrap();
        assert_eq!(receipt.key, "images/photo.png");
    }

    #[tokio::test]
    async fn progress_is_non_decreasing_and_ends_at_exactly_100() {
        let controller = quick_controller();
        let task = controller
            .start_upload(request("big.bin", 64 * 1024, "b1", None))
            .await;
        let mut rx = task.subscribe();

        let mut seen = Vec::new();
        loop {
            let state = rx.borrow_and_update().clone();
            let done = !state.uploading;
            seen.push(state);
            if done || rx.changed().await.is_err() {
                break;
            }
        }

        assert!(seen
            .windows(2)
            .all(|w| w[0].progress <= w[1].progress));
        let last = seen.last().unwrap();
        assert_eq!(last.progress, 100.0);
        assert!(!last.uploading);
        assert!(last.error.is_none());
        for state in &seen[..seen.len() - 1] {
            assert!(state.uploading);
            assert!(state.progress < 100.0);
        }

        task.handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn uploading_is_true_for_the_whole_flight() {
        let controller = UploadController::new(Arc::new(SimulatedTransfer::with_tick(
            Duration::from_millis(20),
        )));
        let task = controller
            .start_upload(request("photo.png", 4096, "b1", None))
            .await;
        let id = task.id();

        let initial = task.snapshot();
        assert!(initial.uploading);
        assert_eq!(initial.progress, 0.0);
        assert!(initial.error.is_none());

        task.handle.await.unwrap().unwrap();

        let settled = controller.upload_state(id).await;
        assert!(!settled.uploading);
        assert_eq!(settled.progress, 100.0);
    }

    #[tokio::test]
    async fn failure_surfaces_the_transfer_message() {
        let controller = UploadController::new(Arc::new(FailingTransfer {
            message: "connection reset by peer",
        }));
        let task = controller
            .start_upload(request("photo.png", 4096, "b1", None))
            .await;
        let id = task.id();

        let err = task.handle.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "connection reset by peer");

        let state = controller.upload_state(id).await;
        assert!(!state.uploading);
        assert_eq!(state.error.as_deref(), Some("connection reset by peer"));
        assert_eq!(state.progress, 25.0);
    }

    #[tokio::test]
    async fn blank_failures_are_normalized_to_the_generic_message() {
        let controller = UploadController::new(Arc::new(FailingTransfer { message: "" }));
        let task = controller
            .start_upload(request("photo.png", 4096, "b1", None))
            .await;
        let id = task.id();

        let err = task.handle.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), GENERIC_UPLOAD_ERROR);
        assert_eq!(
            controller.upload_state(id).await.error.as_deref(),
            Some(GENERIC_UPLOAD_ERROR)
        );
    }

    #[tokio::test]
    async fn a_new_attempt_starts_without_the_previous_error() {
        let controller = UploadController::new(Arc::new(FailingTransfer {
            message: "no route to host",
        }));
        let first = controller
            .start_upload(request("photo.png", 4096, "b1", None))
            .await;
        let first_id = first.id();
        first.handle.await.unwrap().unwrap_err();

        let second = controller
            .start_upload(request("photo.png", 4096, "b1", None))
            .await;
        let fresh = second.snapshot();
        assert!(fresh.uploading);
        assert_eq!(fresh.progress, 0.0);
        assert!(fresh.error.is_none());

        // the failed attempt keeps its own slot
        assert!(controller.upload_state(first_id).await.error.is_some());
    }

    #[tokio::test]
    async fn reset_always_yields_idle() {
        let controller = quick_controller();
        let task = controller
            .start_upload(request("photo.png", 4096, "b1", None))
            .await;
        let id = task.id();
        task.handle.await.unwrap().unwrap();

        controller.reset_upload_state(id).await;
        assert_eq!(controller.upload_state(id).await, UploadState::default());

        // unknown ids are a no-op and read as idle
        controller.reset_upload_state(9999).await;
        assert_eq!(controller.upload_state(9999).await, UploadState::default());
    }

    #[tokio::test]
    async fn reset_cancels_in_flight_work_and_is_never_overwritten() {
        let controller = UploadController::new(Arc::new(StallingTransfer));
        let task = controller
            .start_upload(request("photo.png", 4096, "b1", None))
            .await;
        let id = task.id();
        let rx = task.subscribe();

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(rx.borrow().progress, 50.0);

        controller.reset_upload_state(id).await;
        assert!(task.is_cancelled());

        let err = task.handle.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "upload cancelled");

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(*rx.borrow(), UploadState::default());
        assert_eq!(controller.upload_state(id).await, UploadState::default());
    }

    #[tokio::test]
    async fn concurrent_uploads_use_isolated_slots() {
        let controller = quick_controller();
        let first = controller
            .start_upload(request("a.bin", 50_000, "b1", None))
            .await;
        let second = controller
            .start_upload(request("b.bin", 50_000, "b2", None))
            .await;
        assert_ne!(first.id(), second.id());

        let (first_id, second_id) = (first.id(), second.id());
        let first_receipt = first.handle.await.unwrap().unwrap();
        let second_receipt = second.handle.await.unwrap().unwrap();

        assert_eq!(first_receipt.key, "a.bin");
        assert_eq!(second_receipt.key, "b.bin");
        for id in [first_id, second_id] {
            let state = controller.upload_state(id).await;
            assert!(!state.uploading);
            assert_eq!(state.progress, 100.0);
            assert!(state.error.is_none());
        }
    }

    #[tokio::test]
    async fn an_empty_file_completes_without_intermediate_ticks() {
        let controller = quick_controller();
        let task = controller
            .start_upload(request("empty.txt", 0, "b1", None))
            .await;
        let id = task.id();

        let receipt = task.handle.await.unwrap().unwrap();
        assert_eq!(receipt.key, "empty.txt");

        let state = controller.upload_state(id).await;
        assert_eq!(state.progress, 100.0);
        assert!(!state.uploading);
    }
}
