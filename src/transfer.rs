//! Upload and download progress tracking.
//!
//! A `TransferTracker` is created by whoever drives transfers and handed to
//! the components that report progress. Completion of an upload batch is
//! reported to an optional `TransferObserver` instead of opening UI directly.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::error::{SequenceError, SequenceResult};

/// Receives upload lifecycle events.
pub trait TransferObserver: Send + Sync {
    /// Called once when every image of the current upload batch is uploaded.
    fn upload_finished(&self, total: usize);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Counters {
    running_downloads: usize,
    images_to_upload: usize,
    images_uploaded: usize,
    submitting_changeset: bool,
}

/// Counts running downloads and upload progress.
///
/// All counters sit behind one lock so related values (such as uploaded and
/// total) are always read as a consistent pair.
#[derive(Default)]
pub struct TransferTracker {
    counters: Mutex<Counters>,
    observer: Option<Arc<dyn TransferObserver>>,
}

impl TransferTracker {
    /// Creates a tracker without an observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker that reports upload completion to `observer`.
    pub fn with_observer(observer: Arc<dyn TransferObserver>) -> Self {
        Self {
            counters: Mutex::new(Counters::default()),
            observer: Some(observer),
        }
    }

    // =========================================================================
    // DOWNLOADS
    // =========================================================================

    /// Records that a download started.
    pub fn start_download(&self) {
        let mut counters = self.lock();
        counters.running_downloads += 1;
        debug!(running = counters.running_downloads, "download started");
    }

    /// Records that a download finished.
    ///
    /// Fails when no download is running.
    pub fn finish_download(&self) -> SequenceResult<()> {
        let mut counters = self.lock();
        if counters.running_downloads == 0 {
            return Err(SequenceError::invalid_state(
                "finish_download called with no running downloads",
            ));
        }
        counters.running_downloads -= 1;
        debug!(running = counters.running_downloads, "download finished");
        Ok(())
    }

    /// Returns true if any download is running.
    pub fn is_downloading(&self) -> bool {
        self.lock().running_downloads > 0
    }

    /// Returns the number of running downloads.
    pub fn running_downloads(&self) -> usize {
        self.lock().running_downloads
    }

    // =========================================================================
    // UPLOADS
    // =========================================================================

    /// Adds `amount` images to the upload batch.
    ///
    /// If the previous batch has completed, the counters restart from zero.
    pub fn add_images_to_upload(&self, amount: usize) {
        let mut counters = self.lock();
        if counters.images_to_upload <= counters.images_uploaded {
            counters.images_to_upload = 0;
            counters.images_uploaded = 0;
        }
        counters.images_to_upload += amount;
        debug!(
            to_upload = counters.images_to_upload,
            uploaded = counters.images_uploaded,
            "upload batch extended"
        );
    }

    /// Records one uploaded image and reports batch completion.
    pub fn image_uploaded(&self) {
        let finished = {
            let mut counters = self.lock();
            counters.images_uploaded += 1;
            (counters.images_uploaded == counters.images_to_upload)
                .then_some(counters.images_to_upload)
        };

        // Observer runs outside the lock so it may query the tracker.
        if let Some(total) = finished {
            info!(total, "upload finished");
            if let Some(observer) = &self.observer {
                observer.upload_finished(total);
            }
        }
    }

    /// Returns true while uploaded images lag behind the batch size.
    pub fn is_uploading(&self) -> bool {
        let counters = self.lock();
        counters.images_to_upload > counters.images_uploaded
    }

    /// Returns the size of the current upload batch.
    pub fn images_to_upload(&self) -> usize {
        self.lock().images_to_upload
    }

    /// Returns how many images of the current batch are uploaded.
    pub fn images_uploaded(&self) -> usize {
        self.lock().images_uploaded
    }

    /// Status line text, e.g. `Uploading: (3/10)`.
    pub fn upload_status(&self) -> String {
        let counters = self.lock();
        format!(
            "Uploading: ({}/{})",
            counters.images_uploaded, counters.images_to_upload
        )
    }

    // =========================================================================
    // CHANGESETS
    // =========================================================================

    pub fn set_submitting_changeset(&self, submitting: bool) {
        self.lock().submitting_changeset = submitting;
    }

    pub fn is_submitting_changeset(&self) -> bool {
        self.lock().submitting_changeset
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
