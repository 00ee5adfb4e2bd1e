// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline queue for reviews that could not be submitted.
//!
//! The queue is one JSON snapshot (an array of pending reviews). Every
//! mutation is a locked read-modify-write that replaces the snapshot
//! atomically, so a reader never observes a torn file. A card appears at most
//! once; enqueueing it again replaces its quality in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flash_core::{PendingReview, Quality};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::ReviewSubmitter;
use crate::secrets::{SecretKey, SecretStore};
use crate::snapshot::{self, SnapshotLock};

/// Error type for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// I/O error.
    #[error("queue I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("queue serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// What a flush did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Entries the server confirmed and that were removed.
    pub submitted: usize,
    /// Entries still queued afterwards.
    pub remaining: usize,
    /// The pass hit a failure and left the rest unattempted.
    pub stopped_early: bool,
}

/// Persisted queue of pending reviews.
pub struct OfflineQueue {
    path: PathBuf,
    secrets: Arc<dyn SecretStore>,
    flush_gate: Mutex<()>,
}

impl OfflineQueue {
    /// Opens the queue at `path`.
    ///
    /// A missing file is an empty queue. A snapshot that cannot be parsed is
    /// moved aside to `<name>.corrupt` and the queue starts empty.
    pub fn open(path: &Path, secrets: Arc<dyn SecretStore>) -> QueueResult<Self> {
        let queue = OfflineQueue {
            path: path.to_path_buf(),
            secrets,
            flush_gate: Mutex::new(()),
        };
        let entries = load_entries(&queue.path)?;
        debug!(path = %queue.path.display(), pending = entries.len(), "opened review queue");
        Ok(queue)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Adds a review, replacing any queued review for the same card.
    ///
    /// A replaced entry keeps its position and gets a fresh timestamp.
    pub fn enqueue(&self, card_id: i64, quality: Quality) -> QueueResult<()> {
        let _lock = SnapshotLock::acquire(&self.path)?;
        let mut entries = load_entries(&self.path)?;
        let review = PendingReview::new(card_id, quality);

        match entries.iter_mut().find(|e| e.card_id == card_id) {
            Some(existing) => *existing = review,
            None => entries.push(review),
        }

        store_entries(&self.path, &entries)?;
        info!(card_id, %quality, pending = entries.len(), "review queued");
        Ok(())
    }

    /// Drops any queued review for `card_id`. Returns whether one was queued.
    ///
    /// Called once a newer review for the card has reached the server, so the
    /// stale one is never replayed over it.
    pub fn discard(&self, card_id: i64) -> QueueResult<bool> {
        let _lock = SnapshotLock::acquire(&self.path)?;
        let mut entries = load_entries(&self.path)?;
        let before = entries.len();
        entries.retain(|e| e.card_id != card_id);
        if entries.len() == before {
            return Ok(false);
        }

        store_entries(&self.path, &entries)?;
        debug!(card_id, pending = entries.len(), "superseded queued review dropped");
        Ok(true)
    }

    /// All queued reviews in flush order.
    pub fn peek_all(&self) -> QueueResult<Vec<PendingReview>> {
        load_entries(&self.path)
    }

    pub fn len(&self) -> QueueResult<usize> {
        Ok(load_entries(&self.path)?.len())
    }

    pub fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Replays queued reviews in order, stopping at the first failure.
    ///
    /// Without a stored access token this does nothing. Submission failures
    /// are logged, never returned: the caller learns about them only through
    /// [`FlushReport::remaining`]. Reviews queued while the flush is running
    /// are kept. Disk access runs on the blocking pool.
    pub async fn flush<S>(&self, submitter: &S) -> QueueResult<FlushReport>
    where
        S: ReviewSubmitter + ?Sized,
    {
        let _gate = self.flush_gate.lock().await;

        let entries = self.blocking(|path| load_entries(path)).await?;
        if entries.is_empty() {
            return Ok(FlushReport::default());
        }

        let secrets = Arc::clone(&self.secrets);
        let signed_in = self.blocking(move |_| Ok(has_credential(&*secrets))).await?;
        if !signed_in {
            debug!(pending = entries.len(), "not signed in, skipping flush");
            return Ok(FlushReport {
                remaining: entries.len(),
                ..FlushReport::default()
            });
        }

        let mut confirmed = Vec::new();
        let mut stopped_early = false;
        for entry in &entries {
            match submitter.submit(entry.card_id, entry.quality).await {
                Ok(()) => confirmed.push(entry.clone()),
                Err(e) => {
                    warn!(card_id = entry.card_id, error = %e, "flush stopped at failed review");
                    stopped_early = true;
                    break;
                }
            }
        }

        let remaining = if confirmed.is_empty() {
            entries.len()
        } else {
            let submitted = confirmed.clone();
            self.blocking(move |path| remove_confirmed(path, &submitted))
                .await?
        };

        info!(submitted = confirmed.len(), remaining, "review queue flushed");
        Ok(FlushReport {
            submitted: confirmed.len(),
            remaining,
            stopped_early,
        })
    }

    /// Runs `op` against the snapshot path on the blocking pool.
    async fn blocking<T, F>(&self, op: F) -> QueueResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> QueueResult<T> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || op(&path))
            .await
            .map_err(|e| QueueError::Io(io::Error::other(e)))?
    }
}

/// Drops confirmed entries from the current snapshot and returns how many are
/// left. An entry re-queued since it was read is not confirmed.
fn remove_confirmed(path: &Path, confirmed: &[PendingReview]) -> QueueResult<usize> {
    let _lock = SnapshotLock::acquire(path)?;
    let mut entries = load_entries(path)?;
    entries.retain(|e| !confirmed.contains(e));
    store_entries(path, &entries)?;
    Ok(entries.len())
}

fn has_credential(secrets: &dyn SecretStore) -> bool {
    match secrets.get(SecretKey::AccessToken) {
        Ok(token) => token.is_some_and(|t| !t.is_empty()),
        Err(e) => {
            warn!(error = %e, "cannot read access token, skipping flush");
            false
        }
    }
}

fn load_entries(path: &Path) -> QueueResult<Vec<PendingReview>> {
    let bytes = match snapshot::read_optional(path)? {
        Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => bytes,
        _ => return Ok(Vec::new()),
    };

    match serde_json::from_slice(&bytes) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            let aside = corrupt_path(path);
            warn!(
                path = %path.display(),
                moved_to = %aside.display(),
                error = %e,
                "review queue is corrupt, starting empty"
            );
            fs::rename(path, &aside)?;
            Ok(Vec::new())
        }
    }
}

fn store_entries(path: &Path, entries: &[PendingReview]) -> QueueResult<()> {
    let bytes = serde_json::to_vec_pretty(entries)?;
    snapshot::write_atomic(path, &bytes)?;
    Ok(())
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".corrupt");
    path.with_file_name(name)
}
