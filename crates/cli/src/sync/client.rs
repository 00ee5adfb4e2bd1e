// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Submit-or-queue review recording.

use flash_core::Quality;
use tracing::{debug, warn};

use super::queue::{FlushReport, OfflineQueue, QueueResult};
use super::ReviewSubmitter;
use crate::api::ApiError;

/// How a recorded review was handled.
#[derive(Debug)]
pub enum ReviewOutcome {
    /// The server accepted the review.
    Submitted,
    /// Submission failed and the review was queued for a later flush.
    Queued(ApiError),
}

impl ReviewOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, ReviewOutcome::Submitted)
    }
}

/// Records reviews, falling back to the offline queue.
pub struct StudySync<S> {
    submitter: S,
    queue: OfflineQueue,
}

impl<S: ReviewSubmitter> StudySync<S> {
    pub fn new(submitter: S, queue: OfflineQueue) -> Self {
        StudySync { submitter, queue }
    }

    pub fn queue(&self) -> &OfflineQueue {
        &self.queue
    }

    /// Submits a review directly; any failure queues it instead.
    ///
    /// After a direct submission succeeds, any older queued review for the
    /// same card is dropped and the rest of the backlog is flushed.
    pub async fn record_review(&self, card_id: i64, quality: Quality) -> QueueResult<ReviewOutcome> {
        match self.submitter.submit(card_id, quality).await {
            Ok(()) => {
                debug!(card_id, "review submitted");
                if let Err(e) = self.queue.discard(card_id) {
                    // Flushing now could replay the stale review over this one.
                    warn!(card_id, error = %e, "could not drop superseded queued review");
                    return Ok(ReviewOutcome::Submitted);
                }
                match self.queue.flush(&self.submitter).await {
                    Ok(report) if report.submitted > 0 => {
                        debug!(submitted = report.submitted, "flushed backlog after submission");
                    }
                    Ok(_) => {}
                    Err(e) => warn!(error = %e, "backlog flush failed"),
                }
                Ok(ReviewOutcome::Submitted)
            }
            Err(e) => {
                warn!(card_id, error = %e, "review submission failed, queueing");
                self.queue.enqueue(card_id, quality)?;
                Ok(ReviewOutcome::Queued(e))
            }
        }
    }

    /// Replays the backlog now.
    pub async fn flush(&self) -> QueueResult<FlushReport> {
        self.queue.flush(&self.submitter).await
    }
}
