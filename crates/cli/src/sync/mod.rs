// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Review submission with an offline backlog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │  StudySync  │────►│ ReviewSubmitter │────►│   Server    │
//! │             │     │    (StudyApi)   │     │             │
//! └─────────────┘     └─────────────────┘     └─────────────┘
//!        │ on failure           ▲
//!        ▼                      │ flush
//! ┌─────────────┐               │
//! │ OfflineQueue│───────────────┘
//! │   (JSON)    │
//! └─────────────┘
//! ```
//!
//! A review that cannot be submitted is kept in the queue and replayed, in
//! order, on the next flush. Flushing stops at the first failure.

mod client;
mod queue;

pub use client::{ReviewOutcome, StudySync};
pub use queue::{FlushReport, OfflineQueue, QueueError, QueueResult};

use std::future::Future;
use std::pin::Pin;

use flash_core::Quality;

use crate::api::ApiResult;

/// Sends one review to the server.
///
/// The queue flushes through this seam so tests can script failures.
pub trait ReviewSubmitter: Send + Sync {
    fn submit(
        &self,
        card_id: i64,
        quality: Quality,
    ) -> Pin<Box<dyn Future<Output = ApiResult<()>> + Send + '_>>;
}

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
mod client_tests;
