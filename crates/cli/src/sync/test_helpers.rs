// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted submitter and queue fixtures shared by the sync tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use flash_core::{Credentials, Quality};

use super::{OfflineQueue, ReviewSubmitter};
use crate::api::{ApiError, ApiResult};
use crate::secrets::{MemorySecretStore, SecretStore};

/// Submitter that fails for chosen cards and records every call.
#[derive(Default)]
pub struct ScriptedSubmitter {
    failing: HashSet<i64>,
    expire_session: bool,
    calls: Mutex<Vec<(i64, u8)>>,
}

impl ScriptedSubmitter {
    pub fn failing(cards: &[i64]) -> Self {
        ScriptedSubmitter {
            failing: cards.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Fails every call as if the session had expired.
    pub fn expired() -> Self {
        ScriptedSubmitter {
            expire_session: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(i64, u8)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called_cards(&self) -> Vec<i64> {
        self.calls().into_iter().map(|(id, _)| id).collect()
    }
}

impl ReviewSubmitter for ScriptedSubmitter {
    fn submit(
        &self,
        card_id: i64,
        quality: Quality,
    ) -> Pin<Box<dyn Future<Output = ApiResult<()>> + Send + '_>> {
        self.calls.lock().unwrap().push((card_id, quality.value()));
        let result = if self.expire_session {
            Err(ApiError::SessionExpired)
        } else if self.failing.contains(&card_id) {
            Err(ApiError::RequestFailed {
                status: 503,
                message: None,
            })
        } else {
            Ok(())
        };
        Box::pin(async move { result })
    }
}

/// Lets a test keep a handle on the submitter it hands over.
impl ReviewSubmitter for Arc<ScriptedSubmitter> {
    fn submit(
        &self,
        card_id: i64,
        quality: Quality,
    ) -> Pin<Box<dyn Future<Output = ApiResult<()>> + Send + '_>> {
        self.as_ref().submit(card_id, quality)
    }
}

pub fn quality(value: i64) -> Quality {
    Quality::try_from(value).unwrap()
}

pub fn signed_in_store() -> Arc<dyn SecretStore> {
    Arc::new(MemorySecretStore::with_credentials(&Credentials::new(
        "tok",
        Some("ref".into()),
    )))
}

pub fn open_queue(path: &Path) -> OfflineQueue {
    OfflineQueue::open(path, signed_in_store()).unwrap()
}

pub fn queued_cards(queue: &OfflineQueue) -> Vec<i64> {
    queue
        .peek_all()
        .unwrap()
        .into_iter()
        .map(|e| e.card_id)
        .collect()
}
