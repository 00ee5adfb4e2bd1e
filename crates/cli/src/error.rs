// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::api::ApiError;
use crate::duel::DuelError;
use crate::secrets::SecretError;
use crate::sync::QueueError;

/// All possible errors that can occur in the flashrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not signed in: run 'flash login' first")]
    NotSignedIn,

    #[error("invalid base URL '{0}'\n  hint: use an http:// or https:// URL")]
    InvalidBaseUrl(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Duel(#[from] DuelError),

    #[error("failed to format output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Message suitable for showing to the user.
    ///
    /// An expired session reads as "log in again", never as a network error.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// A specialized Result type for flashrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
