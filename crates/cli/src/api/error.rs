// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::secrets::SecretError;

/// Error type for API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection-level failure; the pipeline does not recover from these.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the session and it could not be refreshed.
    ///
    /// The session has already been invalidated when this is returned.
    #[error("session expired: please log in again")]
    SessionExpired,

    /// Any other non-2xx response.
    #[error("{}", describe_failure(.status, .message))]
    RequestFailed {
        status: u16,
        /// Message from the server's error body, when it sent one.
        message: Option<String>,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("failed to process server response: {0}")]
    DecodingFailed(String),

    /// The request body could not be serialized.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The secret store could not be read.
    #[error(transparent)]
    Secret(#[from] SecretError),
}

fn describe_failure(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(m) => m.clone(),
        None => format!("request failed with status {}", status),
    }
}

impl ApiError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::SessionExpired => "Session expired. Please log in again.".to_string(),
            ApiError::Transport(_) => {
                "Cannot reach the server. Check your connection and try again.".to_string()
            }
            ApiError::DecodingFailed(_) => "Failed to process server response.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error type for the token refresh step.
///
/// Callers of [`RequestPipeline::execute`](super::RequestPipeline::execute)
/// never see these: any refresh failure surfaces as
/// [`ApiError::SessionExpired`].
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("no refresh token stored")]
    NoRefreshToken,

    #[error("refresh rejected with status {0}")]
    RefreshRejected(u16),

    #[error("refresh response carried no access token")]
    MissingAccessToken,

    #[error("network error during refresh: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed refresh response: {0}")]
    Decoding(String),

    #[error(transparent)]
    Secret(#[from] SecretError),
}
