// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Real-time duels over a STOMP-framed WebSocket.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ DuelSession │────►│  Transport  │────►│   Server    │
//! │  (watch)    │◄────│   (trait)   │◄────│  /ws-duel   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        ▲                   │
//!        │ apply(event)      ▼
//! ┌─────────────┐     ┌─────────────┐
//! │DuelSnapshot │◄────│ reader task │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! The session sends frames in call order over the sink half of the
//! connection; a spawned reader decodes inbound frames and applies them to
//! the shared [`DuelSnapshot`]. There is no automatic reconnect: when the
//! reader stops, the duel stays where it was until [`DuelSession::disconnect`].

mod session;
mod state;
mod transport;

pub use session::DuelSession;
pub use state::{clamp_progress, DuelSnapshot, DuelState, MAX_REACTIONS};
pub use transport::{
    Connection, FrameSink, FrameSource, Transport, TransportError, TransportFuture,
    TransportResult, WebSocketTransport,
};

use crate::secrets::SecretError;

/// Error type for duel operations.
#[derive(Debug, thiserror::Error)]
pub enum DuelError {
    /// No access token to authenticate the connection with.
    #[error("not signed in: run 'flash login' before starting a duel")]
    NoCredential,

    /// Matchmaking was started while a duel is already under way.
    #[error("a duel is already {0}; disconnect first")]
    AlreadyActive(DuelState),

    /// An outbound message was attempted without a connection.
    #[error("not connected to a duel")]
    NotConnected,

    /// Progress must be a number.
    #[error("invalid progress value: {0}")]
    InvalidProgress(f64),

    #[error("duel transport error: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error("failed to encode duel message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for duel operations.
pub type DuelResult<T> = Result<T, DuelError>;

#[cfg(test)]
pub(crate) mod test_helpers;
