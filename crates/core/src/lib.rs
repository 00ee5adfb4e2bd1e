// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! flash-core: Shared wire and model types for the flash client
//!
//! This crate provides the text frame codec, duel envelopes, review and
//! credential payloads used by the `flash` client library. Nothing in here
//! performs I/O.

pub mod auth;
pub mod duel;
pub mod error;
pub mod frame;
pub mod review;

pub use auth::{ApiErrorBody, Credentials, LoginRequest, RefreshRequest, TokenResponse};
pub use duel::{DuelEnvelope, DuelEvent, ProgressUpdate, Reaction};
pub use error::{Error, Result};
pub use frame::{Frame, FrameError};
pub use review::{DueCard, PendingReview, Quality, ReviewSubmission};
