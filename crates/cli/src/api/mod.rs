// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! REST access to the flashcard server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │  StudyApi   │────►│ RequestPipeline │────►│   Server    │
//! │  AuthApi    │◄────│ (401 → refresh) │◄────│   (HTTPS)   │
//! └─────────────┘     └─────────────────┘     └─────────────┘
//!                              │
//!                              ▼
//!                     ┌─────────────────┐
//!                     │     Session     │  (secret store, logout)
//!                     └─────────────────┘
//! ```
//!
//! Every authenticated call goes through [`RequestPipeline::execute`], which
//! refreshes an expired access token and retries the call exactly once.

mod auth;
mod error;
mod pipeline;
mod study;

pub use auth::AuthApi;
pub use error::{ApiError, ApiResult, RefreshError};
pub use pipeline::{ApiRequest, RequestPipeline, MAX_AUTH_RETRIES, REFRESH_PATH};
pub use study::StudyApi;
