// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for flash-core operations.

use thiserror::Error;

/// All possible errors that can occur in flash-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid review quality: {0}\n  hint: quality must be between 0 and 5")]
    InvalidQuality(i64),
}

/// A specialized Result type for flash-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
