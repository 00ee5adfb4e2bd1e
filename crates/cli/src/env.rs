// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the client are defined here
//! with typed accessor functions.

use std::path::PathBuf;

/// Environment variable names.
pub mod vars {
    pub const FLASH_BASE_URL: &str = "FLASH_BASE_URL";
    pub const FLASH_CONFIG: &str = "FLASH_CONFIG";
    pub const FLASH_DATA_DIR: &str = "FLASH_DATA_DIR";
    pub const FLASH_LOG: &str = "FLASH_LOG";
}

/// Returns the value of `FLASH_BASE_URL` if set and non-empty.
pub fn base_url() -> Option<String> {
    std::env::var(vars::FLASH_BASE_URL)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Returns the value of `FLASH_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(vars::FLASH_CONFIG).ok().map(PathBuf::from)
}

/// Returns the value of `FLASH_DATA_DIR` if set.
pub fn data_dir() -> Option<PathBuf> {
    std::env::var(vars::FLASH_DATA_DIR).ok().map(PathBuf::from)
}

/// Returns the value of `FLASH_LOG` if set.
pub fn log_filter() -> Option<String> {
    std::env::var(vars::FLASH_LOG).ok()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
