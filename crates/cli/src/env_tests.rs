// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

// FLASH_BASE_URL and FLASH_DATA_DIR feed every Config load, so tests here
// only touch variables nothing else reads in-process.

#[test]
fn test_vars_constants() {
    assert_eq!(vars::FLASH_BASE_URL, "FLASH_BASE_URL");
    assert_eq!(vars::FLASH_CONFIG, "FLASH_CONFIG");
    assert_eq!(vars::FLASH_DATA_DIR, "FLASH_DATA_DIR");
    assert_eq!(vars::FLASH_LOG, "FLASH_LOG");
}

#[test]
fn test_log_filter_roundtrip() {
    std::env::remove_var("FLASH_LOG");
    assert_eq!(log_filter(), None);

    std::env::set_var("FLASH_LOG", "flashrs=debug");
    assert_eq!(log_filter(), Some("flashrs=debug".to_string()));
    std::env::remove_var("FLASH_LOG");
}

#[test]
fn test_config_path_roundtrip() {
    std::env::remove_var("FLASH_CONFIG");
    assert_eq!(config_path(), None);

    std::env::set_var("FLASH_CONFIG", "/tmp/flash-test/config.toml");
    assert_eq!(
        config_path(),
        Some(PathBuf::from("/tmp/flash-test/config.toml"))
    );
    std::env::remove_var("FLASH_CONFIG");
}
