// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `flash` isolated in `home`: config, data and base URL all come from there.
pub fn flash(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("flash");
    cmd.env("FLASH_CONFIG", home.path().join("config.toml"))
        .env("FLASH_DATA_DIR", home.path().join("data"))
        .env_remove("FLASH_BASE_URL")
        .env_remove("FLASH_LOG");
    cmd
}
