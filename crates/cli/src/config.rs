// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Configuration is stored in `<config dir>/flash/config.toml` and includes:
//! - `base_url`: REST server root; the duel socket URL is derived from it
//! - `duel_path`: path of the duel socket endpoint (default `/ws-duel`)
//! - `request_timeout_secs`, `heart_beat_ms`: network timings
//! - `data_dir`: where the offline queue and secrets live
//!
//! `FLASH_BASE_URL` overrides `base_url`, `FLASH_DATA_DIR` overrides `data_dir`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "flash";
const CONFIG_FILE_NAME: &str = "config.toml";
const QUEUE_FILE_NAME: &str = "pending_reviews.json";
const SECRETS_FILE_NAME: &str = "secrets.json";

/// Client configuration stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// REST server root, e.g. `https://api.example.com`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the duel socket endpoint, appended to the derived socket URL.
    #[serde(default = "default_duel_path")]
    pub duel_path: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Heart-beat interval offered in the duel handshake, in milliseconds.
    #[serde(default = "default_heart_beat_ms")]
    pub heart_beat_ms: u64,
    /// Directory for the offline queue and secrets (default: platform data dir).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_duel_path() -> String {
    "/ws-duel".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_heart_beat_ms() -> u64 {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            duel_path: default_duel_path(),
            request_timeout_secs: default_request_timeout_secs(),
            heart_beat_ms: default_heart_beat_ms(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file and applies environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.with_env_overrides().validated()
    }

    /// Loads `path` if it exists, otherwise starts from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Config::default().with_env_overrides().validated()
        }
    }

    /// Replaces the base URL, e.g. from `--base-url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.base_url = base_url.into();
        self.validated()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(url) = env::base_url() {
            self.base_url = url;
        }
        if let Some(dir) = env::data_dir() {
            self.data_dir = Some(dir);
        }
        self
    }

    fn validated(self) -> Result<Self> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::InvalidBaseUrl(self.base_url));
        }
        Ok(self)
    }

    /// REST root without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Socket URL for duels: the base URL with `http` swapped for `ws`.
    pub fn duel_url(&self) -> String {
        let base = self.api_base();
        let socket_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            base.to_string()
        };
        if self.duel_path.starts_with('/') {
            format!("{}{}", socket_base, self.duel_path)
        } else {
            format!("{}/{}", socket_base, self.duel_path)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Heart-beat pair offered in the handshake.
    pub fn heart_beat(&self) -> (u64, u64) {
        (self.heart_beat_ms, self.heart_beat_ms)
    }

    /// Directory holding the offline queue and secrets.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn queue_path(&self) -> PathBuf {
        self.data_dir().join(QUEUE_FILE_NAME)
    }

    pub fn secrets_path(&self) -> PathBuf {
        self.data_dir().join(SECRETS_FILE_NAME)
    }
}

/// Location of the config file: `FLASH_CONFIG`, else the platform config dir.
pub fn default_config_path() -> PathBuf {
    env::config_path().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    })
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
