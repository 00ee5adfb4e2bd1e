// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Secret storage for the session's token pair.
//!
//! The rest of the client only needs get/set/delete of named string secrets;
//! how they are protected at rest is up to the [`SecretStore`] implementation.
//!
//! - [`MemorySecretStore`] keeps secrets in process memory (tests, one-shot runs)
//! - [`FileSecretStore`] keeps a `0600` JSON snapshot on disk

mod file;
mod memory;

pub use file::FileSecretStore;
pub use memory::MemorySecretStore;

use std::fmt;

use flash_core::Credentials;

/// Error type for secret store operations.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// I/O error.
    #[error("secret store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The on-disk snapshot could not be read or written.
    #[error("secret store is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),

    /// A previous holder panicked while holding the store lock.
    #[error("secret store lock poisoned")]
    Poisoned,
}

/// Result type for secret store operations.
pub type SecretResult<T> = Result<T, SecretError>;

/// Names of the secrets the client keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SecretKey {
    AccessToken,
    RefreshToken,
}

impl SecretKey {
    /// Stable storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            SecretKey::AccessToken => "accessToken",
            SecretKey::RefreshToken => "refreshToken",
        }
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named string secrets with at-rest protection.
///
/// Implementations are shared process-wide behind an `Arc` and must be safe
/// to call from any thread.
pub trait SecretStore: Send + Sync {
    /// Reads a secret. A missing secret is `Ok(None)`.
    fn get(&self, key: SecretKey) -> SecretResult<Option<String>>;

    /// Writes a secret, replacing any previous value.
    fn set(&self, key: SecretKey, value: &str) -> SecretResult<()>;

    /// Removes a secret. Removing a missing secret is not an error.
    fn delete(&self, key: SecretKey) -> SecretResult<()>;

    /// Reads both tokens.
    fn credentials(&self) -> SecretResult<Credentials> {
        Ok(Credentials {
            access_token: self.get(SecretKey::AccessToken)?,
            refresh_token: self.get(SecretKey::RefreshToken)?,
        })
    }

    /// Replaces the stored pair with `creds`; a `None` half is removed.
    ///
    /// Implementations that can should override this to replace both halves
    /// in a single write.
    fn store_credentials(&self, creds: &Credentials) -> SecretResult<()> {
        for (key, value) in [
            (SecretKey::AccessToken, &creds.access_token),
            (SecretKey::RefreshToken, &creds.refresh_token),
        ] {
            match value {
                Some(v) => self.set(key, v)?,
                None => self.delete(key)?,
            }
        }
        Ok(())
    }

    /// Removes both tokens.
    fn clear(&self) -> SecretResult<()> {
        self.store_credentials(&Credentials::default())
    }
}
