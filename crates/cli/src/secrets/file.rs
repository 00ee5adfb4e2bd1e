// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use flash_core::Credentials;
use tracing::debug;

use super::{SecretKey, SecretResult, SecretStore};
use crate::snapshot::{self, SnapshotLock};

type Snapshot = BTreeMap<String, String>;

/// Secret store backed by a single JSON snapshot readable only by the owner.
///
/// Every mutation rewrites the whole snapshot atomically, so the token pair
/// is always observed either before or after a replacement, never halfway.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: &Path) -> Self {
        FileSecretStore {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> SecretResult<Snapshot> {
        match snapshot::read_optional(&self.path)? {
            Some(bytes) if !bytes.is_empty() => Ok(serde_json::from_slice(&bytes)?),
            _ => Ok(Snapshot::new()),
        }
    }

    fn write(&self, secrets: &Snapshot) -> SecretResult<()> {
        let bytes = serde_json::to_vec_pretty(secrets)?;
        snapshot::write_atomic(&self.path, &bytes)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Snapshot)) -> SecretResult<()> {
        let _lock = SnapshotLock::acquire(&self.path)?;
        let mut secrets = self.read()?;
        apply(&mut secrets);
        self.write(&secrets)?;
        debug!(path = %self.path.display(), "secrets written");
        Ok(())
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, key: SecretKey) -> SecretResult<Option<String>> {
        Ok(self.read()?.remove(key.as_str()))
    }

    fn set(&self, key: SecretKey, value: &str) -> SecretResult<()> {
        self.update(|secrets| {
            secrets.insert(key.as_str().to_string(), value.to_string());
        })
    }

    fn delete(&self, key: SecretKey) -> SecretResult<()> {
        self.update(|secrets| {
            secrets.remove(key.as_str());
        })
    }

    fn store_credentials(&self, creds: &Credentials) -> SecretResult<()> {
        self.update(|secrets| {
            for (key, value) in [
                (SecretKey::AccessToken, &creds.access_token),
                (SecretKey::RefreshToken, &creds.refresh_token),
            ] {
                match value {
                    Some(v) => {
                        secrets.insert(key.as_str().to_string(), v.clone());
                    }
                    None => {
                        secrets.remove(key.as_str());
                    }
                }
            }
        })
    }
}
