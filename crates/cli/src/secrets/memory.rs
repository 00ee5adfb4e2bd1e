// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;
use std::sync::Mutex;

use flash_core::Credentials;

use super::{SecretError, SecretKey, SecretResult, SecretStore};

/// In-memory secret store.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: Mutex<HashMap<SecretKey, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `creds`.
    pub fn with_credentials(creds: &Credentials) -> Self {
        let mut secrets = HashMap::new();
        if let Some(token) = &creds.access_token {
            secrets.insert(SecretKey::AccessToken, token.clone());
        }
        if let Some(token) = &creds.refresh_token {
            secrets.insert(SecretKey::RefreshToken, token.clone());
        }
        MemorySecretStore {
            secrets: Mutex::new(secrets),
        }
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: SecretKey) -> SecretResult<Option<String>> {
        let secrets = self.secrets.lock().map_err(|_| SecretError::Poisoned)?;
        Ok(secrets.get(&key).cloned())
    }

    fn set(&self, key: SecretKey, value: &str) -> SecretResult<()> {
        let mut secrets = self.secrets.lock().map_err(|_| SecretError::Poisoned)?;
        secrets.insert(key, value.to_string());
        Ok(())
    }

    fn delete(&self, key: SecretKey) -> SecretResult<()> {
        let mut secrets = self.secrets.lock().map_err(|_| SecretError::Poisoned)?;
        secrets.remove(&key);
        Ok(())
    }

    fn store_credentials(&self, creds: &Credentials) -> SecretResult<()> {
        let mut secrets = self.secrets.lock().map_err(|_| SecretError::Poisoned)?;
        secrets.clear();
        if let Some(token) = &creds.access_token {
            secrets.insert(SecretKey::AccessToken, token.clone());
        }
        if let Some(token) = &creds.refresh_token {
            secrets.insert(SecretKey::RefreshToken, token.clone());
        }
        Ok(())
    }
}
