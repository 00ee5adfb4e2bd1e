// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session ownership: who is signed in, and telling everyone when that ends.
//!
//! The [`Session`] is constructed once at startup and shared by reference.
//! It is the only writer of the secret store besides the token refresh step,
//! and it publishes an [`AuthState`] on a watch channel so any component can
//! react to a forced logout.

use std::sync::Arc;

use flash_core::{Credentials, TokenResponse};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::secrets::{SecretKey, SecretResult, SecretStore};

/// Authentication state as observed by the rest of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No credentials stored.
    SignedOut,
    /// An access token is stored.
    SignedIn,
    /// The server rejected the session and refresh failed; the user must
    /// sign in again.
    Expired,
}

/// Owner of the signed-in session.
pub struct Session {
    secrets: Arc<dyn SecretStore>,
    state: watch::Sender<AuthState>,
}

impl Session {
    /// Creates the session owner, deriving the initial state from the store.
    pub fn new(secrets: Arc<dyn SecretStore>) -> Self {
        let initial = match secrets.get(SecretKey::AccessToken) {
            Ok(Some(token)) if !token.is_empty() => AuthState::SignedIn,
            Ok(_) => AuthState::SignedOut,
            Err(e) => {
                warn!(error = %e, "cannot read secret store, starting signed out");
                AuthState::SignedOut
            }
        };
        let (state, _) = watch::channel(initial);
        Session { secrets, state }
    }

    pub fn secrets(&self) -> &Arc<dyn SecretStore> {
        &self.secrets
    }

    pub fn state(&self) -> AuthState {
        *self.state.borrow()
    }

    /// Watches for state changes, including forced logout.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn access_token(&self) -> SecretResult<Option<String>> {
        self.secrets.get(SecretKey::AccessToken)
    }

    pub fn refresh_token(&self) -> SecretResult<Option<String>> {
        self.secrets.get(SecretKey::RefreshToken)
    }

    /// Persists the pair carried by a sign-in response.
    ///
    /// A response without an access token leaves the store untouched.
    pub fn sign_in(&self, response: &TokenResponse) -> SecretResult<bool> {
        let Some(creds) = response.credentials() else {
            return Ok(false);
        };
        self.secrets.store_credentials(&creds)?;
        self.state.send_replace(AuthState::SignedIn);
        info!(user = response.username.as_deref().unwrap_or("?"), "signed in");
        Ok(true)
    }

    /// Replaces the stored pair after a successful refresh.
    pub(crate) fn store_refreshed(&self, creds: &Credentials) -> SecretResult<()> {
        self.secrets.store_credentials(creds)?;
        self.state.send_replace(AuthState::SignedIn);
        Ok(())
    }

    /// Explicit logout: clears both tokens.
    pub fn logout(&self) -> SecretResult<()> {
        self.secrets.clear()?;
        self.state.send_replace(AuthState::SignedOut);
        info!("signed out");
        Ok(())
    }

    /// Forced logout after the server rejected the session.
    ///
    /// Clearing the store is best-effort; subscribers are notified either way.
    pub fn invalidate(&self) {
        if let Err(e) = self.secrets.clear() {
            warn!(error = %e, "failed to clear secrets while invalidating session");
        }
        self.state.send_replace(AuthState::Expired);
        warn!("session expired, sign in again");
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
