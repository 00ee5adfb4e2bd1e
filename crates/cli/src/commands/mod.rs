// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod auth;
pub mod duel;
pub mod queue;
pub mod study;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::sync::Arc;

use crate::api::{AuthApi, RequestPipeline, StudyApi};
use crate::config::Config;
use crate::duel::DuelSession;
use crate::error::{Error, Result};
use crate::secrets::{FileSecretStore, SecretStore};
use crate::session::Session;
use crate::sync::{OfflineQueue, StudySync};

/// Services shared by every command, constructed once per invocation.
pub struct Context {
    pub config: Config,
    pub session: Arc<Session>,
    pub pipeline: Arc<RequestPipeline>,
}

impl Context {
    /// Builds the services, keeping secrets in the data directory.
    pub fn open(config: Config) -> Result<Self> {
        let secrets = Arc::new(FileSecretStore::new(&config.secrets_path()));
        Self::with_secrets(config, secrets)
    }

    pub fn with_secrets(config: Config, secrets: Arc<dyn SecretStore>) -> Result<Self> {
        let session = Arc::new(Session::new(secrets));
        let pipeline = Arc::new(RequestPipeline::new(
            config.api_base(),
            config.request_timeout(),
            Arc::clone(&session),
        )?);
        Ok(Context {
            config,
            session,
            pipeline,
        })
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(Arc::clone(&self.pipeline))
    }

    pub fn study(&self) -> StudyApi {
        StudyApi::new(Arc::clone(&self.pipeline))
    }

    pub fn queue(&self) -> Result<OfflineQueue> {
        Ok(OfflineQueue::open(
            &self.config.queue_path(),
            Arc::clone(self.session.secrets()),
        )?)
    }

    pub fn study_sync(&self) -> Result<StudySync<StudyApi>> {
        Ok(StudySync::new(self.study(), self.queue()?))
    }

    pub fn duel(&self) -> DuelSession {
        DuelSession::new(
            self.config.duel_url(),
            self.config.heart_beat(),
            Arc::clone(&self.session),
        )
    }

    /// Fails with [`Error::NotSignedIn`] unless an access token is stored.
    pub fn require_signed_in(&self) -> Result<()> {
        match self.session.access_token()? {
            Some(token) if !token.is_empty() => Ok(()),
            _ => Err(Error::NotSignedIn),
        }
    }
}
