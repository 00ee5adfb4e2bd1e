// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated request execution with one-shot token refresh.
//!
//! Flow for an authenticated request:
//! 1. Attach `Authorization: Bearer <access token>` if one is stored
//! 2. Send; on 401 (first attempt only) refresh the token pair
//! 3. Resend once with the new token; whatever comes back is final
//! 4. If the refresh fails for any reason, invalidate the session and fail
//!    with [`ApiError::SessionExpired`]

use std::sync::Arc;
use std::time::Duration;

use flash_core::{ApiErrorBody, Credentials, RefreshRequest, TokenResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, ApiResult, RefreshError};
use crate::session::Session;

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/api/auth/refresh";

/// How many times a request is re-sent after a refresh. Never more than one.
pub const MAX_AUTH_RETRIES: u32 = 1;

/// Description of a single API call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, starting with `/`.
    pub path: String,
    pub body: Option<serde_json::Value>,
    /// Public calls carry no bearer token and never trigger a refresh.
    pub authenticated: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            body: None,
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Attaches a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Marks the call as public (sign-in and friends).
    pub fn public(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// Executes API calls against the server, refreshing credentials on 401.
///
/// Shared by reference; concurrent `execute` calls are fine. Refreshes are
/// single-flight: when several calls hit 401 together, the first refreshes
/// and the rest reuse its token.
pub struct RequestPipeline {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
    refresh_gate: Mutex<()>,
}

impl RequestPipeline {
    /// Creates a pipeline with its own HTTP client.
    pub fn new(base_url: &str, timeout: Duration, session: Arc<Session>) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url, session))
    }

    /// Creates a pipeline around an existing HTTP client.
    pub fn with_client(http: reqwest::Client, base_url: &str, session: Arc<Session>) -> Self {
        RequestPipeline {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Executes a request and decodes its JSON response.
    ///
    /// An empty 2xx body decodes as JSON `null`.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> ApiResult<T> {
        let mut auth_retries = 0;

        loop {
            let token = if request.authenticated {
                self.session.access_token()?
            } else {
                None
            };

            let response = self.send(request, token.as_deref()).await?;

            if response.status() == StatusCode::UNAUTHORIZED
                && request.authenticated
                && auth_retries < MAX_AUTH_RETRIES
            {
                auth_retries += 1;
                debug!("unauthorized, refreshing access token");

                if let Err(e) = self.refresh_after(token.as_deref()).await {
                    warn!(error = %e, "token refresh failed, invalidating session");
                    self.session.invalidate();
                    return Err(ApiError::SessionExpired);
                }

                debug!("token refreshed, retrying request");
                continue;
            }

            return decode_response(response).await;
        }
    }

    async fn send(&self, request: &ApiRequest, token: Option<&str>) -> ApiResult<Response> {
        let mut builder = self
            .http
            .request(request.method.clone(), self.url(&request.path))
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    /// Refreshes unless a concurrent caller already replaced `stale`.
    async fn refresh_after(&self, stale: Option<&str>) -> Result<(), RefreshError> {
        let _gate = self.refresh_gate.lock().await;

        let current = self.session.access_token()?;
        if current.is_some() && current.as_deref() != stale {
            debug!("access token already refreshed by a concurrent request");
            return Ok(());
        }

        self.refresh().await
    }

    /// Exchanges the stored refresh token for a new token pair.
    ///
    /// The refresh token is kept if the server does not rotate it.
    pub async fn refresh(&self) -> Result<(), RefreshError> {
        let refresh_token = self
            .session
            .refresh_token()?
            .ok_or(RefreshError::NoRefreshToken)?;

        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .json(&RefreshRequest {
                refresh_token: refresh_token.clone(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::RefreshRejected(status.as_u16()));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| RefreshError::Decoding(e.to_string()))?;
        let access_token = body.token.ok_or(RefreshError::MissingAccessToken)?;

        let creds = Credentials::new(
            access_token,
            Some(body.refresh_token.unwrap_or(refresh_token)),
        );
        self.session.store_refreshed(&creds)?;
        info!("access token refreshed");
        Ok(())
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message);
        debug!(status = status.as_u16(), ?message, "request failed");
        return Err(ApiError::RequestFailed {
            status: status.as_u16(),
            message,
        });
    }

    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "response did not match expected shape");
        ApiError::DecodingFailed(e.to_string())
    })
}
