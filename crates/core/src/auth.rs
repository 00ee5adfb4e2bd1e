// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Credential and authentication payloads.

use serde::{Deserialize, Serialize};

/// The access/refresh token pair.
///
/// Only the secret store keeps these around; everything else reads them for
/// the duration of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Credentials {
            access_token: Some(access_token.into()),
            refresh_token,
        }
    }
}

/// Body of the sign-in call.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of the token refresh call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token-bearing profile returned by sign-in, refresh and profile calls.
///
/// Every field is optional: the refresh endpoint returns a slimmer profile
/// than sign-in does, and the profile endpoint returns no token at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, rename = "totalXP")]
    pub total_xp: Option<i64>,
    #[serde(default, rename = "weeklyXP")]
    pub weekly_xp: Option<i64>,
    #[serde(default)]
    pub coins: Option<i64>,
    #[serde(default)]
    pub streak_days: Option<i64>,
}

impl TokenResponse {
    /// The pair carried by this response, if it carries an access token.
    pub fn credentials(&self) -> Option<Credentials> {
        self.token
            .as_ref()
            .map(|token| Credentials::new(token.clone(), self.refresh_token.clone()))
    }
}

/// Structured error body returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
