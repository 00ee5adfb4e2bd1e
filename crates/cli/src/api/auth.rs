// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sign-in and profile endpoints.

use std::sync::Arc;

use flash_core::{LoginRequest, TokenResponse};
use tracing::warn;

use super::error::{ApiError, ApiResult};
use super::pipeline::{ApiRequest, RequestPipeline};

const SIGNIN_PATH: &str = "/api/auth/signin";
const PROFILE_PATH: &str = "/api/user/me";

/// Account calls.
#[derive(Clone)]
pub struct AuthApi {
    pipeline: Arc<RequestPipeline>,
}

impl AuthApi {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        AuthApi { pipeline }
    }

    /// Signs in with a username (or email) and password and stores the
    /// returned token pair.
    ///
    /// A rejected password surfaces as [`ApiError::RequestFailed`]; sign-in
    /// never goes through the refresh path.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        let request = ApiRequest::post(SIGNIN_PATH)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })?
            .public();
        let response: TokenResponse = self.pipeline.execute(&request).await?;

        if !self.pipeline.session().sign_in(&response)? {
            warn!("sign-in response carried no access token");
            return Err(ApiError::DecodingFailed(
                "sign-in response carried no access token".to_string(),
            ));
        }
        Ok(response)
    }

    /// The signed-in user's profile.
    pub async fn profile(&self) -> ApiResult<TokenResponse> {
        self.pipeline.execute(&ApiRequest::get(PROFILE_PATH)).await
    }
}
