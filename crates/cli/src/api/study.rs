// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Study endpoints.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use flash_core::{DueCard, Quality, ReviewSubmission};
use serde::de::IgnoredAny;

use super::error::ApiResult;
use super::pipeline::{ApiRequest, RequestPipeline};
use crate::sync::ReviewSubmitter;

const STUDY_PATH: &str = "/api/study";

/// Study calls: due cards and review submission.
#[derive(Clone)]
pub struct StudyApi {
    pipeline: Arc<RequestPipeline>,
}

impl StudyApi {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        StudyApi { pipeline }
    }

    /// Cards due for review right now.
    pub async fn due_cards(&self) -> ApiResult<Vec<DueCard>> {
        let request = ApiRequest::get(format!("{}/due-cards", STUDY_PATH));
        self.pipeline.execute(&request).await
    }

    /// Records a review for one card.
    pub async fn submit_review(&self, card_id: i64, quality: Quality) -> ApiResult<()> {
        let request = ApiRequest::post(format!("{}/{}/review", STUDY_PATH, card_id))
            .json(&ReviewSubmission { quality })?;
        let _: IgnoredAny = self.pipeline.execute(&request).await?;
        Ok(())
    }
}

impl ReviewSubmitter for StudyApi {
    fn submit(
        &self,
        card_id: i64,
        quality: Quality,
    ) -> Pin<Box<dyn Future<Output = ApiResult<()>> + Send + '_>> {
        Box::pin(self.submit_review(card_id, quality))
    }
}
