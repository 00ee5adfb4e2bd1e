// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Study review payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Recall quality for a reviewed card, from 0 (blackout) to 5 (perfect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quality(u8);

impl Quality {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Quality {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Quality(value as u8))
        } else {
            Err(Error::InvalidQuality(value))
        }
    }
}

impl From<Quality> for i64 {
    fn from(quality: Quality) -> Self {
        i64::from(quality.0)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of a review submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub quality: Quality,
}

/// A review that could not be submitted yet.
///
/// Identity is `card_id`: a queue never holds two entries for the same card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReview {
    pub card_id: i64,
    pub quality: Quality,
    pub enqueued_at: DateTime<Utc>,
}

impl PendingReview {
    pub fn new(card_id: i64, quality: Quality) -> Self {
        PendingReview {
            card_id,
            quality,
            enqueued_at: Utc::now(),
        }
    }
}

/// A card due for review, as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueCard {
    pub id: i64,
    pub deck_id: i64,
    pub front_text: String,
    pub back_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_mnemonic: Option<String>,
}

#[cfg(test)]
#[path = "review_tests.rs"]
mod tests;
