// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Duel application messages carried inside frame bodies.
//!
//! The server pushes JSON envelopes to the user's private topic:
//! - `MATCHED` when an opponent is found
//! - `PROGRESS` when the opponent advances
//! - `FINISH` when someone wins
//! - `CHAT` for reactions
//!
//! Unknown envelope types are ignored so older clients keep working when the
//! server grows new ones.

use serde::{Deserialize, Serialize};

/// Private topic the server pushes duel envelopes to.
pub const DUEL_TOPIC: &str = "/user/topic/duel";
/// Subscription id used for the duel topic.
pub const DUEL_SUBSCRIPTION_ID: &str = "sub-0";
/// Joins the matchmaking queue.
pub const JOIN_DESTINATION: &str = "/app/duel.join";
/// Reports local progress.
pub const PROGRESS_DESTINATION: &str = "/app/duel.progress";
/// Sends a reaction to the opponent.
pub const REACTION_DESTINATION: &str = "/app/duel.reaction";
/// Leaves the duel.
pub const QUIT_DESTINATION: &str = "/app/duel.quit";

/// Raw envelope as received from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duel_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A duel event the client knows how to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum DuelEvent {
    /// An opponent was found.
    Matched { opponent: Option<String> },
    /// The opponent's progress, as reported by the server.
    Progress(f64),
    /// The duel is over.
    Finish { winner: Option<String> },
    /// A reaction from the opponent.
    Chat(String),
}

impl DuelEnvelope {
    /// Parses an envelope from a frame body.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Maps the envelope to an event.
    ///
    /// Returns `None` for unknown types and for a `CHAT` without content.
    /// A `PROGRESS` without a value reports zero.
    pub fn event(&self) -> Option<DuelEvent> {
        match self.kind.as_str() {
            "MATCHED" => Some(DuelEvent::Matched {
                opponent: self.opponent.clone(),
            }),
            "PROGRESS" => Some(DuelEvent::Progress(self.progress.unwrap_or(0.0))),
            "FINISH" => Some(DuelEvent::Finish {
                winner: self.content.clone(),
            }),
            "CHAT" => self.content.clone().map(DuelEvent::Chat),
            _ => None,
        }
    }
}

/// Outbound progress report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub progress: f64,
}

/// Outbound reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub content: String,
}

#[cfg(test)]
#[path = "duel_tests.rs"]
mod tests;
