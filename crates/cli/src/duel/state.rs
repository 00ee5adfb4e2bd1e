// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Duel state and its transition function.

use std::collections::VecDeque;
use std::fmt;

use flash_core::DuelEvent;

/// Most recent reactions kept for display.
pub const MAX_REACTIONS: usize = 5;

/// Where a duel attempt stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuelState {
    #[default]
    Idle,
    Searching,
    Matched,
    Finished,
}

impl fmt::Display for DuelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DuelState::Idle => "idle",
            DuelState::Searching => "searching",
            DuelState::Matched => "matched",
            DuelState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Everything a duel screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuelSnapshot {
    pub state: DuelState,
    pub opponent_name: Option<String>,
    pub my_progress: f64,
    pub opponent_progress: f64,
    pub winner_name: Option<String>,
    /// Opponent reactions, oldest first.
    pub reactions: VecDeque<String>,
    /// The reader still has a live connection.
    pub connected: bool,
}

impl DuelSnapshot {
    /// Applies a server event, returning whether anything changed.
    ///
    /// Events that make no sense in the current state are ignored: a match
    /// only lands while searching, progress and finish only while matched.
    /// Reactions are accepted in any state.
    pub fn apply(&mut self, event: DuelEvent) -> bool {
        match (self.state, event) {
            (DuelState::Searching, DuelEvent::Matched { opponent }) => {
                self.state = DuelState::Matched;
                self.opponent_name = opponent;
                self.my_progress = 0.0;
                self.opponent_progress = 0.0;
                true
            }
            (DuelState::Matched, DuelEvent::Progress(value)) => match clamp_progress(value) {
                Some(value) if value != self.opponent_progress => {
                    self.opponent_progress = value;
                    true
                }
                _ => false,
            },
            (DuelState::Matched, DuelEvent::Finish { winner }) => {
                self.state = DuelState::Finished;
                self.winner_name = winner;
                true
            }
            (_, DuelEvent::Chat(reaction)) => {
                self.push_reaction(reaction);
                true
            }
            _ => false,
        }
    }

    /// Records our own progress. Only meaningful while matched.
    pub fn set_my_progress(&mut self, value: f64) -> bool {
        if self.state != DuelState::Matched {
            return false;
        }
        match clamp_progress(value) {
            Some(value) => {
                self.my_progress = value;
                true
            }
            None => false,
        }
    }

    fn push_reaction(&mut self, reaction: String) {
        self.reactions.push_back(reaction);
        while self.reactions.len() > MAX_REACTIONS {
            self.reactions.pop_front();
        }
    }
}

/// Clamps into `[0, 1]`; `NaN` is rejected.
pub fn clamp_progress(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(0.0, 1.0))
    }
}
