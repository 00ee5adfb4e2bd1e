// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use flash_core::Quality;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Parse a review quality (0-5).
fn parse_quality(s: &str) -> Result<Quality, String> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    Quality::try_from(value).map_err(|e| e.to_string())
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "flash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Study flashcards from the terminal, offline-tolerant, with live duels")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides the config file)
    #[arg(long, global = true, value_name = "url")]
    pub base_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and store the session tokens
    #[command(after_help = "\
Examples:
  flash login -u ada                  Prompt for the password on stdin
  flash login -u ada -p hunter2       Pass the password directly")]
    Login {
        /// Username or email
        #[arg(long, short, value_parser = non_empty_string)]
        username: String,

        /// Password (read from stdin if omitted)
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Forget the stored session tokens
    Logout,

    /// Show the signed-in profile
    Whoami {
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// List cards due for review
    Due {
        /// Show at most this many cards
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Include the back of each card
        #[arg(long)]
        answers: bool,

        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Record a review; queued for later if the server is unreachable
    #[command(after_help = "\
Quality runs from 0 (blackout) to 5 (perfect recall).

Examples:
  flash review 42 4                   Card 42 recalled with some hesitation")]
    Review {
        /// Card ID
        card_id: i64,

        /// Recall quality, 0-5
        #[arg(value_parser = parse_quality)]
        quality: Quality,
    },

    /// Inspect or replay reviews waiting to be submitted
    Queue {
        #[command(subcommand)]
        command: QueueCommand,
    },

    /// Play a live duel against another learner
    #[command(after_help = "\
While in a duel, type:
  p <0-1>     Report your progress (e.g. p 0.5)
  r <emoji>   Send a reaction
  q           Leave the duel")]
    Duel,
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// Show queued reviews
    Status {
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },
    /// Submit queued reviews now
    Flush,
}

#[cfg(test)]
#[path = "../cli_tests.rs"]
mod tests;
