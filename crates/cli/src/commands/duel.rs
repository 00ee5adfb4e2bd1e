// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive duel loop: reads commands from input, prints state changes.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::duel::{DuelSession, DuelSnapshot, DuelState, Transport};
use crate::error::Result;

const USAGE: &str = "commands: p <0-1> progress, r <emoji> react, q quit";

/// One line of duel input.
#[derive(Debug, Clone, PartialEq)]
pub enum DuelInput {
    Progress(f64),
    React(String),
    Quit,
    Nothing,
}

/// Parses a line typed during a duel.
pub fn parse_input(line: &str) -> std::result::Result<DuelInput, String> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    match cmd {
        "" => Ok(DuelInput::Nothing),
        "q" | "quit" => Ok(DuelInput::Quit),
        "p" | "progress" => match arg.parse::<f64>() {
            Ok(value) if !value.is_nan() => Ok(DuelInput::Progress(value)),
            _ => Err(format!("'{}' is not a progress value between 0 and 1", arg)),
        },
        "r" | "react" if !arg.is_empty() => Ok(DuelInput::React(arg.to_string())),
        "r" | "react" => Err("nothing to react with".to_string()),
        _ => Err(format!("unknown command '{}'; {}", cmd, USAGE)),
    }
}

/// Lines describing what changed between two snapshots.
pub fn describe_changes(prev: &DuelSnapshot, next: &DuelSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    let opponent = next.opponent_name.as_deref().unwrap_or("opponent");

    if prev.state != next.state {
        match next.state {
            DuelState::Searching => lines.push("Searching for an opponent...".to_string()),
            DuelState::Matched => lines.push(format!("Matched against {}! Go.", opponent)),
            DuelState::Finished => lines.push(format!(
                "Duel over. Winner: {}",
                next.winner_name.as_deref().unwrap_or("unknown")
            )),
            DuelState::Idle => {}
        }
    }
    if next.state == DuelState::Matched || next.state == DuelState::Finished {
        if prev.my_progress != next.my_progress {
            lines.push(format!("{:<12} {}", "you", progress_bar(next.my_progress)));
        }
        if prev.opponent_progress != next.opponent_progress {
            lines.push(format!("{:<12} {}", opponent, progress_bar(next.opponent_progress)));
        }
    }
    if prev.reactions != next.reactions {
        if let Some(reaction) = next.reactions.back() {
            lines.push(format!("{} reacted: {}", opponent, reaction));
        }
    }
    if prev.connected && !next.connected {
        lines.push("Connection to the duel server lost.".to_string());
    }
    lines
}

/// `[#####-----]  50%`
pub fn progress_bar(value: f64) -> String {
    const WIDTH: usize = 20;
    let value = value.clamp(0.0, 1.0);
    let filled = (value * WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        (value * 100.0).round() as u32
    )
}

/// Runs a duel until the user quits, input ends, or Ctrl-C.
///
/// The duel is always disconnected on the way out.
pub async fn run<T, R>(duel: &DuelSession<T>, input: R, out: &mut impl Write) -> Result<()>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
{
    let mut updates = duel.subscribe();
    let mut last = duel.snapshot();

    duel.start_matchmaking().await?;
    writeln!(out, "Searching for an opponent... ({})", USAGE)?;
    last.state = DuelState::Searching;
    last.connected = true;

    let result = interact(duel, &mut updates, &mut last, input, &mut *out).await;
    duel.disconnect().await;
    writeln!(out, "Left the duel.")?;
    result
}

async fn interact<T, R>(
    duel: &DuelSession<T>,
    updates: &mut tokio::sync::watch::Receiver<DuelSnapshot>,
    last: &mut DuelSnapshot,
    input: R,
    out: &mut impl Write,
) -> Result<()>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        tokio::select! {
            // State changes print before the next input line is handled.
            biased;

            changed = updates.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let next = updates.borrow_and_update().clone();
                for line in describe_changes(last, &next) {
                    writeln!(out, "{}", line)?;
                }
                let lost = last.connected && !next.connected;
                *last = next;
                if lost {
                    return Ok(());
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                match parse_input(&line) {
                    Ok(DuelInput::Quit) => return Ok(()),
                    Ok(DuelInput::Nothing) => {}
                    Ok(DuelInput::Progress(value)) => {
                        if duel.state() != DuelState::Matched {
                            writeln!(out, "Progress counts once you are matched.")?;
                        } else if let Err(e) = duel.update_progress(value).await {
                            writeln!(out, "error: {}", e)?;
                        }
                    }
                    Ok(DuelInput::React(emoji)) => {
                        if let Err(e) = duel.send_reaction(&emoji).await {
                            writeln!(out, "error: {}", e)?;
                        }
                    }
                    Err(msg) => writeln!(out, "{}", msg)?,
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "duel_tests.rs"]
mod tests;
