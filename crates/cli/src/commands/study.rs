// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use flash_core::{DueCard, Quality};
use tracing::info;

use super::Context;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::sync::ReviewOutcome;

pub async fn due(
    ctx: &Context,
    limit: Option<usize>,
    answers: bool,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    ctx.require_signed_in()?;
    let mut cards = ctx.study().due_cards().await?;
    let total = cards.len();
    if let Some(limit) = limit {
        cards.truncate(limit);
    }

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&cards)?)?,
        OutputFormat::Text => write_cards(&cards, total, answers, out)?,
    }
    Ok(())
}

fn write_cards(
    cards: &[DueCard],
    total: usize,
    answers: bool,
    out: &mut impl Write,
) -> std::io::Result<()> {
    if cards.is_empty() {
        return writeln!(out, "Nothing due.");
    }
    for card in cards {
        writeln!(out, "{:>6}  {}", card.id, card.front_text)?;
        if answers {
            writeln!(out, "        = {}", card.back_text)?;
            if let Some(mnemonic) = &card.ai_mnemonic {
                writeln!(out, "        mnemonic: {}", mnemonic)?;
            }
        }
    }
    if cards.len() < total {
        writeln!(out, "\n{} of {} due card(s) shown", cards.len(), total)
    } else {
        writeln!(out, "\n{} card(s) due", total)
    }
}

/// Records a review, queueing it when it cannot be sent.
pub async fn review(
    ctx: &Context,
    card_id: i64,
    quality: Quality,
    out: &mut impl Write,
) -> Result<()> {
    let sync = ctx.study_sync()?;

    if ctx.require_signed_in().is_err() {
        sync.queue().enqueue(card_id, quality)?;
        info!(card_id, "not signed in, review queued without submitting");
        writeln!(out, "Not signed in; review for card {} queued.", card_id)?;
        return Ok(());
    }

    match sync.record_review(card_id, quality).await? {
        ReviewOutcome::Submitted => {
            writeln!(out, "Recorded quality {} for card {}.", quality, card_id)?;
        }
        ReviewOutcome::Queued(err) => {
            writeln!(out, "Could not submit: {}", err.user_message())?;
            writeln!(
                out,
                "Review for card {} queued; it will be sent on the next flush.",
                card_id
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "study_tests.rs"]
mod tests;
