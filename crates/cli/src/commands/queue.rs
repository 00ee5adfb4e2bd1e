// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use super::Context;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::session::AuthState;

pub fn status(ctx: &Context, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let entries = ctx.queue()?.peek_all()?;

    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(out, "No reviews queued.")?;
        return Ok(());
    }
    for entry in &entries {
        writeln!(
            out,
            "card {:>6}  quality {}  queued {}",
            entry.card_id,
            entry.quality,
            entry.enqueued_at.format("%Y-%m-%d %H:%M UTC")
        )?;
    }
    writeln!(out, "\n{} review(s) queued", entries.len())?;
    Ok(())
}

pub async fn flush(ctx: &Context, out: &mut impl Write) -> Result<()> {
    ctx.require_signed_in()?;
    let report = ctx.queue()?.flush(&ctx.study()).await?;

    if report.submitted == 0 && report.remaining == 0 {
        writeln!(out, "Nothing to flush.")?;
        return Ok(());
    }
    writeln!(
        out,
        "Submitted {}, {} remaining.",
        report.submitted, report.remaining
    )?;
    if ctx.session.state() == AuthState::Expired {
        writeln!(out, "Session expired. Please log in again.")?;
    } else if report.stopped_early {
        writeln!(
            out,
            "Stopped at the first failed review; run again once the server is reachable."
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
