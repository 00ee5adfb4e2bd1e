// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use flash_core::TokenResponse;

use super::Context;
use crate::cli::OutputFormat;
use crate::error::Result;

/// Signs in, then replays any reviews queued while signed out.
pub async fn login(
    ctx: &Context,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<()> {
    let profile = ctx.auth().login(username, password).await?;
    let name = profile
        .display_name
        .as_deref()
        .or(profile.username.as_deref())
        .unwrap_or(username);
    writeln!(out, "Signed in as {}.", name)?;

    let queue = ctx.queue()?;
    if !queue.is_empty()? {
        let report = queue.flush(&ctx.study()).await?;
        if report.submitted > 0 {
            writeln!(out, "Submitted {} queued review(s).", report.submitted)?;
        }
        if report.remaining > 0 {
            writeln!(out, "{} review(s) still queued.", report.remaining)?;
        }
    }
    Ok(())
}

pub fn logout(ctx: &Context, out: &mut impl Write) -> Result<()> {
    ctx.session.logout()?;
    writeln!(out, "Signed out.")?;
    Ok(())
}

pub async fn whoami(ctx: &Context, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    ctx.require_signed_in()?;
    let profile = TokenResponse {
        token: None,
        refresh_token: None,
        ..ctx.auth().profile().await?
    };

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&profile)?)?,
        OutputFormat::Text => write_profile(&profile, out)?,
    }
    Ok(())
}

fn write_profile(profile: &TokenResponse, out: &mut impl Write) -> std::io::Result<()> {
    let username = profile.username.as_deref().unwrap_or("?");
    match profile.display_name.as_deref() {
        Some(display) if display != username => writeln!(out, "{} ({})", display, username)?,
        _ => writeln!(out, "{}", username)?,
    }
    if let Some(email) = &profile.email {
        writeln!(out, "email:  {}", email)?;
    }
    if let Some(total) = profile.total_xp {
        match profile.weekly_xp {
            Some(weekly) => writeln!(out, "xp:     {} ({} this week)", total, weekly)?,
            None => writeln!(out, "xp:     {}", total)?,
        }
    }
    if let Some(days) = profile.streak_days {
        writeln!(out, "streak: {} day(s)", days)?;
    }
    if let Some(coins) = profile.coins {
        writeln!(out, "coins:  {}", coins)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
