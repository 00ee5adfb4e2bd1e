// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! flashrs - the library behind the `flash` study client.
//!
//! # Main Components
//!
//! - [`api`] - REST calls through an authenticated request pipeline
//! - [`session`] - token storage state and expiry notifications
//! - [`sync`] - review submission with an offline queue fallback
//! - [`duel`] - live duel session over a STOMP socket
//! - [`Config`] - client configuration
//! - [`Error`] - error type for all operations
//!
//! ```rust,ignore
//! use clap::Parser;
//!
//! let cli = flashrs::Cli::parse();
//! flashrs::init_logging(cli.verbose);
//! flashrs::run(cli).await?;
//! ```

mod cli;
mod commands;
mod env;
mod snapshot;

pub mod api;
pub mod config;
pub mod duel;
pub mod error;
pub mod secrets;
pub mod session;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat, QueueCommand};
pub use config::Config;
pub use error::{Error, Result};

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use commands::Context;

/// Installs the stderr log subscriber.
///
/// `verbose` forces `debug`; otherwise `FLASH_LOG` is used, falling back to `warn`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        env::log_filter()
            .and_then(|f| EnvFilter::try_new(f).ok())
            .unwrap_or_else(|| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute a CLI invocation. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let ctx = Context::open(config)?;
    let mut out = std::io::stdout();
    dispatch(&ctx, cli.command, &mut out).await
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let config = Config::load_or_default(&path)?;
    match &cli.base_url {
        Some(url) => config.with_base_url(url.as_str()),
        None => Ok(config),
    }
}

async fn dispatch(ctx: &Context, command: Command, out: &mut impl Write) -> Result<()> {
    tracing::debug!(base_url = %ctx.config.base_url, "dispatching command");
    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password().await?,
            };
            commands::auth::login(ctx, &username, &password, out).await
        }
        Command::Logout => commands::auth::logout(ctx, out),
        Command::Whoami { output } => commands::auth::whoami(ctx, output, out).await,
        Command::Due {
            limit,
            answers,
            output,
        } => commands::study::due(ctx, limit, answers, output, out).await,
        Command::Review { card_id, quality } => {
            commands::study::review(ctx, card_id, quality, out).await
        }
        Command::Queue { command } => match command {
            QueueCommand::Status { output } => commands::queue::status(ctx, output, out),
            QueueCommand::Flush => commands::queue::flush(ctx, out).await,
        },
        Command::Duel => {
            ctx.require_signed_in()?;
            let input = BufReader::new(tokio::io::stdin());
            commands::duel::run(&ctx.duel(), input, out).await
        }
    }
}

/// Reads a password line from stdin, prompting on stderr.
async fn read_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(Error::InvalidInput("password cannot be empty".to_string()));
    }
    Ok(password)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
