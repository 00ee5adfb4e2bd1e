// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use flashrs::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    flashrs::init_logging(cli.verbose);
    if let Err(e) = flashrs::run(cli).await {
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }
}
