// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use deskrs::{Cli, Config};

fn main() {
    let cli = Cli::parse();

    let log_path = Config::resolve().ok().map(|c| c.log_path());
    deskrs::setup_logging(log_path.as_deref());

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = runtime.block_on(deskrs::run(cli.command)) {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {}", e.alert_message());
        std::process::exit(1);
    }
}
