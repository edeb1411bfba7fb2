// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod config;
pub mod device;
pub mod label;
pub mod order;
pub mod session;
pub mod shop;

use std::sync::Arc;

use desk_core::SessionState;

use crate::config::Config;
use crate::display;
use crate::error::Result;
use crate::session::DeskClient;

/// Resolves configuration and connects.
pub(crate) async fn connect() -> Result<DeskClient> {
    let config = Config::resolve()?;
    DeskClient::bootstrap(config).await
}

/// Prints the state a command left behind.
pub(crate) fn print_state(state: &Arc<SessionState>) {
    println!("{}", display::format_state(state, None));
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
