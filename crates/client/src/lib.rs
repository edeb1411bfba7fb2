// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! deskrs - client library for the registration desk server.
//!
//! Keeps a live, validated copy of this desk's session and issues the
//! commands that change it.
//!
//! # Main Components
//!
//! - [`DeskClient`] - bootstrap, reload and teardown of a desk session
//! - [`sync`] - transport, push channel, session store, mutation dispatcher
//!   and reconnection supervisor
//! - [`Config`] - endpoints, timeouts and freshness policy
//! - [`Error`] - error types for all operations
//!
//! ```rust,ignore
//! use deskrs::{Config, DeskClient};
//! use desk_core::DeskStatus;
//!
//! let client = DeskClient::bootstrap(Config::resolve()?).await?;
//! client.store().subscribe(|state| println!("{}", state.desk_status));
//! client.dispatcher().set_desk_status(DeskStatus::Idle).await?;
//! ```

mod cli;
mod commands;
mod display;
mod env;
mod logging;

pub mod config;
pub mod error;
pub mod session;
pub mod session_id;
pub mod sync;

pub use cli::{
    Cli, Command, ConfigCommand, DeskStatusArg, DeviceCommand, LabelCommand, OrderCommand,
    PrinterCommand, PrinterModeArg, ReaderCommand, SessionCommand, ShopCommand,
};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::setup_logging;
pub use session::DeskClient;
pub use session_id::SessionIdStore;

/// Execute a CLI command.
pub async fn run(command: Command) -> Result<()> {
    match command {
        Command::Watch => commands::session::watch().await,
        Command::Show => commands::session::show().await,
        Command::Desk { status } => commands::session::set_desk_status(status.into()).await,
        Command::Order(cmd) => commands::order::run(cmd).await,
        Command::Label(cmd) => commands::label::run(cmd).await,
        Command::Device(cmd) => commands::device::run(cmd).await,
        Command::Shop(cmd) => commands::shop::run(cmd).await,
        Command::Session(SessionCommand::Clear) => commands::session::clear().await,
        Command::Config(cmd) => commands::config::run(cmd),
    }
}
