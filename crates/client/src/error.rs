// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::TransportError;

/// All errors surfaced to callers of the desk client.
///
/// Push channel failures and malformed snapshots never appear here; they
/// only show up as connection status changes or log lines.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Command(#[from] desk_core::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("session storage error: {0}\n  hint: check that the state directory is writable")]
    SessionStorage(String),

    #[error("no session established\n  hint: the client must resume a session before issuing requests")]
    NoSession,

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Message suitable for a blocking error dialog.
    pub fn alert_message(&self) -> String {
        match self {
            Error::Transport(e) => e.alert_message(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for desk client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
