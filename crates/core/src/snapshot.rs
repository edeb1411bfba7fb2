// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing of pushed snapshot frames.

use crate::state::SessionState;

/// A pushed frame that could not be turned into a valid [`SessionState`].
#[derive(Debug, thiserror::Error)]
pub enum MalformedSnapshot {
    #[error("snapshot is not a session state: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("snapshot rejected: {0}")]
    Invalid(String),
}

/// Parses and validates a UTF-8 JSON snapshot.
pub fn parse_snapshot(text: &str) -> Result<SessionState, MalformedSnapshot> {
    let state: SessionState = serde_json::from_str(text)?;
    checked(state)
}

/// Validates an already-decoded JSON value as a snapshot.
pub fn snapshot_from_value(value: serde_json::Value) -> Result<SessionState, MalformedSnapshot> {
    let state: SessionState = serde_json::from_value(value)?;
    checked(state)
}

fn checked(state: SessionState) -> Result<SessionState, MalformedSnapshot> {
    state
        .validate()
        .map_err(|e| MalformedSnapshot::Invalid(e.to_string()))?;
    Ok(state)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
