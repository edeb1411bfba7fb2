// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable storage for the session identifier.
//!
//! The session id is the only state the client keeps across restarts. It is
//! read once at bootstrap and written once when the server hands out a new
//! session.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use desk_core::SessionId;

use crate::error::{Error, Result};

const SESSION_FILE_NAME: &str = "session_id";

/// File-backed holder of the durable session id.
#[derive(Debug, Clone)]
pub struct SessionIdStore {
    path: PathBuf,
}

impl SessionIdStore {
    /// Store rooted in the given state directory.
    pub fn in_dir(state_dir: &Path) -> Self {
        SessionIdStore {
            path: state_dir.join(SESSION_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored id; `None` when nothing (or only whitespace) is stored.
    pub fn load(&self) -> Result<Option<SessionId>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(SessionId::new(content).ok()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::SessionStorage(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    pub fn save(&self, id: &SessionId) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::SessionStorage(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(&self.path, id.as_str()).map_err(|e| {
            Error::SessionStorage(format!("failed to write {}: {}", self.path.display(), e))
        })
    }

    /// Removes the stored id so the next bootstrap creates a fresh session.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::SessionStorage(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
#[path = "session_id_tests.rs"]
mod tests;
