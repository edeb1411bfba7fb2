// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the client are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `DESK_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(vars::DESK_CONFIG).ok().map(PathBuf::from)
}

/// Returns the value of `DESK_API_URL` if set.
pub fn api_url() -> Option<String> {
    std::env::var(vars::DESK_API_URL).ok()
}

/// Returns the value of `DESK_WS_URL` if set.
pub fn ws_url() -> Option<String> {
    std::env::var(vars::DESK_WS_URL).ok()
}

/// Returns the value of `DESK_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    std::env::var(vars::DESK_STATE_DIR).ok().map(PathBuf::from)
}

/// Returns the value of `XDG_STATE_HOME` if set.
pub fn xdg_state_home() -> Option<PathBuf> {
    std::env::var(vars::XDG_STATE_HOME).ok().map(PathBuf::from)
}

/// Returns the log filter directive from `DESK_LOG`, if set.
pub fn log_filter() -> Option<String> {
    std::env::var(vars::DESK_LOG).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
