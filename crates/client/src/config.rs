// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration management.
//!
//! Configuration is stored in `$XDG_CONFIG_HOME/desk/config.toml` (or the
//! file named by `DESK_CONFIG`) and includes:
//! - `api_url` / `ws_url`: request/response and push endpoints of the desk server
//! - request timeout, reconnect backoff and reload delay
//! - `freshness`: how snapshot commit ids are compared
//!
//! A missing file yields the defaults. `DESK_API_URL`, `DESK_WS_URL` and
//! `DESK_STATE_DIR` override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use desk_core::Freshness;

use crate::env;
use crate::error::{Error, Result};
use crate::sync::SupervisorConfig;

const CONFIG_DIR_NAME: &str = "desk";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "desk.log";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the request/response API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base URL of the push endpoint; `/ws` is appended.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Fixed client-side timeout for every request (default: 15000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// First reopen delay while the push channel is still establishing (default: 500).
    #[serde(default = "default_reconnect_initial_delay_ms")]
    pub reconnect_initial_delay_ms: u64,
    /// Maximum delay between reopen attempts in seconds (default: 10).
    #[serde(default = "default_reconnect_max_delay_secs")]
    pub reconnect_max_delay_secs: u64,
    /// Delay before a reload after an unrecoverable failure (default: 100).
    #[serde(default = "default_reload_delay_ms")]
    pub reload_delay_ms: u64,
    /// Commit id comparison policy (default: distinct).
    #[serde(default)]
    pub freshness: Freshness,
    /// Directory for the durable session id and the log file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_ws_url() -> String {
    "ws://localhost:8000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    15_000
}

fn default_reconnect_initial_delay_ms() -> u64 {
    500
}

fn default_reconnect_max_delay_secs() -> u64 {
    10
}

fn default_reload_delay_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            ws_url: default_ws_url(),
            request_timeout_ms: default_request_timeout_ms(),
            reconnect_initial_delay_ms: default_reconnect_initial_delay_ms(),
            reconnect_max_delay_secs: default_reconnect_max_delay_secs(),
            reload_delay_ms: default_reload_delay_ms(),
            freshness: Freshness::default(),
            state_dir: None,
        }
    }
}

/// Values taken from the environment that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub api_url: Option<String>,
    pub ws_url: Option<String>,
    pub state_dir: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        EnvOverrides {
            api_url: env::api_url(),
            ws_url: env::ws_url(),
            state_dir: env::state_dir(),
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> PathBuf {
        if let Some(path) = env::config_path() {
            return path;
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Loads the config from `path`, returning defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Loads from the default path, applies environment overrides and validates.
    pub fn resolve() -> Result<Self> {
        let mut config = Config::load(&Config::default_path())?;
        config.apply_overrides(EnvOverrides::from_env());
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: EnvOverrides) {
        if let Some(url) = overrides.api_url {
            self.api_url = url;
        }
        if let Some(url) = overrides.ws_url {
            self.ws_url = url;
        }
        if let Some(dir) = overrides.state_dir {
            self.state_dir = Some(dir);
        }
    }

    /// Validates URL schemes and timing values.
    pub fn validate(&self) -> Result<()> {
        let api = url::Url::parse(&self.api_url)
            .map_err(|e| Error::Config(format!("invalid api_url '{}': {}", self.api_url, e)))?;
        if !matches!(api.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "api_url must use http or https: '{}'",
                self.api_url
            )));
        }
        let ws = url::Url::parse(&self.ws_url)
            .map_err(|e| Error::Config(format!("invalid ws_url '{}': {}", self.ws_url, e)))?;
        if !matches!(ws.scheme(), "ws" | "wss") {
            return Err(Error::Config(format!(
                "ws_url must use ws or wss: '{}'",
                self.ws_url
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::Config("request_timeout_ms must be greater than 0".to_string()));
        }
        if self.reconnect_initial_delay_ms == 0 {
            return Err(Error::Config(
                "reconnect_initial_delay_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    /// Supervisor settings for the push channel at `url`.
    pub fn supervisor(&self, url: impl Into<String>) -> SupervisorConfig {
        let initial_delay = Duration::from_millis(self.reconnect_initial_delay_ms);
        SupervisorConfig {
            url: url.into(),
            initial_delay,
            max_delay: Duration::from_secs(self.reconnect_max_delay_secs).max(initial_delay),
        }
    }

    /// Resolved state directory.
    ///
    /// Precedence: configured `state_dir`, `$XDG_STATE_HOME/desk`,
    /// `~/.local/state/desk`.
    pub fn state_dir(&self) -> PathBuf {
        if let Some(dir) = &self.state_dir {
            return dir.clone();
        }
        if let Some(dir) = env::xdg_state_home() {
            return dir.join(CONFIG_DIR_NAME);
        }
        dirs::home_dir()
            .map(|h| h.join(".local/state").join(CONFIG_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(".local/state").join(CONFIG_DIR_NAME))
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir().join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
