// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api_url, "http://localhost:8000");
    assert_eq!(config.ws_url, "ws://localhost:8000");
    assert_eq!(config.request_timeout(), Duration::from_secs(15));
    assert_eq!(config.reload_delay(), Duration::from_millis(100));
    assert_eq!(config.freshness, Freshness::Distinct);
    config.validate().unwrap();
}

#[test]
fn test_missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load(&temp.path().join("nope.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        "api_url = \"https://desk.example.com\"\nfreshness = \"sequenced\"\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.api_url, "https://desk.example.com");
    assert_eq!(config.freshness, Freshness::Sequenced);
    assert_eq!(config.request_timeout_ms, 15_000);
}

#[test]
fn test_invalid_toml_is_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "api_url = [").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn test_serialized_config_loads_back() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    let config = Config {
        state_dir: Some(temp.path().join("state")),
        reconnect_max_delay_secs: 3,
        ..Config::default()
    };
    fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn test_overrides_take_precedence() {
    let mut config = Config::default();
    config.apply_overrides(EnvOverrides {
        api_url: Some("https://api.example.com".to_string()),
        ws_url: None,
        state_dir: Some(PathBuf::from("/tmp/desk-state")),
    });
    assert_eq!(config.api_url, "https://api.example.com");
    assert_eq!(config.ws_url, "ws://localhost:8000");
    assert_eq!(config.state_dir(), PathBuf::from("/tmp/desk-state"));
    assert_eq!(config.log_path(), PathBuf::from("/tmp/desk-state/desk.log"));
}

#[parameterized(
    api_ws_scheme = { "ws://localhost:8000", "ws://localhost:8000", 15_000 },
    ws_http_scheme = { "http://localhost:8000", "http://localhost:8000", 15_000 },
    api_garbage = { "not a url", "ws://localhost:8000", 15_000 },
    zero_timeout = { "http://localhost:8000", "wss://desk.example.com", 0 },
)]
fn test_validate_rejects(api_url: &str, ws_url: &str, timeout: u64) {
    let config = Config {
        api_url: api_url.to_string(),
        ws_url: ws_url.to_string(),
        request_timeout_ms: timeout,
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_supervisor_settings_follow_config() {
    let config = Config {
        reconnect_initial_delay_ms: 250,
        reconnect_max_delay_secs: 4,
        ..Config::default()
    };
    let supervisor = config.supervisor("ws://localhost:8000/ws?session_id=s1");
    assert_eq!(supervisor.url, "ws://localhost:8000/ws?session_id=s1");
    assert_eq!(supervisor.initial_delay, Duration::from_millis(250));
    assert_eq!(supervisor.max_delay, Duration::from_secs(4));
}

#[test]
fn test_supervisor_cap_never_below_initial_delay() {
    let config = Config {
        reconnect_initial_delay_ms: 3000,
        reconnect_max_delay_secs: 1,
        ..Config::default()
    };
    assert_eq!(config.supervisor("ws://x").max_delay, Duration::from_millis(3000));
}
