// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Binary-level tests for the `desk` command.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `desk` isolated from the user's config and state.
fn desk(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("desk");
    cmd.env("DESK_CONFIG", dir.path().join("config.toml"))
        .env("DESK_STATE_DIR", dir.path().join("state"))
        .env_remove("DESK_API_URL")
        .env_remove("DESK_WS_URL")
        .env_remove("DESK_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &TempDir, content: &str) {
    std::fs::write(dir.path().join("config.toml"), content).unwrap();
}

#[test]
fn help_lists_quickstart() {
    let dir = TempDir::new().unwrap();
    desk(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Get started:"))
        .stdout(predicate::str::contains("watch"));
}

#[yare::parameterized(
    order = { "order" },
    label = { "label" },
    device = { "device" },
    shop = { "shop" },
)]
fn command_groups_require_subcommand(group: &str) {
    let dir = TempDir::new().unwrap();
    desk(&dir).arg(group).assert().failure();
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    desk(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url = \"http://localhost:8000\""))
        .stdout(predicate::str::contains("request_timeout_ms = 15000"));
}

#[test]
fn config_show_reads_file_and_env() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "api_url = \"https://desk.example.com\"\nfreshness = \"sequenced\"\n");
    desk(&dir)
        .env("DESK_WS_URL", "wss://push.example.com")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url = \"https://desk.example.com\""))
        .stdout(predicate::str::contains("ws_url = \"wss://push.example.com\""))
        .stdout(predicate::str::contains("freshness = \"sequenced\""));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "ws_url = \"http://localhost:8000\"\n");
    desk(&dir)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ws_url must use ws or wss"));
}

#[test]
fn unreachable_server_fails_with_message() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        "api_url = \"http://127.0.0.1:9\"\nws_url = \"ws://127.0.0.1:9\"\nrequest_timeout_ms = 2000\n",
    );
    desk(&dir)
        .args(["desk", "idle"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error:"));
    assert!(!dir.path().join("state").join("session_id").exists());
}

#[test]
fn order_set_requires_id() {
    let dir = TempDir::new().unwrap();
    desk(&dir)
        .args(["order", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
