// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for push channel supervision.

#![allow(clippy::unwrap_used)]

use super::push_tests::{Incoming, MockChannel};
use super::store::SessionStore;
use super::supervisor::{spawn, ConnectionStatus, StatusTracker, SupervisorConfig};
use super::test_helpers::state_json;
use desk_core::Freshness;
use std::time::Duration;
use yare::parameterized;

const URL: &str = "ws://desk.test/ws?session_id=s1";

#[derive(Debug, Clone, Copy)]
enum Event {
    Open,
    Close,
}

#[parameterized(
    initial = { &[], ConnectionStatus::Establishing },
    failures_before_first_open = { &[Event::Close, Event::Close, Event::Close], ConnectionStatus::Establishing },
    opened = { &[Event::Close, Event::Open], ConnectionStatus::Connected },
    closed_after_open = { &[Event::Open, Event::Close], ConnectionStatus::Lost },
    lost_is_sticky = { &[Event::Open, Event::Close, Event::Open], ConnectionStatus::Lost },
    lost_survives_more_closes = { &[Event::Open, Event::Close, Event::Close], ConnectionStatus::Lost },
)]
fn test_status_tracker(events: &[Event], expected: ConnectionStatus) {
    let mut tracker = StatusTracker::new();
    for event in events {
        match event {
            Event::Open => tracker.on_open(),
            Event::Close => tracker.on_close(),
        };
    }
    assert_eq!(tracker.status(), expected);
}

#[test]
fn test_status_display() {
    assert_eq!(ConnectionStatus::Establishing.to_string(), "establishing");
    assert_eq!(ConnectionStatus::Connected.to_string(), "connected");
    assert_eq!(ConnectionStatus::Lost.to_string(), "lost");
}

fn config() -> SupervisorConfig {
    SupervisorConfig {
        url: URL.to_string(),
        initial_delay: Duration::from_millis(100),
        max_delay: Duration::from_secs(1),
    }
}

#[tokio::test(start_paused = true)]
async fn test_retries_until_first_connection() {
    let channel = MockChannel::new();
    channel.fail_connects(4);
    let store = SessionStore::new(Freshness::Distinct);

    let handle = spawn(channel.clone(), store, config());
    let mut status = handle.watch();
    let seen = status
        .wait_for(|s| *s != ConnectionStatus::Establishing)
        .await
        .map(|s| *s)
        .unwrap();

    assert_eq!(seen, ConnectionStatus::Connected);
    assert_eq!(channel.connects().len(), 5);
    assert!(channel.connects().iter().all(|u| u == URL));
    handle.close().await;
}

#[tokio::test(start_paused = true)]
async fn test_backoff_is_capped() {
    let channel = MockChannel::new();
    channel.fail_connects(8);
    let store = SessionStore::new(Freshness::Distinct);
    let started = tokio::time::Instant::now();

    let handle = spawn(channel.clone(), store, config());
    handle
        .watch()
        .wait_for(|s| *s == ConnectionStatus::Connected)
        .await
        .unwrap();

    // 100 + 200 + 400 + 800 + 1000 * 4 ms
    assert_eq!(started.elapsed(), Duration::from_millis(5500));
    handle.close().await;
}

#[tokio::test(start_paused = true)]
async fn test_frames_reach_store_and_loss_is_terminal() {
    let channel = MockChannel::new();
    channel.queue_text(state_json("s1", "c1", "idle").to_string());
    channel.queue_text("garbage");
    channel.queue_text(state_json("s1", "c2", "closed").to_string());
    channel.queue(Incoming::Closed);
    let store = SessionStore::new(Freshness::Distinct);

    let handle = spawn(channel.clone(), store.clone(), config());
    handle
        .watch()
        .wait_for(|s| *s == ConnectionStatus::Lost)
        .await
        .unwrap();

    assert_eq!(store.commit_id().as_str(), "c2");

    // Nothing reconnects after a loss.
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(handle.is_finished());
    assert_eq!(handle.status(), ConnectionStatus::Lost);
    assert_eq!(channel.connects().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_socket_error_after_connect_is_loss() {
    let channel = MockChannel::new();
    channel.queue(Incoming::Error);
    let store = SessionStore::new(Freshness::Distinct);

    let handle = spawn(channel.clone(), store, config());
    let status = handle
        .watch()
        .wait_for(|s| *s != ConnectionStatus::Establishing && *s != ConnectionStatus::Connected)
        .await
        .map(|s| *s)
        .unwrap();

    assert_eq!(status, ConnectionStatus::Lost);
}

#[tokio::test(start_paused = true)]
async fn test_close_disconnects_open_channel() {
    let channel = MockChannel::new();
    let store = SessionStore::new(Freshness::Distinct);

    let handle = spawn(channel.clone(), store, config());
    handle
        .watch()
        .wait_for(|s| *s == ConnectionStatus::Connected)
        .await
        .unwrap();
    handle.close().await;

    assert!(!super::PushChannel::is_connected(&channel));
    assert_eq!(channel.disconnects(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_close_while_establishing_stops_retrying() {
    let channel = MockChannel::new();
    channel.fail_connects(100);
    let store = SessionStore::new(Freshness::Distinct);

    let handle = spawn(channel.clone(), store, config());
    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(handle.status(), ConnectionStatus::Establishing);
    handle.close().await;

    let attempts = channel.connects().len();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(channel.connects().len(), attempts);
}
