// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::sync::push_tests::MockChannel;
use crate::sync::test_helpers::state_json;
use crate::sync::transport_tests::MockTransport;
use crate::sync::{Method, TransportError};
use desk_core::Freshness;
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    ids: SessionIdStore,
    transport: Arc<MockTransport>,
    channel: MockChannel,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let ids = SessionIdStore::in_dir(dir.path());
        Harness {
            _dir: dir,
            ids,
            transport: Arc::new(MockTransport::new()),
            channel: MockChannel::new(),
        }
    }

    async fn start(&self) -> Result<DeskClient<MockTransport, MockChannel>> {
        self.start_with(Config::default()).await
    }

    async fn start_with(&self, config: Config) -> Result<DeskClient<MockTransport, MockChannel>> {
        let channel = self.channel.clone();
        DeskClient::start(
            config,
            Arc::clone(&self.transport),
            move || channel.clone(),
            self.ids.clone(),
        )
        .await
    }
}

async fn wait_connected<T: HttpTransport + 'static>(client: &DeskClient<T, MockChannel>) {
    client
        .watch_status()
        .unwrap()
        .wait_for(|s| *s == ConnectionStatus::Connected)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_first_start_creates_and_stores_session() {
    let harness = Harness::new();
    harness.transport.respond_json(state_json("s1", "c0", "closed"));

    let client = harness.start().await.unwrap();
    wait_connected(&client).await;

    assert_eq!(client.store().commit_id().as_str(), "c0");
    assert_eq!(client.session_id().unwrap().as_str(), "s1");
    assert_eq!(harness.ids.load().unwrap().unwrap().as_str(), "s1");
    assert_eq!(
        harness.channel.connects(),
        vec!["ws://localhost:8000/ws?session_id=s1".to_string()]
    );

    let requests = harness.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].request.method, Method::Post);
    assert_eq!(requests[0].request.route, "session");
    assert!(requests[0].session_id.is_none());

    client.shutdown().await;
}

#[tokio::test]
async fn test_start_resumes_stored_session() {
    let harness = Harness::new();
    harness.ids.save(&SessionId::new("s9").unwrap()).unwrap();
    harness.transport.respond_json(state_json("s9", "c4", "idle"));

    let client = harness.start().await.unwrap();

    let requests = harness.transport.requests();
    assert_eq!(requests[0].session_id.as_ref().unwrap().as_str(), "s9");
    assert_eq!(client.store().current().desk_status, desk_core::DeskStatus::Idle);
    client.shutdown().await;
}

#[tokio::test]
async fn test_replaced_session_id_is_persisted() {
    let harness = Harness::new();
    harness.ids.save(&SessionId::new("expired").unwrap()).unwrap();
    harness.transport.respond_json(state_json("s2", "c0", "closed"));

    let client = harness.start().await.unwrap();

    assert_eq!(harness.ids.load().unwrap().unwrap().as_str(), "s2");
    assert_eq!(client.session_id().unwrap().as_str(), "s2");
    client.shutdown().await;
}

#[tokio::test]
async fn test_failed_resume_stores_nothing() {
    let harness = Harness::new();
    harness.transport.respond_err(TransportError::Status {
        status: 503,
        body: "warming up".to_string(),
    });

    let result = harness.start().await;

    assert!(matches!(result, Err(Error::Transport(_))));
    assert!(harness.ids.load().unwrap().is_none());
    assert!(harness.channel.connects().is_empty());
}

#[tokio::test]
async fn test_reload_reopens_channel_from_durable_id() {
    let harness = Harness::new();
    harness.transport.respond_json(state_json("s1", "c0", "closed"));
    let mut client = harness.start().await.unwrap();
    wait_connected(&client).await;

    harness.transport.respond_json(state_json("s1", "c3", "idle"));
    client.reload().await.unwrap();
    wait_connected(&client).await;

    assert_eq!(harness.channel.disconnects(), 1);
    assert_eq!(harness.channel.connects().len(), 2);
    let requests = harness.transport.requests();
    assert_eq!(requests[1].session_id.as_ref().unwrap().as_str(), "s1");
    assert_eq!(client.store().commit_id().as_str(), "c3");
    client.shutdown().await;
}

#[tokio::test]
async fn test_reload_into_new_session_with_lower_sequence() {
    let harness = Harness::new();
    let config = Config {
        freshness: Freshness::Sequenced,
        ..Config::default()
    };
    harness.transport.respond_json(state_json("s1", "5", "idle"));
    let mut client = harness.start_with(config).await.unwrap();
    wait_connected(&client).await;

    harness.transport.respond_json(state_json("s2", "1", "closed"));
    client.reload().await.unwrap();
    wait_connected(&client).await;

    let current = client.store().current();
    assert_eq!(current.id.as_str(), "s2");
    assert_eq!(current.commit_id.as_str(), "1");
    assert_eq!(client.session_id().unwrap().as_str(), "s2");
    assert_eq!(harness.ids.load().unwrap().unwrap().as_str(), "s2");
    assert_eq!(
        harness.channel.connects().last().unwrap(),
        "ws://localhost:8000/ws?session_id=s2"
    );
    client.shutdown().await;
}

#[tokio::test]
async fn test_clear_session_forgets_durable_id() {
    let harness = Harness::new();
    harness.transport.respond_json(state_json("s1", "c0", "closed"));
    let mut client = harness.start().await.unwrap();
    harness.transport.respond_json(serde_json::json!({}));

    client.clear_session().await.unwrap();

    assert!(harness.ids.load().unwrap().is_none());
    assert!(client.session_id().is_none());
    assert_eq!(client.status(), ConnectionStatus::Establishing);
    assert_eq!(harness.transport.last_request().route, "session");
}
