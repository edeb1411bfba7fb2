// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Push channel carrying server-broadcast session snapshots.
//!
//! The channel is receive-only from the client's side: every text frame is a
//! complete `SessionState`. The channel never reconnects on its own; the
//! supervisor owns that policy.

use std::future::Future;
use std::pin::Pin;
use std::sync::Once;
use std::time::Duration;

use desk_core::{parse_snapshot, SessionId, Verdict};

use super::store::SessionStore;

/// Error type for push channel operations.
///
/// These never reach application code; the supervisor turns them into
/// status transitions.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection closed unexpectedly.
    #[error("connection closed")]
    Closed,

    /// Receive failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

/// Result type for push channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Builds `<ws_url>/ws?session_id=<id>`.
pub fn push_url(ws_url: &str, session_id: &SessionId) -> ChannelResult<url::Url> {
    let mut url = url::Url::parse(ws_url)
        .map_err(|e| ChannelError::ConnectionFailed(format!("invalid ws url '{ws_url}': {e}")))?;
    let path = format!("{}/ws", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.query_pairs_mut()
        .clear()
        .append_pair("session_id", session_id.as_str());
    Ok(url)
}

/// Duplex-channel abstraction, used receive-only.
///
/// This trait abstracts over the actual socket, allowing
/// for easy testing with mock implementations.
pub trait PushChannel: Send {
    /// Open the channel.
    fn connect(&mut self, url: &str) -> Pin<Box<dyn Future<Output = ChannelResult<()>> + Send + '_>>;

    /// Close the channel.
    fn disconnect(&mut self) -> Pin<Box<dyn Future<Output = ChannelResult<()>> + Send + '_>>;

    /// Receive the next text frame.
    ///
    /// Returns `None` if the connection is closed.
    fn recv(&mut self) -> Pin<Box<dyn Future<Output = ChannelResult<Option<String>>> + Send + '_>>;

    /// Check if connected.
    fn is_connected(&self) -> bool;
}

/// Opens the channel unless it is already open.
///
/// Returns `true` when a new connection was made.
pub async fn ensure_open<C: PushChannel + ?Sized>(channel: &mut C, url: &str) -> ChannelResult<bool> {
    if channel.is_connected() {
        return Ok(false);
    }
    channel.connect(url).await?;
    Ok(true)
}

/// What became of one pushed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The snapshot replaced the store's state.
    Applied,
    /// The snapshot was well-formed but not fresher than the current one.
    Skipped(Verdict),
    /// The frame was not a valid snapshot and was dropped.
    Malformed,
}

/// Parses a pushed frame and offers it to the store.
///
/// Malformed frames are logged and dropped; they never touch the store.
pub fn handle_frame(store: &SessionStore, text: &str) -> FrameOutcome {
    match parse_snapshot(text) {
        Ok(snapshot) => match store.offer(snapshot) {
            Verdict::Fresh => FrameOutcome::Applied,
            verdict => FrameOutcome::Skipped(verdict),
        },
        Err(e) => {
            tracing::warn!(error = %e, "dropping malformed push frame");
            FrameOutcome::Malformed
        }
    }
}

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Bound on the TCP, TLS and WebSocket handshakes of one open attempt.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// rustls needs a process-wide crypto provider before the first `wss` open.
fn install_crypto_provider() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        // Err: a provider is already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// WebSocket channel implementation using tokio-tungstenite.
pub struct WebSocketChannel {
    /// The WebSocket connection, if connected.
    ws: Option<WsStream>,
    connect_timeout: Duration,
}

impl WebSocketChannel {
    /// Create a new, unopened WebSocket channel.
    pub fn new() -> Self {
        Self::with_connect_timeout(DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a channel whose open attempts give up after `connect_timeout`.
    pub fn with_connect_timeout(connect_timeout: Duration) -> Self {
        WebSocketChannel {
            ws: None,
            connect_timeout,
        }
    }
}

impl Default for WebSocketChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl PushChannel for WebSocketChannel {
    fn connect(&mut self, url: &str) -> Pin<Box<dyn Future<Output = ChannelResult<()>> + Send + '_>> {
        let url = url.to_string();
        Box::pin(async move {
            if url.starts_with("wss:") {
                install_crypto_provider();
            }
            let budget = self.connect_timeout;
            let (ws_stream, _) = tokio::time::timeout(budget, tokio_tungstenite::connect_async(&url))
                .await
                .map_err(|_| {
                    ChannelError::ConnectionFailed(format!("timed out after {}ms", budget.as_millis()))
                })?
                .map_err(|e| ChannelError::ConnectionFailed(e.to_string()))?;
            self.ws = Some(ws_stream);
            Ok(())
        })
    }

    fn disconnect(&mut self) -> Pin<Box<dyn Future<Output = ChannelResult<()>> + Send + '_>> {
        Box::pin(async move {
            if let Some(mut ws) = self.ws.take() {
                // Peer may already be gone; closing is best effort.
                let _ = ws.close(None).await;
            }
            Ok(())
        })
    }

    fn recv(&mut self) -> Pin<Box<dyn Future<Output = ChannelResult<Option<String>>> + Send + '_>> {
        Box::pin(async move {
            use futures_util::StreamExt;
            use tokio_tungstenite::tungstenite::Message;

            let ws = self.ws.as_mut().ok_or(ChannelError::Closed)?;

            loop {
                match ws.next().await {
                    Some(Ok(Message::Text(text))) => {
                        return Ok(Some(text.to_string()));
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        // Snapshots are UTF-8 JSON; let the parser reject anything else.
                        return Ok(Some(String::from_utf8_lossy(&bytes).into_owned()));
                    }
                    Some(Ok(Message::Close(_))) => {
                        self.ws = None;
                        return Ok(None);
                    }
                    Some(Ok(_)) => {
                        // Ping/pong and raw frames carry no state
                        continue;
                    }
                    Some(Err(e)) => {
                        self.ws = None;
                        return Err(ChannelError::ReceiveFailed(e.to_string()));
                    }
                    None => {
                        self.ws = None;
                        return Ok(None);
                    }
                }
            }
        })
    }

    fn is_connected(&self) -> bool {
        self.ws.is_some()
    }
}
