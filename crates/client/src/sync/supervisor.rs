// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Push channel supervision.
//!
//! A background task opens the push channel, feeds every frame to the store
//! and classifies disconnects. Failures before the first successful open are
//! routine (the server may still be starting) and are retried with
//! exponential backoff. A close after the channel was up means the session
//! lost its live feed; the task publishes [`ConnectionStatus::Lost`] and stops
//! until the client is reloaded.

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::push::{ensure_open, handle_frame, ChannelResult, PushChannel};
use super::store::SessionStore;

/// Connection status shown to the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No connection has succeeded yet.
    #[default]
    Establishing,
    Connected,
    /// The channel dropped after being connected; a reload is required.
    Lost,
}

impl ConnectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionStatus::Establishing => "establishing",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Lost => "lost",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disconnect classification, independent of any I/O.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTracker {
    status: ConnectionStatus,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// The channel opened.
    pub fn on_open(&mut self) -> ConnectionStatus {
        if self.status == ConnectionStatus::Establishing {
            self.status = ConnectionStatus::Connected;
        }
        self.status
    }

    /// The channel closed or failed.
    pub fn on_close(&mut self) -> ConnectionStatus {
        if self.status == ConnectionStatus::Connected {
            self.status = ConnectionStatus::Lost;
        }
        self.status
    }
}

/// Configuration for the supervisor.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Push URL including the session query.
    pub url: String,
    /// Initial delay for exponential backoff.
    pub initial_delay: Duration,
    /// Maximum delay between attempts.
    pub max_delay: Duration,
}

impl SupervisorConfig {
    pub fn new(url: impl Into<String>) -> Self {
        SupervisorConfig {
            url: url.into(),
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

/// Handle to a running supervisor task.
pub struct SupervisorHandle {
    status: watch::Receiver<ConnectionStatus>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SupervisorHandle {
    pub fn status(&self) -> ConnectionStatus {
        *self.status.borrow()
    }

    /// A receiver that observes every status change.
    pub fn watch(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.clone()
    }

    /// Whether the task has stopped, either after a loss or a close.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Closes the channel and waits for the task to exit.
    pub async fn close(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "supervisor task ended abnormally");
        }
    }
}

/// Starts supervising `channel` in a background task.
pub fn spawn<C>(channel: C, store: SessionStore, config: SupervisorConfig) -> SupervisorHandle
where
    C: PushChannel + 'static,
{
    let (status_tx, status_rx) = watch::channel(ConnectionStatus::Establishing);
    let cancel = CancellationToken::new();
    let task = tokio::spawn(run(channel, store, config, status_tx, cancel.clone()));
    SupervisorHandle {
        status: status_rx,
        cancel,
        task,
    }
}

enum Event {
    Cancelled,
    Frame(ChannelResult<Option<String>>),
}

async fn run<C: PushChannel>(
    mut channel: C,
    store: SessionStore,
    config: SupervisorConfig,
    status_tx: watch::Sender<ConnectionStatus>,
    cancel: CancellationToken,
) {
    let mut tracker = StatusTracker::new();
    let mut delay = config.initial_delay;

    'supervise: loop {
        if cancel.is_cancelled() {
            break;
        }

        let opened = tokio::select! {
            _ = cancel.cancelled() => break,
            result = ensure_open(&mut channel, &config.url) => result,
        };

        match opened {
            Ok(_) => {
                status_tx.send_replace(tracker.on_open());
                tracing::info!(url = %config.url, "push channel open");
                delay = config.initial_delay;

                loop {
                    let event = tokio::select! {
                        _ = cancel.cancelled() => Event::Cancelled,
                        frame = channel.recv() => Event::Frame(frame),
                    };
                    match event {
                        Event::Cancelled => break 'supervise,
                        Event::Frame(Ok(Some(text))) => {
                            let outcome = handle_frame(&store, &text);
                            tracing::trace!(?outcome, "push frame");
                        }
                        Event::Frame(Ok(None)) => {
                            tracing::debug!("push channel closed by peer");
                            break;
                        }
                        Event::Frame(Err(e)) => {
                            tracing::debug!(error = %e, "push channel failed");
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "push channel open failed");
            }
        }

        let status = tracker.on_close();
        status_tx.send_replace(status);
        if status == ConnectionStatus::Lost {
            tracing::warn!("push channel lost; reload required");
            break;
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
        delay = std::cmp::min(delay.saturating_mul(2), config.max_delay);
    }

    if let Err(e) = channel.disconnect().await {
        tracing::debug!(error = %e, "push channel close failed");
    }
}
