// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client bootstrap and reload.
//!
//! [`DeskClient`] wires the sync components together: it resumes the
//! session named by the durable id (or starts a new one), persists whatever
//! id the server hands back, and supervises the push channel for that
//! session. A reload tears the channel down and repeats the same steps.

use std::sync::Arc;

use desk_core::{SessionId, SessionState};
use tokio::sync::watch;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::session_id::SessionIdStore;
use crate::sync::{
    push_url, spawn_supervisor, ConnectionStatus, HttpTransport, MutationDispatcher, PushChannel,
    ReqwestTransport, SessionStore, SupervisorHandle, WebSocketChannel,
};

type Connector<C> = Box<dyn Fn() -> C + Send + Sync>;

/// A running desk client.
pub struct DeskClient<T: HttpTransport = ReqwestTransport, C: PushChannel = WebSocketChannel> {
    config: Config,
    ids: SessionIdStore,
    dispatcher: MutationDispatcher<T>,
    connector: Connector<C>,
    supervisor: Option<SupervisorHandle>,
}

impl DeskClient {
    /// Connects to the server named by `config`.
    pub async fn bootstrap(config: Config) -> Result<Self> {
        config.validate()?;
        let transport = Arc::new(ReqwestTransport::new(&config.api_url, config.request_timeout())?);
        let ids = SessionIdStore::in_dir(&config.state_dir());
        let connect_timeout = config.request_timeout();
        let connector = move || WebSocketChannel::with_connect_timeout(connect_timeout);
        DeskClient::start(config, transport, connector, ids).await
    }
}

impl<T, C> DeskClient<T, C>
where
    T: HttpTransport + 'static,
    C: PushChannel + 'static,
{
    /// Starts a client over the given transport; `connector` makes a fresh
    /// push channel for every (re)start.
    pub async fn start<F>(
        config: Config,
        transport: Arc<T>,
        connector: F,
        ids: SessionIdStore,
    ) -> Result<Self>
    where
        F: Fn() -> C + Send + Sync + 'static,
    {
        let store = SessionStore::new(config.freshness);
        let mut client = DeskClient {
            config,
            ids,
            dispatcher: MutationDispatcher::new(transport, store),
            connector: Box::new(connector),
            supervisor: None,
        };
        client.resume().await?;
        Ok(client)
    }

    async fn resume(&mut self) -> Result<()> {
        let stored = self.ids.load()?;
        let transport = self.dispatcher.transport();
        transport.set_session_id(stored.clone());

        let state = self.dispatcher.resume_session().await?;
        let id = state.id.clone();
        if stored.as_ref() != Some(&id) {
            self.ids.save(&id)?;
            tracing::info!(session = %id, path = %self.ids.path().display(), "new session stored");
        }
        transport.set_session_id(Some(id.clone()));

        let url = push_url(&self.config.ws_url, &id).map_err(|e| Error::Config(e.to_string()))?;
        tracing::info!(session = %id, commit = %state.commit_id, "session resumed");
        self.supervisor = Some(spawn_supervisor(
            (self.connector)(),
            self.dispatcher.store().clone(),
            self.config.supervisor(url.as_str()),
        ));
        Ok(())
    }

    /// Closes the push channel, waits the reload delay and starts over from
    /// the durable id.
    pub async fn reload(&mut self) -> Result<()> {
        tracing::info!("reloading session");
        self.close_channel().await;
        tokio::time::sleep(self.config.reload_delay()).await;
        self.resume().await
    }

    /// Ends the server-side session and forgets the durable id.
    pub async fn clear_session(&mut self) -> Result<Arc<SessionState>> {
        let state = self.dispatcher.clear_session().await?;
        self.close_channel().await;
        self.ids.clear()?;
        self.dispatcher.transport().set_session_id(None);
        tracing::info!("session cleared");
        Ok(state)
    }

    /// Closes the push channel and stops supervision.
    pub async fn shutdown(mut self) {
        self.close_channel().await;
    }

    async fn close_channel(&mut self) {
        if let Some(supervisor) = self.supervisor.take() {
            supervisor.close().await;
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dispatcher(&self) -> &MutationDispatcher<T> {
        &self.dispatcher
    }

    pub fn store(&self) -> &SessionStore {
        self.dispatcher.store()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.dispatcher.transport().session_id()
    }

    /// Current push connection status; `Establishing` when not supervising.
    pub fn status(&self) -> ConnectionStatus {
        self.supervisor
            .as_ref()
            .map(SupervisorHandle::status)
            .unwrap_or_default()
    }

    /// Observes push connection status changes.
    pub fn watch_status(&self) -> Option<watch::Receiver<ConnectionStatus>> {
        self.supervisor.as_ref().map(SupervisorHandle::watch)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
