// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session synchronization with the desk server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Dispatcher  │────►│  Transport  │────►│    Desk     │
//! │ (mutations) │◄────│   (trait)   │◄────│   Server    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Store    │◄────│ Supervisor  │◄────│ PushChannel │
//! │ (snapshots) │     │ (reconnect) │     │   (trait)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Mutation responses and pushed frames are both offered to the same store,
//! which keeps whichever snapshot its freshness policy accepts.

mod dispatcher;
mod push;
mod store;
mod supervisor;
mod transport;

pub use dispatcher::MutationDispatcher;
pub use push::{
    ensure_open, handle_frame, push_url, ChannelError, ChannelResult, FrameOutcome, PushChannel,
    WebSocketChannel,
};
pub use store::{SessionStore, SubscriptionId};
pub use supervisor::{
    spawn as spawn_supervisor, ConnectionStatus, StatusTracker, SupervisorConfig, SupervisorHandle,
};
pub use transport::{
    ApiRequest, Expect, HttpTransport, Method, Payload, ReqwestTransport, TransportError,
    TransportResult, SESSION_HEADER,
};

#[cfg(test)]
pub(crate) mod test_helpers;





#[cfg(test)]
mod supervisor_tests;
