// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request/response transport to the desk server.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests for production
//! - Mock transports for unit testing
//!
//! Every request carries the session id header and is bounded by a fixed
//! timeout. Non-success statuses are failures carrying the status and raw
//! body; nothing is retried at this layer.

use std::future::Future;
use std::pin::Pin;
use std::sync::RwLock;
use std::time::Duration;

use desk_core::api_error::{alert_message, GENERIC_FAILURE};
use desk_core::SessionId;
use serde_json::Value;

/// Header carrying the session id on every request.
pub const SESSION_HEADER: &str = "X-Session-ID";

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("server returned {status}: {}", alert_message(.body, GENERIC_FAILURE))]
    Status { status: u16, body: String },

    /// The request did not complete within the fixed budget.
    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    /// The request never reached the server.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The route could not be joined onto the base URL.
    #[error("invalid route '{0}'")]
    InvalidRoute(String),
}

impl TransportError {
    /// Message suitable for an operator-facing alert.
    pub fn alert_message(&self) -> String {
        match self {
            TransportError::Status { body, .. } => alert_message(body, GENERIC_FAILURE),
            other => other.to_string(),
        }
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Whether a JSON body is sent with this method.
    pub fn has_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Media type the caller expects back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Expect {
    #[default]
    Json,
    /// Opaque binary, e.g. a rendered label preview.
    Blob,
}

/// A single request to the desk API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub route: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub expect: Expect,
}

impl ApiRequest {
    pub fn new(method: Method, route: impl Into<String>) -> Self {
        ApiRequest {
            method,
            route: route.into(),
            query: Vec::new(),
            body: None,
            expect: Expect::Json,
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn expect(mut self, expect: Expect) -> Self {
        self.expect = expect;
        self
    }

    /// Body actually sent: body-carrying methods default to `{}`.
    pub fn effective_body(&self) -> Option<Value> {
        if !self.method.has_body() {
            return None;
        }
        Some(self.body.clone().unwrap_or_else(|| Value::Object(Default::default())))
    }
}

/// Response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Blob(Vec<u8>),
}

impl Payload {
    pub fn into_json(self) -> TransportResult<Value> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Blob(_) => Err(TransportError::Decode("expected JSON, got binary".to_string())),
        }
    }

    pub fn into_blob(self) -> TransportResult<Vec<u8>> {
        match self {
            Payload::Blob(bytes) => Ok(bytes),
            Payload::Json(_) => Err(TransportError::Decode("expected binary, got JSON".to_string())),
        }
    }
}

/// Transport trait for request/response communication.
///
/// This trait abstracts over the actual HTTP client, allowing
/// for easy testing with mock implementations.
pub trait HttpTransport: Send + Sync {
    /// Sets the session id attached to subsequent requests.
    fn set_session_id(&self, id: Option<SessionId>);

    /// The session id currently attached to requests.
    fn session_id(&self) -> Option<SessionId>;

    /// Performs one request.
    fn send(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Payload>> + Send + '_>>;
}

/// HTTP transport implementation using reqwest.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: url::Url,
    timeout: Duration,
    session_id: RwLock<Option<SessionId>>,
}

impl ReqwestTransport {
    /// Create a transport against `base_url` with a fixed per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> TransportResult<Self> {
        let mut base = url::Url::parse(base_url)
            .map_err(|e| TransportError::InvalidRoute(format!("{base_url}: {e}")))?;
        // Url::join replaces the last segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        Ok(ReqwestTransport {
            client,
            base_url: base,
            timeout,
            session_id: RwLock::new(None),
        })
    }

    /// Resolves a route against the base URL.
    pub fn url_for(&self, route: &str) -> TransportResult<url::Url> {
        self.base_url
            .join(route.trim_start_matches('/'))
            .map_err(|_| TransportError::InvalidRoute(route.to_string()))
    }

    async fn perform(&self, request: ApiRequest) -> TransportResult<Payload> {
        let url = self.url_for(&request.route)?;
        let mut builder = self
            .client
            .request(request.method.as_reqwest(), url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(id) = self.session_id() {
            builder = builder.header(SESSION_HEADER, id.as_str());
        }
        if let Some(body) = request.effective_body() {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        match request.expect {
            Expect::Json => {
                let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| TransportError::Decode(e.to_string()))?;
                Ok(Payload::Json(value))
            }
            Expect::Blob => {
                let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
                Ok(Payload::Blob(bytes.to_vec()))
            }
        }
    }

    fn classify(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if e.is_decode() {
            TransportError::Decode(e.to_string())
        } else {
            TransportError::Connect(e.to_string())
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn set_session_id(&self, id: Option<SessionId>) {
        *self.session_id.write().unwrap_or_else(|e| e.into_inner()) = id;
    }

    fn session_id(&self) -> Option<SessionId> {
        self.session_id.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn send(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Payload>> + Send + '_>> {
        Box::pin(async move {
            tracing::debug!(method = ?request.method, route = %request.route, "request");
            match tokio::time::timeout(self.timeout, self.perform(request)).await {
                Ok(result) => result,
                Err(_) => Err(TransportError::Timeout(self.timeout)),
            }
        })
    }
}
