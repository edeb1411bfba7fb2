// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structured error payloads returned by the desk server.
//!
//! Failed requests carry a body of the form
//! `{"type": "...", "errors": [{"code": "...", "detail": "...", "attr": "..."}]}`.
//! The first entry's `detail` is the message shown to the operator.

use serde::{Deserialize, Serialize};

/// Message shown when a failure body carries nothing readable.
pub const GENERIC_FAILURE: &str = "request failed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub errors: Vec<ApiErrorDetail>,
}

impl ApiErrorPayload {
    /// Parses a response body, requiring at least one error entry.
    pub fn parse(body: &str) -> Option<Self> {
        let payload: ApiErrorPayload = serde_json::from_str(body).ok()?;
        if payload.errors.is_empty() {
            return None;
        }
        Some(payload)
    }

    pub fn first_detail(&self) -> Option<&str> {
        self.errors.first().map(|e| e.detail.as_str())
    }
}

/// Picks the operator-facing message for a failed response body.
///
/// Preference order: the structured payload's first `detail`, then a
/// top-level `message` or `detail` string, then `fallback`.
pub fn alert_message(body: &str, fallback: &str) -> String {
    if let Some(detail) = ApiErrorPayload::parse(body).as_ref().and_then(|p| p.first_detail()) {
        return detail.to_string();
    }
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback.to_string();
    };
    ["message", "detail"]
        .iter()
        .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
#[path = "api_error_tests.rs"]
mod tests;
