// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session state snapshot as broadcast by the desk server.
//!
//! A [`SessionState`] is always a complete snapshot. Clients never patch
//! individual fields; they swap the whole value when a fresher commit arrives.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::commit::CommitId;
use crate::error::{Error, Result};
use crate::order::Order;

/// Client-durable token binding this client to its server-side session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session id, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("session id must not be empty".to_string()));
        }
        Ok(SessionId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for SessionId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        SessionId::new(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Desk status, which drives what the operator screen shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeskStatus {
    Idle,
    Registering,
    #[default]
    Closed,
    Automated,
}

impl DeskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeskStatus::Idle => "idle",
            DeskStatus::Registering => "registering",
            DeskStatus::Closed => "closed",
            DeskStatus::Automated => "automated",
        }
    }
}

impl fmt::Display for DeskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "idle" => Ok(DeskStatus::Idle),
            "registering" => Ok(DeskStatus::Registering),
            "closed" => Ok(DeskStatus::Closed),
            "automated" => Ok(DeskStatus::Automated),
            _ => Err(Error::InvalidDeskStatus(s.to_string())),
        }
    }
}

/// A USB device as enumerated by the desk server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsbDevice {
    pub bus: u32,
    pub device: u32,
    pub block_path: String,
    pub cdc_path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
}

/// Command protocol spoken by a label printer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrinterCmdType {
    #[default]
    #[serde(rename = "ESCP")]
    Escp,
    #[serde(rename = "TSPL")]
    Tspl,
}

impl fmt::Display for PrinterCmdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrinterCmdType::Escp => write!(f, "ESCP"),
            PrinterCmdType::Tspl => write!(f, "TSPL"),
        }
    }
}

impl FromStr for PrinterCmdType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ESCP" => Ok(PrinterCmdType::Escp),
            "TSPL" => Ok(PrinterCmdType::Tspl),
            _ => Err(Error::InvalidPrinterCmdType(s.to_string())),
        }
    }
}

/// Label dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSize {
    pub width: u32,
    pub height: u32,
}

impl Default for LabelSize {
    fn default() -> Self {
        LabelSize { width: 960, height: 410 }
    }
}

/// A label printer binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Printer {
    #[serde(flatten)]
    pub device: UsbDevice,
    #[serde(default)]
    pub cmd_type: PrinterCmdType,
    #[serde(default)]
    pub label: LabelSize,
}

/// Remote payment-system endpoint and credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopApiConfig {
    pub domain: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for ShopApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopApiConfig")
            .field("domain", &self.domain)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// The authoritative per-client session snapshot.
///
/// `id` and `commit_id` are required on the wire; every other field falls
/// back to its empty value so older servers still parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub id: SessionId,
    pub commit_id: CommitId,
    #[serde(default)]
    pub desk_status: DeskStatus,
    #[serde(default)]
    pub order: Option<Order>,
    /// Previously handled orders, most recent last.
    #[serde(default)]
    pub handled_order: Vec<Order>,
    #[serde(default)]
    pub reader: Option<UsbDevice>,
    #[serde(default)]
    pub printer: Option<Printer>,
    #[serde(default)]
    pub shop_api: Option<ShopApiConfig>,
    #[serde(default)]
    pub automated: bool,
    #[serde(default)]
    pub print_priced_option_label: bool,
}

impl SessionState {
    /// Checks the invariants a snapshot must hold before a client keeps it.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidSnapshot("session id is empty".to_string()));
        }
        if self.commit_id.is_empty() {
            return Err(Error::InvalidSnapshot("commit id is empty".to_string()));
        }
        if self.order.is_some() && self.desk_status == DeskStatus::Closed {
            return Err(Error::InvalidSnapshot("closed desk holds an active order".to_string()));
        }
        Ok(())
    }

    /// Returns true when an order is under handling.
    pub fn has_order(&self) -> bool {
        self.order.is_some()
    }

    /// The most recently handled order, if any.
    pub fn last_handled(&self) -> Option<&Order> {
        self.handled_order.last()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
