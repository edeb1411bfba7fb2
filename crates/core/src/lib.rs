// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! desk-core: Shared data model for the registration desk client.
//!
//! This crate provides the wire types exchanged with the desk server, the
//! commit-id freshness rule used to reconcile snapshots, error payload
//! classification and typed mutation parameters. It performs no I/O.

pub mod api_error;
pub mod command;
pub mod commit;
pub mod error;
pub mod order;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_helpers;

pub use api_error::{alert_message, ApiErrorDetail, ApiErrorPayload};
pub use commit::{CommitId, Freshness, Verdict};
pub use error::{Error, Result};
pub use order::{Order, OrderProduct, OrderProductStatus, PaymentHistoryStatus, TicketInfo};
pub use snapshot::{parse_snapshot, snapshot_from_value, MalformedSnapshot};
pub use state::{
    DeskStatus, LabelSize, Printer, PrinterCmdType, SessionId, SessionState, ShopApiConfig,
    UsbDevice,
};
