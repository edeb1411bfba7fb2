// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for desk-core operations.

use thiserror::Error;

/// All possible errors that can occur in desk-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid order id: '{0}'\n  hint: order ids are UUIDs such as 3f2b8c4e-1d2a-4b6f-9c1e-7a5d0e9f8b21")]
    InvalidOrderId(String),

    #[error("invalid OTP code\n  hint: the refund code is the numeric code shown on the authenticator")]
    InvalidOtp,

    #[error("invalid desk status: '{0}'\n  hint: valid statuses are: idle, registering, closed, automated")]
    InvalidDeskStatus(String),

    #[error("invalid printer command type: '{0}'\n  hint: valid types are: ESCP, TSPL")]
    InvalidPrinterCmdType(String),

    #[error("invalid product status: '{0}'\n  hint: valid statuses are: pending, paid, used, refunded")]
    InvalidProductStatus(String),

    #[error("custom response '{value}' does not match the pattern of '{group}'")]
    PatternMismatch { group: String, value: String },

    #[error("no order is active\n  hint: select an order first")]
    NoActiveOrder,

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for desk-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
