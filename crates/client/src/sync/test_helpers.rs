// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::expect_used)]

use desk_core::SessionState;
use serde_json::{json, Value};

pub const ORDER_ID: &str = "6f1c2a3b-4d5e-4f60-8a71-92b3c4d5e6f7";
pub const PRODUCT_ID: &str = "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d";
pub const EMAIL_OPTION_ID: &str = "11111111-2222-4333-8444-555555555555";

/// An order with one paid ticket carrying a name and an email response.
pub fn order_json() -> Value {
    json!({
        "id": ORDER_ID,
        "first_paid_price": 40000,
        "first_paid_at": "2026-08-01T10:00:00+09:00",
        "current_paid_price": 40000,
        "current_status": "completed",
        "products": [{
            "id": PRODUCT_ID,
            "price": 40000,
            "donation_price": 0,
            "status": "paid",
            "product": {"id": "12345678-1234-4234-8234-123456789abc", "name": "Conference Ticket", "price": 40000},
            "options": [
                {
                    "id": "66666666-7777-4888-9999-aaaaaaaaaaaa",
                    "product_option_group": {
                        "id": "21111111-2222-4333-8444-555555555555",
                        "name": "성함",
                        "is_custom_response": true
                    },
                    "custom_response": "Kim Minji"
                },
                {
                    "id": EMAIL_OPTION_ID,
                    "product_option_group": {
                        "id": "31111111-2222-4333-8444-555555555555",
                        "name": "이메일",
                        "is_custom_response": true,
                        "custom_response_pattern": r"[^@\s]+@[^@\s]+"
                    },
                    "custom_response": "minji@example.com"
                }
            ]
        }],
        "user": {"id": 7, "username": "minji", "email": "minji@example.com"}
    })
}

/// A session snapshot as the server sends it.
pub fn state_json(id: &str, commit_id: &str, desk_status: &str) -> Value {
    json!({
        "id": id,
        "commit_id": commit_id,
        "desk_status": desk_status,
        "order": null,
        "handled_order": [],
        "reader": null,
        "printer": null,
        "shop_api": null,
    })
}

/// A registering snapshot holding [`order_json`].
pub fn state_with_order_json(id: &str, commit_id: &str) -> Value {
    let mut value = state_json(id, commit_id, "registering");
    value["order"] = order_json();
    value
}

pub fn state(id: &str, commit_id: &str, desk_status: &str) -> SessionState {
    serde_json::from_value(state_json(id, commit_id, desk_status)).expect("fixture state")
}

pub fn state_with_order(id: &str, commit_id: &str) -> SessionState {
    serde_json::from_value(state_with_order_json(id, commit_id)).expect("fixture state")
}
