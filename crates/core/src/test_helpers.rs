// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for desk-core tests.

#![allow(clippy::panic)]

use serde_json::{json, Value};

pub const ORDER_ID: &str = "6f1c2a3b-4d5e-4f60-8a71-92b3c4d5e6f7";
pub const PRODUCT_ID: &str = "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d";
pub const EMAIL_OPTION_ID: &str = "11111111-2222-4333-8444-555555555555";
pub const NAME_OPTION_ID: &str = "66666666-7777-4888-9999-aaaaaaaaaaaa";
pub const SHIRT_OPTION_ID: &str = "bbbbbbbb-cccc-4ddd-8eee-ffffffffffff";

fn group(id: &str, name: &str, custom: bool, pattern: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "is_custom_response": custom,
        "custom_response_pattern": pattern,
    })
}

/// An order with one paid ticket carrying name, email and a priced shirt option.
pub fn order_json() -> Value {
    json!({
        "id": ORDER_ID,
        "first_paid_price": 50000,
        "first_paid_at": "2026-08-01T10:00:00+09:00",
        "current_paid_price": 50000,
        "current_status": "completed",
        "payment_histories": [
            {"status": "completed", "price": 50000, "created_at": "2026-08-01T10:00:00+09:00"}
        ],
        "products": [{
            "id": PRODUCT_ID,
            "price": 40000,
            "donation_price": 0,
            "status": "paid",
            "product": {"id": "12345678-1234-4234-8234-123456789abc", "name": "Conference Ticket", "price": 40000},
            "options": [
                {
                    "id": NAME_OPTION_ID,
                    "product_option_group": group("21111111-2222-4333-8444-555555555555", "성함", true, None),
                    "product_option": null,
                    "custom_response": "Kim Minji"
                },
                {
                    "id": EMAIL_OPTION_ID,
                    "product_option_group": group("31111111-2222-4333-8444-555555555555", "이메일", true, Some(r"[^@\s]+@[^@\s]+")),
                    "product_option": null,
                    "custom_response": "minji@example.com"
                },
                {
                    "id": SHIRT_OPTION_ID,
                    "product_option_group": group("41111111-2222-4333-8444-555555555555", "T-Shirt", false, None),
                    "product_option": {"id": "51111111-2222-4333-8444-555555555555", "name": "L", "additional_price": 10000},
                    "custom_response": null
                }
            ]
        }],
        "user": {"id": 7, "username": "minji", "email": "minji@example.com"}
    })
}

pub fn order() -> crate::Order {
    serde_json::from_value(order_json()).unwrap_or_else(|e| panic!("fixture order: {e}"))
}
