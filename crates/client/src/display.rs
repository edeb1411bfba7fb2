// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::DateTime;
use desk_core::{DeskStatus, Order, SessionState, UsbDevice};

use crate::sync::ConnectionStatus;

const UNKNOWN: &str = "-";

/// Formats an RFC 3339 timestamp as local `YYYY-MM-DD HH:MM`.
///
/// Unparseable input is shown as-is.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Formats an amount in won with thousands separators.
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{}원", grouped)
    } else {
        format!("{}원", grouped)
    }
}

/// One-line connection banner.
///
/// A lost connection tells the operator to reload.
pub fn format_connection(status: ConnectionStatus) -> String {
    match status {
        ConnectionStatus::Establishing => "connecting to desk server...".to_string(),
        ConnectionStatus::Connected => "connected".to_string(),
        ConnectionStatus::Lost => {
            "connection lost\n  hint: press Enter to reload the session".to_string()
        }
    }
}

pub fn format_order_line(order: &Order) -> String {
    let name = order
        .display_name()
        .unwrap_or_else(|| "unknown purchase".to_string());
    format!(
        "{} {} ({}, {})",
        order.id,
        name,
        order.current_status,
        format_price(order.current_paid_price)
    )
}

/// Order details as shown while registering.
pub fn format_order_details(order: &Order) -> Vec<String> {
    let info = order.ticket_info();
    let field = |v: Option<String>| v.unwrap_or_else(|| UNKNOWN.to_string());

    let mut lines = vec![
        format!("Order: {}", format_order_line(order)),
        format!("  Paid:  {}", format_timestamp(&order.first_paid_at)),
        format!("  Name:  {}", field(info.name)),
        format!("  Org:   {}", field(info.org)),
        format!("  Email: {}", field(info.email)),
        format!("  Phone: {}", field(info.phone)),
    ];
    if !order.is_redeemable() {
        lines.push("  (not redeemable)".to_string());
    }

    for product in &order.products {
        lines.push(format!(
            "  - [{}] {} {} ({})",
            product.status,
            product.id,
            product.product.name,
            format_price(product.price)
        ));
        for option in &product.options {
            let value = match (&option.product_option, &option.custom_response) {
                (Some(choice), _) if choice.additional_price > 0 => {
                    format!("{} (+{})", choice.name, format_price(choice.additional_price))
                }
                (Some(choice), _) => choice.name.clone(),
                (None, Some(response)) => response.clone(),
                (None, None) => UNKNOWN.to_string(),
            };
            lines.push(format!("      {}: {}", option.product_option_group.name, value));
        }
    }
    let priced = order.priced_options().count();
    if priced > 0 {
        lines.push(format!("  Priced options: {priced} (printed on their own label)"));
    }
    lines
}

pub fn format_device(device: &UsbDevice) -> String {
    let serial = device.serial_number.as_deref().unwrap_or(UNKNOWN);
    format!(
        "{} [{:03}:{:03}] {} serial={}",
        device.name, device.bus, device.device, device.cdc_path, serial
    )
}

/// Full session summary for `show` and `watch`.
pub fn format_state(state: &SessionState, status: Option<ConnectionStatus>) -> String {
    let mut lines = Vec::new();
    if let Some(status) = status {
        lines.push(format_connection(status));
    }
    lines.push(format!("Session: {} (commit {})", state.id, state.commit_id));
    lines.push(format!("Desk:    {}", state.desk_status));

    let reader = state.reader.as_ref().map(format_device);
    let printer = state
        .printer
        .as_ref()
        .map(|p| format!("{} {} {}x{}", format_device(&p.device), p.cmd_type, p.label.width, p.label.height));
    lines.push(format!("Reader:  {}", reader.as_deref().unwrap_or(UNKNOWN)));
    lines.push(format!("Printer: {}", printer.as_deref().unwrap_or(UNKNOWN)));
    if let Some(shop) = &state.shop_api {
        lines.push(format!("Shop:    {}", shop.domain));
    }

    match (&state.order, state.desk_status) {
        (Some(order), _) => lines.extend(format_order_details(order)),
        (None, DeskStatus::Closed) => lines.push("Desk is closed.".to_string()),
        (None, _) => lines.push("Waiting for an order.".to_string()),
    }

    if let Some(last) = state.last_handled() {
        lines.push(format!(
            "Handled: {} order(s), last {}",
            state.handled_order.len(),
            format_order_line(last)
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
