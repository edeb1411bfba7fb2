// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed parameters for state-changing requests.
//!
//! Each mutation takes a statically declared parameter type that is checked
//! before anything is sent to the server.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::order::{Order, OrderProductStatus};
use crate::state::{DeskStatus, PrinterCmdType, SessionState, ShopApiConfig};

/// Parses an order id, which must be a UUID.
pub fn parse_order_id(input: &str) -> Result<Uuid> {
    Uuid::parse_str(input.trim()).map_err(|_| Error::InvalidOrderId(input.to_string()))
}

/// One-time password authorizing a refund.
#[derive(Clone, PartialEq, Eq)]
pub struct Otp(String);

impl Otp {
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidOtp);
        }
        Ok(Otp(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Otp(******)")
    }
}

/// Custom-response keywords for an order search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchKeywords(Vec<String>);

impl SearchKeywords {
    /// Splits comma-separated input, dropping blank entries.
    pub fn parse(input: &str) -> Self {
        SearchKeywords(
            input
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `custom_responses` query value.
    pub fn to_query(&self) -> String {
        self.0.join(",")
    }
}

/// Decides whether a desk status request should be sent at all.
///
/// Returns `Ok(None)` when the desk already has the requested status.
/// Registering can only be entered by selecting an order.
pub fn plan_desk_status(current: &SessionState, requested: DeskStatus) -> Result<Option<DeskStatus>> {
    if current.desk_status == requested {
        return Ok(None);
    }
    if requested == DeskStatus::Registering && !current.has_order() {
        return Err(Error::InvalidInput(
            "cannot start registering without an order\n  hint: select an order instead".to_string(),
        ));
    }
    Ok(Some(requested))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionModify {
    pub id: Uuid,
    pub custom_response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductModify {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderProductStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionModify>,
}

/// Changes to apply to the active order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModifyRequest {
    pub products: Vec<ProductModify>,
}

impl OrderModifyRequest {
    /// Request that only changes one product's status.
    pub fn product_status(product_id: Uuid, status: OrderProductStatus) -> Self {
        OrderModifyRequest {
            products: vec![ProductModify {
                id: product_id,
                status: Some(status),
                options: Vec::new(),
            }],
        }
    }

    /// Request that only rewrites one custom response.
    pub fn custom_response(product_id: Uuid, option_id: Uuid, response: impl Into<String>) -> Self {
        OrderModifyRequest {
            products: vec![ProductModify {
                id: product_id,
                status: None,
                options: vec![OptionModify {
                    id: option_id,
                    custom_response: response.into(),
                }],
            }],
        }
    }

    /// Checks the request against the order it targets.
    pub fn validate(&self, order: &Order) -> Result<()> {
        if self.products.is_empty() {
            return Err(Error::InvalidInput("modify request has no products".to_string()));
        }
        for change in &self.products {
            let product = order.product(change.id).ok_or_else(|| {
                Error::InvalidInput(format!("product {} is not part of order {}", change.id, order.id))
            })?;
            if change.status.is_none() && change.options.is_empty() {
                return Err(Error::InvalidInput(format!("no changes for product {}", change.id)));
            }
            for option_change in &change.options {
                let option = product.option(option_change.id).ok_or_else(|| {
                    Error::InvalidInput(format!("option {} is not part of product {}", option_change.id, change.id))
                })?;
                let group = &option.product_option_group;
                if !group.is_custom_response {
                    return Err(Error::InvalidInput(format!("'{}' does not take a custom response", group.name)));
                }
                if let Some(pattern) = group.custom_response_pattern.as_deref() {
                    check_pattern(&group.name, pattern, &option_change.custom_response)?;
                }
            }
        }
        Ok(())
    }
}

/// Patterns that fail to compile are not enforced; the server re-checks.
fn check_pattern(group: &str, pattern: &str, value: &str) -> Result<()> {
    let Ok(re) = Regex::new(&format!("^(?:{pattern})$")) else {
        return Ok(());
    };
    if re.is_match(value) {
        Ok(())
    } else {
        Err(Error::PatternMismatch {
            group: group.to_string(),
            value: value.to_string(),
        })
    }
}

/// Binds a barcode reader by its CDC device path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderRegistration {
    pub cdc_path: String,
}

/// Binds a label printer by its CDC device path and command protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterRegistration {
    pub cdc_path: String,
    pub cmd_mode: PrinterCmdType,
}

fn check_device_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(Error::InvalidInput(format!(
            "device path must be absolute: '{path}'\n  hint: use the cdc_path from `desk device list`"
        )));
    }
    Ok(())
}

impl ReaderRegistration {
    pub fn new(cdc_path: &str) -> Result<Self> {
        let cdc_path = cdc_path.trim();
        check_device_path(cdc_path)?;
        Ok(ReaderRegistration { cdc_path: cdc_path.to_string() })
    }
}

impl PrinterRegistration {
    pub fn new(cdc_path: &str, cmd_mode: PrinterCmdType) -> Result<Self> {
        let cdc_path = cdc_path.trim();
        check_device_path(cdc_path)?;
        Ok(PrinterRegistration { cdc_path: cdc_path.to_string(), cmd_mode })
    }
}

/// Application-wide device allow list, by device name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDevices {
    pub reader_names: Vec<String>,
    pub printer_names: Vec<String>,
}

/// Checks a shop API configuration before it is submitted.
pub fn validate_shop_api(config: &ShopApiConfig) -> Result<()> {
    let domain = config.domain.trim();
    if !(domain.starts_with("http://") || domain.starts_with("https://")) {
        return Err(Error::InvalidInput(format!(
            "invalid shop domain: '{}'\n  hint: use a full URL such as https://shop.example.com",
            config.domain
        )));
    }
    if config.api_key.trim().is_empty() || config.api_secret.trim().is_empty() {
        return Err(Error::InvalidInput("shop API key and secret are required".to_string()));
    }
    Ok(())
}

/// Returns the active order or fails with [`Error::NoActiveOrder`].
pub fn require_order(state: &SessionState) -> Result<&Order> {
    state.order.as_ref().ok_or(Error::NoActiveOrder)
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
