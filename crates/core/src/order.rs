// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Orders as relayed from the shop payment system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Option group carrying the attendee's name.
pub const NAME_GROUP: &str = "성함";
/// Option group carrying the attendee's organization.
pub const ORG_GROUP: &str = "소속";
/// Option group carrying the attendee's email.
pub const EMAIL_GROUP: &str = "이메일";
/// Option group carrying the attendee's phone number.
pub const PHONE_GROUP: &str = "연락처 번호 (-를 포함해주세요!)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentHistoryStatus {
    Pending,
    Completed,
    PartialRefunded,
    Refunded,
}

impl fmt::Display for PaymentHistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentHistoryStatus::Pending => write!(f, "pending"),
            PaymentHistoryStatus::Completed => write!(f, "completed"),
            PaymentHistoryStatus::PartialRefunded => write!(f, "partial_refunded"),
            PaymentHistoryStatus::Refunded => write!(f, "refunded"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderProductStatus {
    Pending,
    Paid,
    Used,
    Refunded,
}

impl fmt::Display for OrderProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderProductStatus::Pending => write!(f, "pending"),
            OrderProductStatus::Paid => write!(f, "paid"),
            OrderProductStatus::Used => write!(f, "used"),
            OrderProductStatus::Refunded => write!(f, "refunded"),
        }
    }
}

impl FromStr for OrderProductStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderProductStatus::Pending),
            "paid" => Ok(OrderProductStatus::Paid),
            "used" => Ok(OrderProductStatus::Used),
            "refunded" => Ok(OrderProductStatus::Refunded),
            _ => Err(Error::InvalidProductStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentHistory {
    pub status: PaymentHistoryStatus,
    pub price: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub id: Uuid,
    pub name: String,
    pub is_custom_response: bool,
    #[serde(default)]
    pub custom_response_pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: Uuid,
    pub name: String,
    pub additional_price: i64,
}

/// A chosen option (or free-text response) on an ordered product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProductOption {
    pub id: Uuid,
    pub product_option_group: OptionGroup,
    #[serde(default)]
    pub product_option: Option<ProductOption>,
    #[serde(default)]
    pub custom_response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProduct {
    pub id: Uuid,
    pub price: i64,
    pub donation_price: i64,
    pub status: OrderProductStatus,
    pub product: Product,
    #[serde(default)]
    pub options: Vec<OrderProductOption>,
}

impl OrderProduct {
    pub fn option(&self, option_id: Uuid) -> Option<&OrderProductOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Custom response given for the named option group, if non-empty.
    pub fn custom_response(&self, group_name: &str) -> Option<&str> {
        self.options
            .iter()
            .filter(|o| o.product_option_group.is_custom_response)
            .find(|o| o.product_option_group.name == group_name)
            .and_then(|o| o.custom_response.as_deref())
            .filter(|r| !r.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub first_paid_price: i64,
    pub first_paid_at: String,
    pub current_paid_price: i64,
    pub current_status: PaymentHistoryStatus,
    #[serde(default)]
    pub payment_histories: Vec<PaymentHistory>,
    #[serde(default)]
    pub products: Vec<OrderProduct>,
    pub user: OrderUser,
}

/// Attendee details gathered from the first product's custom responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketInfo {
    pub name: Option<String>,
    pub org: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Order {
    pub fn product(&self, product_id: Uuid) -> Option<&OrderProduct> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Short human label: first product name plus the count of the rest.
    ///
    /// Returns `None` for an order without products.
    pub fn display_name(&self) -> Option<String> {
        let first = self.products.first()?;
        let rest = self.products.len() - 1;
        if rest == 0 {
            Some(first.product.name.clone())
        } else {
            Some(format!("{} (+{} more)", first.product.name, rest))
        }
    }

    pub fn ticket_info(&self) -> TicketInfo {
        let Some(ticket) = self.products.first() else {
            return TicketInfo::default();
        };
        let owned = |group: &str| ticket.custom_response(group).map(str::to_string);
        TicketInfo {
            name: owned(NAME_GROUP),
            org: owned(ORG_GROUP),
            email: owned(EMAIL_GROUP),
            phone: owned(PHONE_GROUP),
        }
    }

    /// Options that add to the price, which get their own exchange label.
    pub fn priced_options(&self) -> impl Iterator<Item = &OrderProductOption> {
        self.products
            .iter()
            .flat_map(|p| p.options.iter())
            .filter(|o| o.product_option.as_ref().is_some_and(|po| po.additional_price > 0))
    }

    /// True when the ticket can be handed out: paid in full or partially
    /// refunded, and the first product still unused.
    pub fn is_redeemable(&self) -> bool {
        let paid = matches!(
            self.current_status,
            PaymentHistoryStatus::Completed | PaymentHistoryStatus::PartialRefunded
        );
        paid && self.products.first().is_some_and(|p| p.status == OrderProductStatus::Paid)
    }
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
