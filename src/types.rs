//! Core types exchanged with the DERO Merchant API

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error envelope returned by the service on failure: `{"error": {"code", "message"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}

impl ErrorResponse {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            error: ApiError::new(code, message),
        }
    }
}

/// A payment created on or fetched from the DERO Merchant server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Payment {
    /// Unique payment identifier
    #[serde(rename = "paymentID")]
    pub payment_id: String,
    /// Payment status as reported by the server
    pub status: String,
    /// Currency the amount is expressed in
    pub currency: String,
    /// Amount in `currency`
    pub currency_amount: f64,
    /// Exchange rate between `currency` and DERO at creation time
    pub exchange_rate: f64,
    /// Amount of DERO to pay, decimal string
    pub dero_amount: String,
    /// Amount of DERO to pay, atomic units
    pub atomic_dero_amount: u64,
    /// Integrated address the payment is sent to
    pub integrated_address: String,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    /// Minutes before the payment expires
    pub ttl: i64,
}

/// Body of a create-payment request
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreatePaymentRequest<'a> {
    pub currency: &'a str,
    pub amount: f64,
}

/// Paginated result of a filtered payments query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilteredPayments {
    pub limit: i64,
    pub page: i64,
    pub total_payments: i64,
    pub total_pages: i64,
    pub payments: Vec<Payment>,
}

/// Query parameters for a filtered payments query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub limit: u32,
    pub page: u32,
    pub sort_by: String,
    pub order_by: String,
    pub status: String,
    pub currency: String,
}

impl PaymentFilter {
    /// Create a filter for one page of results
    pub fn new(limit: u32, page: u32) -> Self {
        Self {
            limit,
            page,
            ..Self::default()
        }
    }

    /// Sort by the given field in the given order
    pub fn sorted_by(mut self, sort_by: impl Into<String>, order_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self.order_by = order_by.into();
        self
    }

    /// Only return payments with this status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Only return payments in this currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// Response of the `/ping` endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub ping: String,
}

/// Payload of a webhook notification sent when a payment changes status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentUpdateEvent {
    #[serde(rename = "paymentID", skip_serializing_if = "String::is_empty")]
    pub payment_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
}

impl PaymentUpdateEvent {
    pub fn new(payment_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            payment_id: payment_id.into(),
            status: status.into(),
        }
    }
}
