//! # dero-merchant - DERO Merchant API client
//!
//! A Rust client for the DERO Merchant payment REST API.
//! This library provides request signing, payment endpoints, response
//! decoding and verification of the webhook notifications sent by the service.

pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod payment;
pub mod response;
pub mod types;
pub mod webhook;

// Re-exports for convenience
pub use client::{ApiRequest, DeroMerchantClient};
pub use config::{ClientOptions, WebhookOptions};
pub use crypto::MessageAuthenticator;
pub use error::{ApiError, DeroMerchantError, Result};
pub use types::*;
pub use webhook::{
    parse_webhook_request, sign_webhook_payload, verify_and_parse_webhook_request,
    verify_webhook_signature, WebhookVerifier,
};

// Feature-gated framework support
#[cfg(feature = "axum")]
pub mod axum;

/// Current version of the dero-merchant library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the hex HMAC-SHA256 of a request or webhook body
pub const SIGNATURE_HEADER: &str = "x-signature";
