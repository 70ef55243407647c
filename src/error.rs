//! Error types for the DERO Merchant client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for DERO Merchant operations
pub type Result<T> = std::result::Result<T, DeroMerchantError>;

/// Error object returned by the server when a request reaches it but fails.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("DeroMerchant Client: API Error {code}: {message}")]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

impl ApiError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Main error type for DERO Merchant operations
#[derive(Error, Debug)]
pub enum DeroMerchantError {
    /// The service reported a failure through its error envelope
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Network failure or timeout while talking to the service
    #[error("DeroMerchant Client: HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 404 without an error envelope
    #[error("DeroMerchant Client: error 404: page {url} not found")]
    PageNotFound { url: String },

    /// Non-2xx status without an error envelope
    #[error("DeroMerchant Client: error {status} returned by {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// 2xx response whose body does not match the expected shape
    #[error("DeroMerchant Client: malformed response body: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// JSON serialization/deserialization error
    #[error("DeroMerchant: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base URL or endpoint could not be parsed
    #[error("DeroMerchant Client: invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP method is not a valid token
    #[error("DeroMerchant Client: invalid HTTP method: {method}")]
    InvalidMethod { method: String },

    /// Configuration error
    #[error("DeroMerchant Client: configuration error: {message}")]
    Config { message: String },

    /// Key or signature is not valid hexadecimal
    #[error("DeroMerchant: hex decoding error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// MAC primitive rejected its key
    #[error("DeroMerchant: cryptographic error: {0}")]
    Crypto(#[from] hmac::digest::InvalidLength),

    /// Webhook request carries no X-Signature header
    #[error("DeroMerchant: webhook request has no signature header")]
    NoWebhookSignature,

    /// X-Signature does not match the body under the webhook secret key
    #[error("DeroMerchant: webhook request has invalid signature")]
    InvalidWebhookSignature,

    /// Inbound webhook body could not be buffered
    #[error("DeroMerchant: unable to read webhook body: {message}")]
    WebhookBody { message: String },
}

impl DeroMerchantError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a webhook body error
    pub fn webhook_body(message: impl Into<String>) -> Self {
        Self::WebhookBody {
            message: message.into(),
        }
    }

    /// Whether the service itself reported this failure
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// The server-reported error, if any
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Whether this is a transport-level failure rather than a server-reported one
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::PageNotFound { .. }
                | Self::UnexpectedStatus { .. }
                | Self::MalformedResponse(_)
        )
    }

    /// Whether a webhook request was rejected by signature verification
    pub fn is_webhook_auth_error(&self) -> bool {
        matches!(
            self,
            Self::NoWebhookSignature | Self::InvalidWebhookSignature | Self::HexDecode(_)
        )
    }

    /// HTTP status attached to the failure, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::PageNotFound { .. } => Some(404),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
