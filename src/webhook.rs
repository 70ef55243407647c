//! Verification of webhook notifications sent by the DERO Merchant service
//!
//! A webhook request is trusted only once the `X-Signature` header matches the
//! HMAC of the exact body bytes under the webhook secret key. The body is
//! buffered once by the caller and handed around by reference, so the same
//! bytes stay available for parsing after verification.

use crate::crypto::MessageAuthenticator;
use crate::types::PaymentUpdateEvent;
use crate::{DeroMerchantError, Result, SIGNATURE_HEADER};
use http::HeaderMap;
use tracing::warn;

/// Verifier bound to one webhook secret key.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    authenticator: MessageAuthenticator,
}

impl WebhookVerifier {
    /// Create a verifier from the hex-encoded webhook secret key
    pub fn new(webhook_secret_key: &str) -> Result<Self> {
        Ok(Self {
            authenticator: MessageAuthenticator::from_hex(webhook_secret_key)?,
        })
    }

    /// Check the signature header against `body`.
    pub fn verify(&self, headers: &HeaderMap, body: &[u8]) -> Result<()> {
        let signature = signature_from_headers(headers)?;
        self.verify_signature(&signature, body)
    }

    /// Check a buffered request; its body is left untouched for later readers.
    pub fn verify_request<B: AsRef<[u8]>>(&self, request: &http::Request<B>) -> Result<()> {
        self.verify(request.headers(), request.body().as_ref())
    }

    /// Parse a body into an event. Only call this on a verified body.
    pub fn parse(&self, body: &[u8]) -> Result<PaymentUpdateEvent> {
        parse_webhook_request(body)
    }

    /// Verify, then parse. Parsing is never attempted on an unverified body.
    pub fn verify_and_parse(&self, headers: &HeaderMap, body: &[u8]) -> Result<PaymentUpdateEvent> {
        self.verify(headers, body)?;
        parse_webhook_request(body)
    }

    fn verify_signature(&self, signature: &[u8], body: &[u8]) -> Result<()> {
        if self.authenticator.verify(body, signature)? {
            Ok(())
        } else {
            warn!("rejected webhook request with invalid signature");
            Err(DeroMerchantError::InvalidWebhookSignature)
        }
    }
}

/// Check that `headers` carry a valid signature of `body` under the hex-encoded key.
///
/// Checks run in order: header present, header is hex, key is hex, MAC matches.
pub fn verify_webhook_signature(
    headers: &HeaderMap,
    body: &[u8],
    webhook_secret_key: &str,
) -> Result<()> {
    let signature = signature_from_headers(headers)?;
    WebhookVerifier::new(webhook_secret_key)?.verify_signature(&signature, body)
}

/// Parse a webhook body into an event.
///
/// Call this only after [`verify_webhook_signature`] succeeded on the same bytes.
pub fn parse_webhook_request(body: &[u8]) -> Result<PaymentUpdateEvent> {
    Ok(serde_json::from_slice(body)?)
}

/// Verify a webhook request and parse it on success.
pub fn verify_and_parse_webhook_request(
    headers: &HeaderMap,
    body: &[u8],
    webhook_secret_key: &str,
) -> Result<PaymentUpdateEvent> {
    verify_webhook_signature(headers, body, webhook_secret_key)?;
    parse_webhook_request(body)
}

/// Hex signature of a webhook body, as the service puts it in `X-Signature`.
pub fn sign_webhook_payload(body: &[u8], webhook_secret_key: &str) -> Result<String> {
    MessageAuthenticator::from_hex(webhook_secret_key)?.sign_hex(body)
}

fn signature_from_headers(headers: &HeaderMap) -> Result<Vec<u8>> {
    let value = match headers.get(SIGNATURE_HEADER) {
        Some(value) if !value.as_bytes().is_empty() => value,
        _ => {
            warn!("rejected webhook request without signature header");
            return Err(DeroMerchantError::NoWebhookSignature);
        }
    };

    Ok(hex::decode(value.as_bytes())?)
}
