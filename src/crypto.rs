//! Message authentication for signed requests and webhooks
//!
//! Every signature exchanged with the DERO Merchant service is an HMAC-SHA256
//! over the exact body bytes, transmitted as lowercase hex.

use crate::Result;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of a signature digest
pub const SIGNATURE_LEN: usize = 32;

/// Compute the MAC of `message` under `key`.
pub fn sign_message(message: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Check `message_mac` against the MAC of `message` under `key`.
///
/// The comparison runs in constant time with respect to the digest contents.
pub fn valid_mac(message: &[u8], message_mac: &[u8], key: &[u8]) -> Result<bool> {
    let mut mac = HmacSha256::new_from_slice(key)?;
    mac.update(message);
    Ok(mac.verify_slice(message_mac).is_ok())
}

/// Keyed signer/verifier holding an already-decoded secret key.
#[derive(Clone)]
pub struct MessageAuthenticator {
    key: Vec<u8>,
}

impl std::fmt::Debug for MessageAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageAuthenticator")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl MessageAuthenticator {
    /// Create an authenticator from raw key bytes
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// Create an authenticator from a hex-encoded key
    pub fn from_hex(key: &str) -> Result<Self> {
        Ok(Self::new(hex::decode(key)?))
    }

    /// Raw signature over `payload`
    pub fn sign(&self, payload: &[u8]) -> Result<Vec<u8>> {
        sign_message(payload, &self.key)
    }

    /// Signature over `payload` as lowercase hex, the form used in `X-Signature`
    pub fn sign_hex(&self, payload: &[u8]) -> Result<String> {
        Ok(hex::encode(self.sign(payload)?))
    }

    /// Constant-time check of `signature` against `payload`
    pub fn verify(&self, payload: &[u8], signature: &[u8]) -> Result<bool> {
        valid_mac(payload, signature, &self.key)
    }
}
