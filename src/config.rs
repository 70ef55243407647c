//! Client and webhook configuration

use crate::{DeroMerchantError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default transport scheme
pub const DEFAULT_SCHEME: &str = "https";
/// Default DERO Merchant host
pub const DEFAULT_HOST: &str = "merchant.dero.io";
/// Default API version path segment
pub const DEFAULT_API_VERSION: &str = "v1";
/// Default request and webhook read timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default upper bound for a buffered webhook body
pub const DEFAULT_WEBHOOK_BODY_LIMIT: usize = 1024 * 1024;

/// Options used to build a [`crate::DeroMerchantClient`].
///
/// Empty `scheme`, `host` and `api_version` fall back to the defaults.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Transport scheme, e.g. `https`
    pub scheme: String,
    /// Target authority, e.g. `merchant.dero.io` or `localhost:8080`
    pub host: String,
    /// API version path segment
    pub api_version: String,
    /// Sent in `X-API-Key` with every request
    pub api_key: String,
    /// Hex-encoded key used to sign request bodies
    pub secret_key: String,
    /// Request timeout, `timeout_ms` in config files
    #[serde(rename = "timeout_ms", with = "duration_millis")]
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: String::new(),
            secret_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientOptions {
    /// Create options for the default service with the given credentials
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            ..Self::default()
        }
    }

    /// Set the scheme
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DeroMerchantError::config(format!("Failed to read config file: {}", e))
        })?;

        let options: ClientOptions = serde_json::from_str(&content).map_err(|e| {
            DeroMerchantError::config(format!("Failed to parse config file: {}", e))
        })?;

        options.validate()?;
        Ok(options)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();

        if let Ok(scheme) = std::env::var("DERO_MERCHANT_SCHEME") {
            options.scheme = scheme;
        }

        if let Ok(host) = std::env::var("DERO_MERCHANT_HOST") {
            options.host = host;
        }

        if let Ok(api_version) = std::env::var("DERO_MERCHANT_API_VERSION") {
            options.api_version = api_version;
        }

        if let Ok(api_key) = std::env::var("DERO_MERCHANT_API_KEY") {
            options.api_key = api_key;
        }

        if let Ok(secret_key) = std::env::var("DERO_MERCHANT_SECRET_KEY") {
            options.secret_key = secret_key;
        }

        if let Ok(timeout) = std::env::var("DERO_MERCHANT_TIMEOUT_SECS") {
            options.timeout = parse_seconds("DERO_MERCHANT_TIMEOUT_SECS", &timeout)?;
        }

        options.validate()?;
        Ok(options)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;

        if self.timeout.is_zero() {
            return Err(DeroMerchantError::config("Timeout must be positive"));
        }

        Ok(())
    }

    /// Scheme with the default applied
    pub fn effective_scheme(&self) -> &str {
        non_empty_or(&self.scheme, DEFAULT_SCHEME)
    }

    /// Host with the default applied
    pub fn effective_host(&self) -> &str {
        non_empty_or(&self.host, DEFAULT_HOST)
    }

    /// API version with the default applied
    pub fn effective_api_version(&self) -> &str {
        non_empty_or(&self.api_version, DEFAULT_API_VERSION)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{scheme}://{host}/api/{api_version}`, checked to be an absolute URL with a host
    pub fn base_url(&self) -> Result<String> {
        let base_url = format!(
            "{}://{}/api/{}",
            self.effective_scheme(),
            self.effective_host(),
            self.effective_api_version()
        );

        let parsed = url::Url::parse(&base_url)?;
        if parsed.cannot_be_a_base() || parsed.host_str().map_or(true, str::is_empty) {
            return Err(DeroMerchantError::config(format!(
                "Base URL {} has no host",
                base_url
            )));
        }

        Ok(base_url)
    }
}

/// Parse a possibly fractional number of seconds, e.g. `2.5`.
fn parse_seconds(var: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| DeroMerchantError::config(format!("Invalid {}: {:?}", var, value)))
}

/// Serde adapter storing a `Duration` as whole milliseconds.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Options for the party receiving webhook notifications.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookOptions {
    /// Hex-encoded key shared with the service for webhook signatures
    pub webhook_secret_key: String,
    /// Maximum accepted body size in bytes
    pub body_limit: usize,
    /// Maximum time spent reading a body, `read_timeout_ms` in config files
    #[serde(rename = "read_timeout_ms", with = "duration_millis")]
    pub read_timeout: Duration,
}

impl std::fmt::Debug for WebhookOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookOptions")
            .field("webhook_secret_key", &"<redacted>")
            .field("body_limit", &self.body_limit)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}

impl Default for WebhookOptions {
    fn default() -> Self {
        Self {
            webhook_secret_key: String::new(),
            body_limit: DEFAULT_WEBHOOK_BODY_LIMIT,
            read_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl WebhookOptions {
    pub fn new(webhook_secret_key: impl Into<String>) -> Self {
        Self {
            webhook_secret_key: webhook_secret_key.into(),
            ..Self::default()
        }
    }

    /// Set the body size limit
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    /// Set the body read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();

        if let Ok(key) = std::env::var("DERO_MERCHANT_WEBHOOK_SECRET_KEY") {
            options.webhook_secret_key = key;
        }

        if let Ok(limit) = std::env::var("DERO_MERCHANT_WEBHOOK_BODY_LIMIT") {
            options.body_limit = limit.parse().map_err(|e| {
                DeroMerchantError::config(format!(
                    "Invalid DERO_MERCHANT_WEBHOOK_BODY_LIMIT: {}",
                    e
                ))
            })?;
        }

        if let Ok(timeout) = std::env::var("DERO_MERCHANT_WEBHOOK_READ_TIMEOUT_SECS") {
            options.read_timeout =
                parse_seconds("DERO_MERCHANT_WEBHOOK_READ_TIMEOUT_SECS", &timeout)?;
        }

        options.validate()?;
        Ok(options)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.webhook_secret_key.is_empty() {
            return Err(DeroMerchantError::config("Webhook secret key is required"));
        }
        hex::decode(&self.webhook_secret_key)?;

        if self.body_limit == 0 {
            return Err(DeroMerchantError::config("Webhook body limit must be positive"));
        }

        if self.read_timeout.is_zero() {
            return Err(DeroMerchantError::config("Webhook read timeout must be positive"));
        }

        Ok(())
    }

    /// Body read timeout
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }
}
