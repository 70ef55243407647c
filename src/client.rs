//! HTTP client for the DERO Merchant API with request signing

use crate::config::ClientOptions;
use crate::crypto::MessageAuthenticator;
use crate::response::{check_response, decode_response};
use crate::types::PingResponse;
use crate::{DeroMerchantError, Result, API_KEY_HEADER, SIGNATURE_HEADER};
use http::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;
use url::Url;

/// User agent sent with every request
pub const CLIENT_USER_AGENT: &str = concat!("DeroMerchant_Client_Rust/", env!("CARGO_PKG_VERSION"));

/// Client holding everything needed to talk to the DERO Merchant REST API.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Clone)]
pub struct DeroMerchantClient {
    scheme: String,
    host: String,
    api_version: String,
    base_url: String,
    api_key: String,
    secret_key: String,
    http: Client,
}

impl std::fmt::Debug for DeroMerchantClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeroMerchantClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl DeroMerchantClient {
    /// Create a new client.
    ///
    /// Fails without touching the network if the base URL built from the
    /// options is not a valid absolute URL.
    pub fn new(options: ClientOptions) -> Result<Self> {
        options.validate()?;
        let base_url = options.base_url()?;

        let http = Client::builder()
            .timeout(options.timeout())
            .build()
            .map_err(|e| {
                DeroMerchantError::config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            scheme: options.effective_scheme().to_string(),
            host: options.effective_host().to_string(),
            api_version: options.effective_api_version().to_string(),
            base_url,
            api_key: options.api_key,
            secret_key: options.secret_key,
            http,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// `{scheme}://{host}/api/{api_version}`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request to `endpoint`, relative to the base URL.
    ///
    /// `method` is case-insensitive; an empty method means `GET`.
    pub fn new_request(&self, method: &str, endpoint: &str) -> Result<ApiRequest> {
        let method = if method.is_empty() {
            Method::GET
        } else {
            Method::from_bytes(method.to_uppercase().as_bytes()).map_err(|_| {
                DeroMerchantError::InvalidMethod {
                    method: method.to_string(),
                }
            })?
        };

        let url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        let mut api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| DeroMerchantError::config("API key is not a valid header value"))?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        Ok(ApiRequest {
            method,
            url,
            headers,
            body: None,
        })
    }

    /// Attach `X-Signature` to a request that carries a body.
    ///
    /// Requests without a body are left untouched. The body itself is only
    /// read, so the same bytes are transmitted afterwards.
    pub fn sign_request(&self, request: &mut ApiRequest) -> Result<()> {
        let signature = match request.body() {
            Some(body) => MessageAuthenticator::from_hex(&self.secret_key)?.sign_hex(body)?,
            None => return Ok(()),
        };

        let mut value = HeaderValue::from_str(&signature)
            .map_err(|_| DeroMerchantError::config("Signature is not a valid header value"))?;
        value.set_sensitive(true);
        request
            .headers
            .insert(HeaderName::from_static(SIGNATURE_HEADER), value);
        Ok(())
    }

    /// Send a request as-is and decode the response into `T`.
    pub async fn send_request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let (status, body, url) = self.execute(request).await?;
        decode_response(status, &body, &url)
    }

    /// Send a request as-is and return the raw body of a successful response.
    pub async fn send_request_raw(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let (status, body, url) = self.execute(request).await?;
        check_response(status, &body, &url)?;
        Ok(body)
    }

    /// Sign the request body with the secret key, then send it.
    pub async fn send_signed_request<T: DeserializeOwned>(
        &self,
        mut request: ApiRequest,
    ) -> Result<T> {
        self.sign_request(&mut request)?;
        self.send_request(request).await
    }

    /// Sign the request body with the secret key, send it, and return the raw body.
    pub async fn send_signed_request_raw(&self, mut request: ApiRequest) -> Result<Vec<u8>> {
        self.sign_request(&mut request)?;
        self.send_request_raw(request).await
    }

    /// Check whether the server is reachable with the configured options
    pub async fn ping(&self) -> Result<PingResponse> {
        let request = self.new_request("GET", "/ping")?;
        self.send_request(request).await
    }

    /// URL of the pay helper page for a payment
    pub fn pay_helper_url(&self, payment_id: &str) -> String {
        format!("{}://{}/pay/{}", self.scheme, self.host, payment_id)
    }

    async fn execute(&self, request: ApiRequest) -> Result<(StatusCode, Vec<u8>, String)> {
        let url = request.url.to_string();
        debug!(
            method = %request.method,
            url = %url,
            signed = request.headers.contains_key(SIGNATURE_HEADER),
            "sending DERO Merchant request"
        );

        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(status = status.as_u16(), url = %url, "received DERO Merchant response");

        Ok((status, body, url))
    }
}

/// A request to the DERO Merchant API, built by [`DeroMerchantClient::new_request`].
///
/// The JSON body is serialized exactly once; those bytes are both signed and sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Set a query parameter, replacing any previous value for `key`.
    ///
    /// The value is stringified with `Display`. Pairs are kept sorted by key.
    pub fn query(mut self, key: &str, value: impl Display) -> Self {
        let mut pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .into_owned()
            .filter(|(k, _)| k != key)
            .collect();
        pairs.push((key.to_string(), value.to_string()));
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        self.url.query_pairs_mut().clear().extend_pairs(pairs);
        self
    }

    /// Set the JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        let body = serde_json::to_vec(payload)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        self.body = Some(body);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full URL, query string included
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Serialized body, if any
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}
