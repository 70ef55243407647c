//! Axum integration for receiving DERO Merchant webhooks
//!
//! [`verify_webhook_middleware`] buffers the body once, checks its signature and
//! hands the identical bytes on to the handler. [`VerifiedPaymentUpdate`] does the
//! same as an extractor and yields the parsed event.

use crate::config::WebhookOptions;
use crate::types::{ErrorResponse, PaymentUpdateEvent};
use crate::webhook::WebhookVerifier;
use crate::{DeroMerchantError, Result};
use ::axum::{
    body::{to_bytes, Body, Bytes},
    extract::{FromRef, FromRequest, Request, State},
    handler::Handler,
    http::StatusCode,
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::debug;

impl IntoResponse for DeroMerchantError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NoWebhookSignature | Self::InvalidWebhookSignature => StatusCode::UNAUTHORIZED,
            Self::HexDecode(_) | Self::Json(_) | Self::WebhookBody { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Api(err) => u16::try_from(err.code)
                .ok()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .filter(|status| status.is_client_error() || status.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            err if err.is_transport_error() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            Self::Api(err) => ErrorResponse { error: err },
            other => ErrorResponse::new(i64::from(status.as_u16()), other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Shared state for webhook verification
#[derive(Debug, Clone)]
pub struct WebhookState {
    pub verifier: Arc<WebhookVerifier>,
    pub body_limit: usize,
    pub read_timeout: Duration,
}

impl WebhookState {
    /// Validate `options` and build the state from them
    pub fn new(options: &WebhookOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            verifier: Arc::new(WebhookVerifier::new(&options.webhook_secret_key)?),
            body_limit: options.body_limit,
            read_timeout: options.read_timeout(),
        })
    }

    async fn buffer_body(&self, body: Body) -> Result<Bytes> {
        match tokio::time::timeout(self.read_timeout, to_bytes(body, self.body_limit)).await {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(err)) => Err(DeroMerchantError::webhook_body(err.to_string())),
            Err(_) => Err(DeroMerchantError::webhook_body(format!(
                "timed out after {:?}",
                self.read_timeout
            ))),
        }
    }
}

/// Axum middleware rejecting webhook requests whose signature does not match the body.
///
/// The handler behind it receives the same body bytes that were verified.
pub async fn verify_webhook_middleware(
    State(state): State<WebhookState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let (parts, body) = request.into_parts();
    let bytes = state.buffer_body(body).await?;

    state.verifier.verify(&parts.headers, &bytes)?;
    debug!(uri = %parts.uri, len = bytes.len(), "verified webhook signature");

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

/// Extractor yielding a payment update whose signature has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPaymentUpdate(pub PaymentUpdateEvent);

impl<S> FromRequest<S> for VerifiedPaymentUpdate
where
    WebhookState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = DeroMerchantError;

    async fn from_request(request: Request, state: &S) -> Result<Self> {
        let state = WebhookState::from_ref(state);
        let (parts, body) = request.into_parts();
        let bytes = state.buffer_body(body).await?;

        let event = state.verifier.verify_and_parse(&parts.headers, &bytes)?;
        debug!(payment_id = %event.payment_id, status = %event.status, "received payment update");
        Ok(Self(event))
    }
}

/// Router accepting signed webhook POSTs on `path` and passing them to `handler`.
pub fn webhook_router<H, T>(path: &str, options: &WebhookOptions, handler: H) -> Result<Router>
where
    H: Handler<T, WebhookState>,
    T: 'static,
{
    let state = WebhookState::new(options)?;

    Ok(Router::new()
        .route(path, post(handler))
        .layer(from_fn_with_state(state.clone(), verify_webhook_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
