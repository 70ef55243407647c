//! Error message and classification tests for the DERO Merchant client

use dero_merchant::{ApiError, ClientOptions, DeroMerchantClient, DeroMerchantError, WebhookOptions};

#[test]
fn test_api_error_message() {
    let error = DeroMerchantError::from(ApiError::new(422, "Unprocessable Entity"));

    let error_msg = error.to_string();
    assert!(
        error_msg.starts_with("DeroMerchant Client: API Error 422"),
        "Error message MUST carry the prefix and code - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("Unprocessable Entity"),
        "Error message MUST contain the server message - actual: {}",
        error_msg
    );
}

#[test]
fn test_page_not_found_message() {
    let error = DeroMerchantError::PageNotFound {
        url: "https://merchant.dero.io/api/v1/nope".to_string(),
    };

    let error_msg = error.to_string();
    assert_eq!(
        error_msg,
        "DeroMerchant Client: error 404: page https://merchant.dero.io/api/v1/nope not found"
    );
    assert!(error.is_transport_error());
    assert!(!error.is_api_error());
}

#[test]
fn test_unexpected_status_message() {
    let error = DeroMerchantError::UnexpectedStatus {
        status: 502,
        url: "https://merchant.dero.io/api/v1/ping".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "DeroMerchant Client: error 502 returned by https://merchant.dero.io/api/v1/ping"
    );
    assert_eq!(error.status(), Some(502));
}

#[test]
fn test_webhook_error_messages() {
    let error_msg = DeroMerchantError::NoWebhookSignature.to_string();
    assert!(
        error_msg.contains("no signature header"),
        "Error message MUST mention the missing header - actual: {}",
        error_msg
    );

    let error_msg = DeroMerchantError::InvalidWebhookSignature.to_string();
    assert!(
        error_msg.contains("invalid signature"),
        "Error message MUST mention the invalid signature - actual: {}",
        error_msg
    );
}

#[test]
fn test_webhook_auth_classification() {
    assert!(DeroMerchantError::NoWebhookSignature.is_webhook_auth_error());
    assert!(DeroMerchantError::InvalidWebhookSignature.is_webhook_auth_error());
    assert!(!DeroMerchantError::webhook_body("closed").is_webhook_auth_error());
    assert!(!DeroMerchantError::from(ApiError::new(401, "Unauthorized")).is_webhook_auth_error());
}

#[test]
fn test_invalid_client_configuration() {
    let result = DeroMerchantClient::new(ClientOptions::new("key", "secret").with_host(""));
    assert!(result.is_ok(), "empty host falls back to the default host");

    let error = DeroMerchantClient::new(ClientOptions::new("key", "secret").with_host("bad host"))
        .unwrap_err();
    assert!(
        matches!(error, DeroMerchantError::Config { .. } | DeroMerchantError::InvalidUrl(_)),
        "unexpected error: {:?}",
        error
    );
}

#[test]
fn test_invalid_webhook_configuration() {
    let error = WebhookOptions::new("0x12").validate().unwrap_err();
    assert!(matches!(error, DeroMerchantError::HexDecode(_)));

    let error = WebhookOptions::new("abcd").with_body_limit(0).validate().unwrap_err();
    assert!(error.to_string().contains("body limit"));
}

#[test]
fn test_options_debug_redacts_secret() {
    let options = ClientOptions::new("api-key", "very-secret");
    let debug = format!("{:?}", options);
    assert!(!debug.contains("very-secret"));
}
