//! Loading client and webhook options from files and the environment

use dero_merchant::{ClientOptions, DeroMerchantError, WebhookOptions};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

const CLIENT_VARS: [&str; 6] = [
    "DERO_MERCHANT_SCHEME",
    "DERO_MERCHANT_HOST",
    "DERO_MERCHANT_API_VERSION",
    "DERO_MERCHANT_API_KEY",
    "DERO_MERCHANT_SECRET_KEY",
    "DERO_MERCHANT_TIMEOUT_SECS",
];

const WEBHOOK_VARS: [&str; 3] = [
    "DERO_MERCHANT_WEBHOOK_SECRET_KEY",
    "DERO_MERCHANT_WEBHOOK_BODY_LIMIT",
    "DERO_MERCHANT_WEBHOOK_READ_TIMEOUT_SECS",
];

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn clear_vars(vars: &[&str]) {
    for var in vars {
        std::env::remove_var(var);
    }
}

#[test]
fn test_client_options_from_file() {
    let file = config_file(
        r#"{
            "scheme": "http",
            "host": "localhost:8080",
            "api_key": "bfe737bcdc5d8886",
            "secret_key": "b3cef2080cf82a01",
            "timeout_ms": 2500
        }"#,
    );

    let options = ClientOptions::from_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(options.base_url().unwrap(), "http://localhost:8080/api/v1");
    assert_eq!(options.api_key, "bfe737bcdc5d8886");
    assert_eq!(options.secret_key, "b3cef2080cf82a01");
    assert_eq!(options.timeout(), Duration::from_millis(2500));
}

#[test]
fn test_client_options_from_invalid_file() {
    let file = config_file(r#"{"scheme": "http", "host": "#);
    let error = ClientOptions::from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(
        error.to_string().contains("Failed to parse config file"),
        "unexpected error: {}",
        error
    );

    let file = config_file(r#"{"timeout_ms": 0}"#);
    let error = ClientOptions::from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(error, DeroMerchantError::Config { .. }));

    let error = ClientOptions::from_file("/nonexistent/dero-merchant.json").unwrap_err();
    assert!(error.to_string().contains("Failed to read config file"));
}

// Environment variables are process-wide, so every env case runs inside this one test.
#[test]
fn test_options_from_env() {
    clear_vars(&CLIENT_VARS);
    clear_vars(&WEBHOOK_VARS);

    let options = ClientOptions::from_env().unwrap();
    assert_eq!(options.base_url().unwrap(), "https://merchant.dero.io/api/v1");
    assert_eq!(options.timeout(), Duration::from_secs(10));

    std::env::set_var("DERO_MERCHANT_SCHEME", "http");
    std::env::set_var("DERO_MERCHANT_HOST", "localhost:8080");
    std::env::set_var("DERO_MERCHANT_API_VERSION", "v2");
    std::env::set_var("DERO_MERCHANT_API_KEY", "api-key");
    std::env::set_var("DERO_MERCHANT_SECRET_KEY", "aa11");
    std::env::set_var("DERO_MERCHANT_TIMEOUT_SECS", "0.75");
    let options = ClientOptions::from_env().unwrap();
    assert_eq!(options.base_url().unwrap(), "http://localhost:8080/api/v2");
    assert_eq!(options.api_key, "api-key");
    assert_eq!(options.secret_key, "aa11");
    assert_eq!(options.timeout(), Duration::from_millis(750));

    std::env::set_var("DERO_MERCHANT_TIMEOUT_SECS", "soon");
    let error = ClientOptions::from_env().unwrap_err();
    assert!(matches!(error, DeroMerchantError::Config { .. }));
    assert!(error.to_string().contains("DERO_MERCHANT_TIMEOUT_SECS"));

    std::env::set_var("DERO_MERCHANT_TIMEOUT_SECS", "0");
    assert!(matches!(
        ClientOptions::from_env(),
        Err(DeroMerchantError::Config { .. })
    ));
    clear_vars(&CLIENT_VARS);

    assert!(matches!(
        WebhookOptions::from_env(),
        Err(DeroMerchantError::Config { .. })
    ));

    std::env::set_var("DERO_MERCHANT_WEBHOOK_SECRET_KEY", "010f2b45384c57bd");
    std::env::set_var("DERO_MERCHANT_WEBHOOK_BODY_LIMIT", "4096");
    std::env::set_var("DERO_MERCHANT_WEBHOOK_READ_TIMEOUT_SECS", "1.5");
    let webhook = WebhookOptions::from_env().unwrap();
    assert_eq!(webhook.webhook_secret_key, "010f2b45384c57bd");
    assert_eq!(webhook.body_limit, 4096);
    assert_eq!(webhook.read_timeout(), Duration::from_millis(1500));

    std::env::set_var("DERO_MERCHANT_WEBHOOK_BODY_LIMIT", "lots");
    assert!(matches!(
        WebhookOptions::from_env(),
        Err(DeroMerchantError::Config { .. })
    ));

    std::env::set_var("DERO_MERCHANT_WEBHOOK_BODY_LIMIT", "4096");
    std::env::set_var("DERO_MERCHANT_WEBHOOK_SECRET_KEY", "not hex");
    assert!(matches!(
        WebhookOptions::from_env(),
        Err(DeroMerchantError::HexDecode(_))
    ));
    clear_vars(&WEBHOOK_VARS);
}
