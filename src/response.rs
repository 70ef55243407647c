//! Interpretation of DERO Merchant API responses

use crate::types::ErrorResponse;
use crate::{DeroMerchantError, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Map a non-2xx response to the matching error.
///
/// A body carrying the service's error envelope becomes [`DeroMerchantError::Api`].
/// Anything else (proxies, gateways, empty bodies) becomes a transport error naming `url`.
pub fn check_response(status: StatusCode, body: &[u8], url: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(envelope) => {
            warn!(
                status = status.as_u16(),
                code = envelope.error.code,
                url,
                "DERO Merchant API returned an error"
            );
            Err(DeroMerchantError::Api(envelope.error))
        }
        Err(_) if status == StatusCode::NOT_FOUND => {
            warn!(url, "DERO Merchant page not found");
            Err(DeroMerchantError::PageNotFound {
                url: url.to_string(),
            })
        }
        Err(_) => {
            warn!(status = status.as_u16(), url, "unexpected DERO Merchant response");
            Err(DeroMerchantError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }
}

/// Decode a response body into `T`, checking the status first.
pub fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
    url: &str,
) -> Result<T> {
    check_response(status, body, url)?;
    serde_json::from_slice(body).map_err(DeroMerchantError::MalformedResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PingResponse;
    use crate::ApiError;

    const URL: &str = "http://localhost:8080/api/v1/ping";

    #[test]
    fn test_success_body_is_decoded() {
        let ping: PingResponse =
            decode_response(StatusCode::OK, br#"{"ping":"pong"}"#, URL).unwrap();
        assert_eq!(ping.ping, "pong");

        let created: PingResponse =
            decode_response(StatusCode::CREATED, br#"{"ping":"pong"}"#, URL).unwrap();
        assert_eq!(created.ping, "pong");
    }

    #[test]
    fn test_malformed_success_body() {
        let result: Result<PingResponse> = decode_response(StatusCode::OK, b"<html>", URL);
        let err = result.unwrap_err();
        assert!(matches!(err, DeroMerchantError::MalformedResponse(_)));
        assert!(err.is_transport_error());
    }

    #[test]
    fn test_error_envelope_becomes_api_error() {
        let result: Result<PingResponse> = decode_response(
            StatusCode::FORBIDDEN,
            br#"{"error":{"code":403,"message":"Forbidden"}}"#,
            URL,
        );

        match result {
            Err(DeroMerchantError::Api(err)) => assert_eq!(err, ApiError::new(403, "Forbidden")),
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_envelope_on_404_is_still_api_error() {
        let err = check_response(
            StatusCode::NOT_FOUND,
            br#"{"error":{"code":404,"message":"Payment not found"}}"#,
            URL,
        )
        .unwrap_err();
        assert!(err.is_api_error());
    }

    #[test]
    fn test_not_found_without_envelope() {
        let err = check_response(StatusCode::NOT_FOUND, b"404 page not found", URL).unwrap_err();
        match &err {
            DeroMerchantError::PageNotFound { url } => assert_eq!(url, URL),
            other => panic!("expected page not found, got {:?}", other),
        }
        assert!(err.to_string().contains(URL));
    }

    #[test]
    fn test_other_status_without_envelope() {
        let err = check_response(StatusCode::METHOD_NOT_ALLOWED, b"", URL).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("DeroMerchant Client: error 405 returned by {}", URL)
        );
    }

    #[test]
    fn test_success_status_range() {
        assert!(check_response(StatusCode::NO_CONTENT, b"", URL).is_ok());
        assert!(check_response(StatusCode::from_u16(299).unwrap(), b"", URL).is_ok());
        assert!(check_response(StatusCode::from_u16(300).unwrap(), b"", URL).is_err());
        assert!(check_response(StatusCode::from_u16(199).unwrap(), b"", URL).is_err());
    }
}
