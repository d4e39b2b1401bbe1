//! PSK-based admin authentication.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, ErrorDetails, ErrorResponse};

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// PSK authentication layer function that takes the expected PSK as a parameter.
pub async fn psk_auth_layer(
    expected_psk: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    if has_session(request.headers(), expected_psk.as_deref()) {
        return next.run(request).await;
    }

    let message = if provided_key(request.headers()).is_some() {
        "Invalid API key"
    } else {
        "Missing or invalid API key"
    };
    unauthorized_response(message)
}

/// Whether the request carries an admin session.
///
/// With no PSK configured every request counts as a session (dev mode).
pub fn has_session(headers: &HeaderMap, expected_psk: Option<&str>) -> bool {
    let Some(expected) = expected_psk else {
        return true;
    };

    provided_key(headers).is_some_and(|provided| constant_time_compare(&provided, expected))
}

/// Key from `x-api-key`, or from `Authorization: Bearer`.
fn provided_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
        .map(|s| s.to_string())
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    a_bytes.ct_eq(b_bytes).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
        },
        revision_id: 0,
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
    }

    #[test]
    fn test_has_session_dev_mode() {
        assert!(has_session(&HeaderMap::new(), None));
    }

    #[test]
    fn test_has_session_headers() {
        let mut headers = HeaderMap::new();
        assert!(!has_session(&headers, Some("secret")));

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("secret"));
        assert!(has_session(&headers, Some("secret")));
        assert!(!has_session(&headers, Some("other")));

        let mut bearer = HeaderMap::new();
        bearer.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer secret"));
        assert!(has_session(&bearer, Some("secret")));
    }
}
