//! API key authentication middleware.
//!
//! The key is read from the `X-API-KEY` header, or from the `X-API-KEY`
//! cookie when the header is absent. Both sides are hashed with SHA-256
//! before a constant-time comparison.

use std::fmt;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};
use tracing::warn;

use super::{ApiFailure, RequestId};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Cookie carrying the API key when the header is absent.
pub const API_KEY_COOKIE: &str = "X-API-KEY";

/// Expected API key, stored as its digest. Disabled when no key is configured.
#[derive(Clone, Default)]
pub struct ApiKeyAuth {
    expected: Option<[u8; 32]>,
}

impl fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl ApiKeyAuth {
    /// Authentication is disabled when `api_key` is empty.
    pub fn new(api_key: &str) -> Self {
        Self {
            expected: (!api_key.is_empty()).then(|| digest(api_key)),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    /// Compare a presented key against the configured one.
    pub fn verify(&self, candidate: &str) -> bool {
        match &self.expected {
            Some(expected) => constant_time_eq(expected, &digest(candidate)),
            None => true,
        }
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Key presented by the client, header first, then cookie.
fn presented_key(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    from_header
        .or_else(|| cookie_value(headers, API_KEY_COOKIE))
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
}

/// Rejects requests without a valid API key.
///
/// # Errors
/// - 401 Unauthorized when no key is presented
/// - 403 Forbidden when the key does not match
///
/// # Example
/// ```ignore
/// Router::new()
///     .route("/", post(notify))
///     .layer(middleware::from_fn_with_state(ApiKeyAuth::new(&key), api_key_middleware))
/// ```
pub async fn api_key_middleware(
    State(auth): State<ApiKeyAuth>,
    request: Request,
    next: Next,
) -> Response {
    if !auth.is_enabled() {
        return next.run(request).await;
    }

    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());

    match presented_key(request.headers()) {
        None => {
            warn!(path = %request.uri().path(), "Request without API key rejected");
            ApiFailure::unauthorized()
                .with_request_id(request_id)
                .into_response()
        }
        Some(key) if !auth.verify(&key) => {
            warn!(path = %request.uri().path(), "Request with invalid API key rejected");
            ApiFailure::forbidden()
                .with_request_id(request_id)
                .into_response()
        }
        Some(_) => next.run(request).await,
    }
}
