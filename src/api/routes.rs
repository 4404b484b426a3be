//! Router configuration for the API.

use std::time::Duration;

use axum::{Router, middleware, routing::get};
use tower_http::timeout::TimeoutLayer;

use crate::api::handlers::{health::health_check, notify::notify};
use crate::api::middleware::{
    ApiKeyAuth, api_key_middleware, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID
/// 2. Logging
/// 3. Timeout, answering 408 once `request_timeout` elapses
/// 4. API key authentication
///
/// # Routes
/// - `GET /` - Health check
/// - `POST /` - Notify
pub fn create_router(state: AppState, auth: ApiKeyAuth, request_timeout: Duration) -> Router {
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(request_timeout);

    Router::new()
        .route("/", get(health_check).post(notify))
        .layer(middleware::from_fn_with_state(auth, api_key_middleware))
        .layer(timeout)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::api::dto::ResponsePayload;
    use crate::api::handlers::test_support::{post, read_payload, state_with};
    use crate::api::middleware::{API_KEY_HEADER, REQUEST_ID_HEADER};
    use crate::telegram::mock::MockNotifier;

    fn router(api_key: &str) -> Router {
        create_router(
            state_with(Arc::new(MockNotifier::new()), &["1"]),
            ApiKeyAuth::new(api_key),
            Duration::from_secs(30),
        )
    }

    fn notify_request() -> axum::http::request::Builder {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
    }

    const BODY: &str = r#"{"message":"hello"}"#;

    #[tokio::test]
    async fn test_no_api_key_configured_passes_through() {
        let response = router("").oneshot(post(r#"{"message":"hello"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_unauthorized() {
        let response = router("SECRET")
            .oneshot(post(r#"{"message":"hello"}"#))
            .await
            .unwrap();

        let (status, payload) = read_payload(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(payload.error.as_deref(), Some("Authentication Required"));
        assert!(payload.request_id.is_some());
    }

    #[tokio::test]
    async fn test_wrong_api_key_is_forbidden() {
        let response = router("SECRET")
            .oneshot(
                notify_request()
                    .header(API_KEY_HEADER, "WRONG")
                    .body(Body::from(BODY))
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, payload) = read_payload(response).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(payload.error.as_deref(), Some("Authorization failed"));
    }

    #[tokio::test]
    async fn test_valid_api_key_header() {
        let response = router("SECRET")
            .oneshot(
                notify_request()
                    .header(API_KEY_HEADER, "SECRET")
                    .body(Body::from(BODY))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_valid_api_key_cookie() {
        let response = router("SECRET")
            .oneshot(
                notify_request()
                    .header(header::COOKIE, "X-API-KEY=SECRET")
                    .body(Body::from(BODY))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_is_guarded_too() {
        let response = router("SECRET")
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = router("")
            .oneshot(
                notify_request()
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::from(BODY))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");
        let (status, payload) = read_payload(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload, ResponsePayload::success(Some("req-42".to_string())));
    }

    #[tokio::test]
    async fn test_unknown_method_not_allowed() {
        let response = router("")
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
