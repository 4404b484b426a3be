//! Notification endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::api::dto::{NotifyRequest, ResponsePayload};
use crate::api::middleware::{ApiFailure, CurrentRequestId};
use crate::state::AppState;

/// `POST /`: relay a message to the requested or configured recipients.
///
/// The body is decoded from raw bytes, so a missing `Content-Type` is accepted.
/// The dispatch is cancelled when the request is dropped (client gone or
/// server timeout) and when the server shuts down.
///
/// # Responses
/// - `200 OK` - Delivered to every recipient
/// - `400 Bad Request` - Missing or malformed body, empty recipients, bad
///   parse mode, or the provider rejected at least one delivery
/// - `422 Unprocessable Entity` - Empty or oversized message
/// - `500 Internal Server Error` - Delivery failed for other reasons
pub async fn notify(
    State(state): State<AppState>,
    CurrentRequestId(request_id): CurrentRequestId,
    body: Bytes,
) -> Response {
    if body.is_empty() {
        return ApiFailure::bad_request("no body was provided")
            .with_request_id(request_id)
            .into_response();
    }

    let request: NotifyRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            return ApiFailure::bad_request(err.to_string())
                .with_request_id(request_id)
                .into_response();
        }
    };

    let recipients = request.recipients.as_deref().unwrap_or(&state.recipients[..]);

    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    match state
        .notifier
        .send_message(&cancel, &request.message, &request.parse_mode, recipients)
        .await
    {
        Ok(()) => {
            info!(recipients = recipients.len(), "Notification delivered");
            (StatusCode::OK, Json(ResponsePayload::success(request_id))).into_response()
        }
        Err(err) => {
            let failure = ApiFailure::from(&err).with_request_id(request_id);
            warn!(status = %failure.status(), error = %err, "Notification failed");
            failure.into_response()
        }
    }
}
