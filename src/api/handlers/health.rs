//! Health check endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::dto::ResponsePayload;
use crate::api::middleware::{ApiFailure, CurrentRequestId};
use crate::state::AppState;

/// `GET /`: healthy when the provider confirms the bot identity.
///
/// # Responses
/// - `200 OK` - Identity check succeeded
/// - `500 Internal Server Error` - Identity check failed
pub async fn health_check(
    State(state): State<AppState>,
    CurrentRequestId(request_id): CurrentRequestId,
) -> Response {
    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    match state.notifier.get_me(&cancel).await {
        Ok(_) => (StatusCode::OK, Json(ResponsePayload::success(request_id))).into_response(),
        Err(err) => {
            warn!(error = %err, "Health check failed");
            ApiFailure::internal(err.to_string())
                .with_request_id(request_id)
                .into_response()
        }
    }
}
