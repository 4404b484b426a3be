//! Conversion of failures into HTTP responses.
//!
//! # Status Code Mapping
//! - `RecipientsEmpty`, `ParseModeInvalid` → 400 BAD_REQUEST
//! - `MessageEmpty`, `MessageTooLong` → 422 UNPROCESSABLE_ENTITY
//! - Delivery failures containing a provider API error → 400 BAD_REQUEST
//! - Any other delivery failure or cancellation → 500 INTERNAL_SERVER_ERROR

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ResponsePayload;
use crate::telegram::{NotifyError, ValidationError};

/// Status code for a failed notification.
pub fn notify_error_status(err: &NotifyError) -> StatusCode {
    match err {
        NotifyError::Validation(
            ValidationError::RecipientsEmpty | ValidationError::ParseModeInvalid(_),
        ) => StatusCode::BAD_REQUEST,
        NotifyError::Validation(
            ValidationError::MessageEmpty | ValidationError::MessageTooLong { .. },
        ) => StatusCode::UNPROCESSABLE_ENTITY,
        NotifyError::Delivery(errors) if errors.has_api_error() => StatusCode::BAD_REQUEST,
        NotifyError::Delivery(_) | NotifyError::Cancelled => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error response rendered as a [`ResponsePayload`] with `success: false`.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
    request_id: Option<String>,
}

impl ApiFailure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            request_id: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Authentication Required")
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Authorization failed")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&NotifyError> for ApiFailure {
    fn from(err: &NotifyError) -> Self {
        Self::new(notify_error_status(err), err.to_string())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ResponsePayload::failure(self.request_id, self.message)),
        )
            .into_response()
    }
}
