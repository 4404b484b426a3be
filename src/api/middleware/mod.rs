//! Middleware components for request processing.
//!
//! This module contains middleware for logging, request ID tracking,
//! API key authentication and the error-to-response mapping.

mod api_key;
mod error_handler;
mod logging;
mod request_id;

pub use api_key::{API_KEY_COOKIE, API_KEY_HEADER, ApiKeyAuth, api_key_middleware};
pub use error_handler::{ApiFailure, notify_error_status};
pub use logging::logging_middleware;
pub use request_id::{CurrentRequestId, REQUEST_ID_HEADER, RequestId, request_id_middleware};
