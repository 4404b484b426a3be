//! Data Transfer Objects for API requests and responses.

mod notify;

pub use notify::{NotifyRequest, ResponsePayload};
