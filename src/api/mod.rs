//! API module for HTTP handlers, middleware, and DTOs.
//!
//! Exposes `GET /` (health) and `POST /` (notify) behind an optional API key.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
