use serde::{Deserialize, Serialize};

/// Body of `POST /`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyRequest {
    /// Message body, a missing field behaves like an empty message
    #[serde(default)]
    pub message: String,

    /// `MarkdownV2`, `HTML`, `Markdown` or empty for plain text
    #[serde(default)]
    pub parse_mode: String,

    /// Overrides the configured recipients when present, even if empty
    #[serde(default)]
    pub recipients: Option<Vec<String>>,
}

/// Response of every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    #[serde(
        rename = "requestId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_id: Option<String>,

    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponsePayload {
    pub fn success(request_id: Option<String>) -> Self {
        Self {
            request_id,
            success: true,
            error: None,
        }
    }

    pub fn failure(request_id: Option<String>, error: impl Into<String>) -> Self {
        Self {
            request_id,
            success: false,
            error: Some(error.into()),
        }
    }
}
