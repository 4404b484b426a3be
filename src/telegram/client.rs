//! HTTP client for the Telegram Bot API.
//!
//! One [`Bot`] wraps a pooled `reqwest::Client` and the token-bearing
//! endpoint. Cloning is cheap, so delivery tasks own their own handle.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::error::{ApiError, BotInitError, ProviderError};
use super::types::{ApiResponse, BotIdentity, ParseMode, SendMessagePayload};

/// Production Bot API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Per-request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const SEND_MESSAGE: &str = "sendMessage";
const GET_ME: &str = "getMe";

/// Telegram bot handle bound to one token.
#[derive(Clone)]
pub struct Bot {
    http: reqwest::Client,
    /// `{api_base}/bot{token}`, every method URL is derived from it
    endpoint: Arc<Url>,
    api_base: Arc<str>,
}

impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Builder for [`Bot`].
#[derive(Debug)]
pub struct BotBuilder {
    token: String,
    api_base: String,
    timeout: Duration,
    client: Option<reqwest::Client>,
}

impl BotBuilder {
    /// Override the API base URL, mostly useful for pointing at a mock server.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Per-request timeout. Ignored when a custom client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use an existing HTTP client instead of building one.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<Bot, BotInitError> {
        if self.token.trim().is_empty() {
            return Err(BotInitError::EmptyToken);
        }

        let mut endpoint =
            Url::parse(&self.api_base).map_err(|e| BotInitError::InvalidApiBase {
                url: self.api_base.clone(),
                message: e.to_string(),
            })?;
        endpoint
            .path_segments_mut()
            .map_err(|_| BotInitError::InvalidApiBase {
                url: self.api_base.clone(),
                message: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .push(&format!("bot{}", self.token));

        let http = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(self.timeout)
                .connect_timeout(CONNECT_TIMEOUT)
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .map_err(BotInitError::Client)?,
        };

        Ok(Bot {
            http,
            endpoint: Arc::new(endpoint),
            api_base: Arc::from(self.api_base),
        })
    }
}

impl Bot {
    /// Create a bot with the default API base and timeout.
    pub fn new(token: impl Into<String>) -> Result<Self, BotInitError> {
        Self::builder(token).build()
    }

    pub fn builder(token: impl Into<String>) -> BotBuilder {
        BotBuilder {
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Deliver one message to one recipient.
    pub async fn send_one(
        &self,
        cancel: &CancellationToken,
        recipient: &str,
        text: &str,
        parse_mode: ParseMode,
    ) -> Result<(), ProviderError> {
        let payload = SendMessagePayload {
            chat_id: recipient,
            text,
            parse_mode: parse_mode.as_api_str(),
        };
        debug!(recipient = %recipient, parse_mode = %parse_mode, "Sending message");

        let request = self.http.post(self.method_url(SEND_MESSAGE)).json(&payload);
        self.execute::<IgnoredAny>(cancel, SEND_MESSAGE, request)
            .await
            .map(|_| ())
    }

    /// Fetch the identity behind the token, rejecting non-bot accounts.
    pub async fn get_me(&self, cancel: &CancellationToken) -> Result<BotIdentity, ProviderError> {
        let request = self.http.get(self.method_url(GET_ME));
        let response = self.execute::<BotIdentity>(cancel, GET_ME, request).await?;
        let identity = response.result.ok_or_else(|| {
            ProviderError::Decode(<serde_json::Error as serde::de::Error>::missing_field(
                "result",
            ))
        })?;

        if !identity.is_bot {
            return Err(ProviderError::NotABot);
        }
        Ok(identity)
    }

    pub(crate) fn method_url(&self, method: &str) -> Url {
        let mut url = Url::clone(&self.endpoint);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(method);
        }
        url
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        method: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, ProviderError> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProviderError::Cancelled),
            result = round_trip::<T>(method, request) => result,
        }
    }
}

async fn round_trip<T: DeserializeOwned>(
    method: &str,
    request: RequestBuilder,
) -> Result<ApiResponse<T>, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.without_url()))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| ProviderError::Network(e.without_url()))?;

    let envelope: ApiResponse<T> =
        serde_json::from_slice(&body).map_err(ProviderError::Decode)?;

    if !envelope.ok {
        return Err(ApiError {
            code: envelope
                .error_code
                .unwrap_or_else(|| i64::from(status.as_u16())),
            method: method.to_string(),
            description: envelope.description.unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            }),
        }
        .into());
    }

    Ok(envelope)
}
