use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::message::ChatRequest;
use crate::constants::MAX_ERROR_BODY_LEN;
use crate::utils::truncate_str;

/// The only failure the client knows about.
///
/// Network errors, non-2xx statuses and undecodable bodies all collapse into
/// this; the cause text is kept for the log and never shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    RequestFailed(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        ChatError::RequestFailed(e.to_string())
    }
}

/// Something that turns a conversation into one reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<String, ChatError>;
}

/// Response body: `{ "reply": "..." }`. Other fields are ignored.
#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

/// JSON-over-HTTP backend: one `POST` per exchange.
pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

impl HttpBackend {
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ChatError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, request: &ChatRequest) -> Result<String, ChatError> {
        debug!(endpoint = %self.endpoint, messages = request.messages.len(), "POST chat");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::RequestFailed(format!(
                "HTTP {}: {}",
                status,
                truncate_str(&body, MAX_ERROR_BODY_LEN)
            )));
        }

        let reply: ChatReply = response.json().await?;
        Ok(reply.reply)
    }
}
