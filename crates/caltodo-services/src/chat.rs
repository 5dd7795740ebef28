//! Chat endpoint client and message types.

use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::error::ServiceError;
use crate::http::{endpoint, handle_response, parse_base_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the conversation, as the backend expects it in `history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp,
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
}

/// Reply body. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    pub message: Option<String>,
    pub success: Option<bool>,
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: &str, client: reqwest::Client) -> Result<Self, ServiceError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Post one user message with its trailing history.
    #[instrument(skip(self, request), level = "info", fields(history = request.history.len()))]
    pub async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, ServiceError> {
        let url = endpoint(&self.base_url, "/api/chat/message")?;

        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json; charset=utf-8")
            .json(request)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Ask the chat endpoint whether the service is up.
    #[instrument(skip(self), level = "debug")]
    pub async fn status(&self) -> Result<bool, ServiceError> {
        let url = endpoint(&self.base_url, "/api/chat/message")?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Ok(false);
        }
        let body: ChatResponse = handle_response(response).await?;
        Ok(body.success.unwrap_or(true))
    }
}
