use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::endpoints::{AssistantRequest, AssistantResponse, ChatMessage, DEFAULT_ENDPOINT};

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Assistant API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Thin client for the completion endpoint. No retries, no timeout beyond
/// the HTTP client's defaults.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    client: Client,
    endpoint: String,
}

impl Default for AssistantClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl AssistantClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts the whole message list and returns the completion text.
    pub async fn send(&self, messages: &[ChatMessage]) -> Result<String, AssistantError> {
        debug!("Posting {} messages to {}", messages.len(), self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&AssistantRequest { messages })
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.json::<AssistantResponse>().await?;
            Ok(body.completion)
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(AssistantError::Api { status, body })
        }
    }
}
