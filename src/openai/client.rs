use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::openai::CompletionResponse;

pub const DEFAULT_API_HOSTNAME: &str = "https://api.openai.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60 * 10);

/// Everything that can go wrong between handing over a request body
/// and getting a decoded completion back. The chat loop collapses all
/// of these into a single "couldn't fetch results" failure.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no choices")]
    NoChoices,
}

/// Sends a serialized chat request and returns the decoded reply.
/// Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        body: Vec<u8>,
        api_key: &str,
    ) -> Result<CompletionResponse, TransportError>;
}

/// `Transport` backed by the OpenAI chat completions HTTP API.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    client: reqwest::Client,
    url: String,
}

impl OpenAiClient {
    pub fn new(api_hostname: &str) -> Self {
        let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_HOSTNAME)
    }
}

#[async_trait]
impl Transport for OpenAiClient {
    async fn send(
        &self,
        body: Vec<u8>,
        api_key: &str,
    ) -> Result<CompletionResponse, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .body(body)
            .send()
            .await?;

        tracing::debug!("Completion response status: {}", response.status());

        // Read the whole body first so a bad payload can be told apart
        // from a failed connection in the logs. Debug only, the user
        // gets a single error line.
        let bytes = response.bytes().await?;
        let completion =
            serde_json::from_slice::<CompletionResponse>(&bytes).inspect_err(|e| {
                tracing::debug!(
                    "Parsing completion failed for {}\nError:{}",
                    String::from_utf8_lossy(&bytes),
                    e
                )
            })?;

        Ok(completion)
    }
}
