//! Chat-completion backend
//!
//! `CompletionBackend` is the seam between the grading pipeline and the
//! network. `DeepSeekClient` is the production implementation; tests swap in
//! fakes.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::error::{JudgeError, GENERIC_UPSTREAM_ERROR};
use crate::schemas::deepseek::{ChatCompletionRequest, ChatCompletionResponse, UpstreamErrorBody};
use crate::utils::{string::LOG_PREVIEW_CHARS, truncate_with_suffix};

/// Sends one chat-completion request and returns the raw reply text
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Returns the content of the first choice
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<String, JudgeError>;
}

/// reqwest client for the DeepSeek chat-completion endpoint
#[derive(Clone)]
pub struct DeepSeekClient {
    client: Client,
    url: String,
}

impl DeepSeekClient {
    /// Create a new client from upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self, JudgeError> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        tracing::info!(
            url = %config.completions_url(),
            model = %config.model,
            timeout_seconds = ?config.timeout_seconds,
            "Initialized DeepSeek client"
        );

        Ok(Self {
            client,
            url: config.completions_url(),
        })
    }
}

#[async_trait]
impl CompletionBackend for DeepSeekClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<String, JudgeError> {
        tracing::debug!(
            url = %self.url,
            model = %request.model,
            messages = request.messages.len(),
            "Calling chat completions API"
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UpstreamErrorBody>(&error_text)
                .ok()
                .and_then(|body| body.message().map(str::to_string))
                .unwrap_or_else(|| GENERIC_UPSTREAM_ERROR.to_string());

            return Err(JudgeError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let response_text = response.text().await?;

        let body: ChatCompletionResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(
                error = %e,
                body = %truncate_with_suffix(&response_text, LOG_PREVIEW_CHARS, "..."),
                "Failed to parse chat completions response"
            );
            JudgeError::MalformedResponse(e.to_string())
        })?;

        body.first_content().map(str::to_string).ok_or_else(|| {
            JudgeError::MalformedResponse(format!(
                "no message content in {} choice(s)",
                body.choices.len()
            ))
        })
    }
}
