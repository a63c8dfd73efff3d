// SPDX-License-Identifier: Apache-2.0

//! Google AI Studio (Gemini) API client for issue analysis.
//!
//! Talks to the OpenAI-compatible chat completions endpoint so the request and
//! response shapes stay provider-neutral.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use super::provider::LlmProvider;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};
use crate::config::AiConfig;

/// Google AI Studio (Gemini) API client.
///
/// Holds HTTP client, API key, and model configuration for reuse across multiple requests.
pub struct GeminiClient {
    /// HTTP client with configured timeout.
    http: Client,
    /// Chat completions endpoint.
    api_url: String,
    /// API key for Gemini authentication.
    api_key: SecretString,
    /// Model name (e.g., "gemini-flash-lite-latest").
    model: String,
    /// Maximum tokens for API responses.
    max_tokens: u32,
    /// Temperature for API requests.
    temperature: f32,
}

impl GeminiClient {
    /// Creates a new Gemini client with a provided API key.
    ///
    /// # Arguments
    ///
    /// * `config` - AI configuration with endpoint, model, timeout, and sampling settings
    /// * `api_key` - API key resolved at startup
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: &AiConfig, api_key: SecretString) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(mut value) =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose_secret()))
        {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    fn build_request(&self, system: &str, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
            response_format: Some(ResponseFormat {
                format_type: "json_object".to_string(),
            }),
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        }
    }

    /// Sends a chat completion request (single attempt, no retry).
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, 401 (invalid key), 429 (rate
    /// limited), any other non-success status, or an undecodable body.
    async fn send_request(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let response = self
            .http
            .post(&self.api_url)
            .headers(self.build_headers())
            .json(request)
            .send()
            .await
            .context(format!("Failed to send request to {} API", self.name()))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 401 {
                anyhow::bail!(
                    "Invalid {} API key. Check your GOOGLE_API_KEY environment variable.",
                    self.name()
                );
            } else if status.as_u16() == 429 {
                warn!("Rate limited by {} API", self.name());
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(0);
                anyhow::bail!(
                    "Rate limited by {} API (retry after {retry_after}s)",
                    self.name()
                );
            }
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "{} API error (HTTP {}): {}",
                self.name(),
                status.as_u16(),
                error_body
            );
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context(format!("Failed to parse {} API response", self.name()))?;

        Ok(completion)
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip_all, fields(provider = "Gemini"))]
    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let request = self.build_request(system, prompt);
        let completion = self.send_request(&request).await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .context("No response from AI model")?;

        debug!(chars = content.len(), "Received model response");
        Ok(content)
    }
}
