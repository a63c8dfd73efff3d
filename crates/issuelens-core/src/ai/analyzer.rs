// SPDX-License-Identifier: Apache-2.0

//! Issue analysis.
//!
//! [`Analyzer::analyze`] never fails: a missing credential, a provider error,
//! or unusable output all degrade to a fallback [`AnalysisResult`].

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, instrument, warn};

use super::gemini::GeminiClient;
use super::prompt::{SYSTEM_INSTRUCTION, build_user_prompt};
use super::provider::LlmProvider;
use super::sanitize::{fallback, sanitize};
use super::types::AnalysisResult;
use crate::config::AiConfig;
use crate::error::IssueLensError;

/// Summary reported when no LLM credential was configured at startup.
pub const MISSING_KEY_SUMMARY: &str = "Server Error: LLM API key not configured";

/// Classifies issue text with an LLM provider.
#[derive(Clone)]
pub struct Analyzer {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl Analyzer {
    /// Creates an analyzer backed by `provider`.
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Creates an analyzer with no provider; every analysis returns the
    /// missing-key fallback.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    /// Creates a Gemini-backed analyzer, or an unconfigured one when no API
    /// key is available.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the HTTP client cannot be built.
    pub fn from_config(
        config: &AiConfig,
        api_key: Option<SecretString>,
    ) -> Result<Self, IssueLensError> {
        let Some(api_key) = api_key else {
            warn!("No LLM API key configured; analyses will return a fallback result");
            return Ok(Self::unconfigured());
        };

        let client = GeminiClient::new(config, api_key).map_err(|e| IssueLensError::Internal {
            message: format!("{e:#}"),
        })?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Whether a provider is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Classifies `issue_text`, making at most one provider call.
    #[instrument(skip_all, fields(chars = issue_text.len()))]
    pub async fn analyze(&self, issue_text: &str) -> AnalysisResult {
        let Some(provider) = &self.provider else {
            return fallback(MISSING_KEY_SUMMARY);
        };

        let prompt = build_user_prompt(issue_text);
        debug!(provider = provider.name(), model = provider.model(), "Requesting analysis");

        match provider.generate(SYSTEM_INSTRUCTION, &prompt).await {
            Ok(text) => sanitize(&text),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "LLM call failed; returning fallback");
                fallback(&format!("LLM API Error: {e:#}"))
            }
        }
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}
