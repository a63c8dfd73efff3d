// SPDX-License-Identifier: Apache-2.0

//! LLM provider trait.
//!
//! The analyzer talks to the model only through [`LlmProvider`], so tests can
//! substitute a recording fake and new backends slot in without touching the
//! prompt or sanitizer.

use anyhow::Result;
use async_trait::async_trait;

/// A text-generation backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the name of this provider (used in logs and error messages).
    fn name(&self) -> &str;

    /// Returns the model identifier used for requests.
    fn model(&self) -> &str;

    /// Sends one system instruction plus one user prompt and returns the raw
    /// text of the model's reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the provider rejects it, or the
    /// reply carries no content.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String>;
}
