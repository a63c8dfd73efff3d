// SPDX-License-Identifier: Apache-2.0

//! Credential resolution.
//!
//! The `TokenProvider` trait abstracts where credentials come from. Credentials
//! are resolved once, at startup, into a [`Credentials`] value that is passed
//! to the fetcher and analyzer at construction time.

use secrecy::SecretString;

/// Environment variables checked (in order) for the GitHub token.
pub const GITHUB_TOKEN_ENVS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Environment variables checked (in order) for the LLM API key.
pub const LLM_API_KEY_ENVS: &[&str] = &["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// Provides GitHub and LLM credentials for API calls.
///
/// Implementations return `None` when a credential is not available.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token. Optional: anonymous access works with lower rate limits.
    fn github_token(&self) -> Option<SecretString>;

    /// Retrieves the LLM API key.
    fn llm_api_key(&self) -> Option<SecretString>;
}

/// Resolves credentials from environment variables.
///
/// Reads `GITHUB_TOKEN` (or `GH_TOKEN`) and `GOOGLE_API_KEY` (or `GEMINI_API_KEY`).
/// Empty values are treated as unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvTokenProvider;

impl EnvTokenProvider {
    fn first_set(names: &[&str]) -> Option<SecretString> {
        names
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .map(SecretString::from)
    }
}

impl TokenProvider for EnvTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        Self::first_set(GITHUB_TOKEN_ENVS)
    }

    fn llm_api_key(&self) -> Option<SecretString> {
        Self::first_set(LLM_API_KEY_ENVS)
    }
}

/// Credentials captured once at startup.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// GitHub API token.
    pub github_token: Option<SecretString>,
    /// LLM API key.
    pub llm_api_key: Option<SecretString>,
}

impl Credentials {
    /// Snapshots every credential the provider knows about.
    #[must_use]
    pub fn from_provider(provider: &dyn TokenProvider) -> Self {
        Self {
            github_token: provider.github_token(),
            llm_api_key: provider.llm_api_key(),
        }
    }
}
