// SPDX-License-Identifier: Apache-2.0

//! Fetch-then-analyze request handling.
//!
//! Transports (HTTP server, CLI) call [`Pipeline::handle`] and map its error
//! through [`crate::error::IssueLensError::category`].

use bon::Builder;
use tracing::{debug, info, instrument};

use crate::ai::{AnalysisResult, Analyzer};
use crate::auth::Credentials;
use crate::config::AppConfig;
use crate::error::IssueLensError;
use crate::github::GitHubClient;

/// Issue fetcher plus analyzer, shared across requests.
#[derive(Debug, Clone, Builder)]
pub struct Pipeline {
    github: GitHubClient,
    analyzer: Analyzer,
}

impl Pipeline {
    /// Builds the GitHub client and analyzer from configuration and the
    /// credentials captured at startup.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if an HTTP client cannot be built.
    pub fn from_config(
        config: &AppConfig,
        credentials: &Credentials,
    ) -> Result<Self, IssueLensError> {
        let github = GitHubClient::new(&config.github, credentials.github_token.clone())?;
        let analyzer = Analyzer::from_config(&config.ai, credentials.llm_api_key.clone())?;
        Ok(Self { github, analyzer })
    }

    /// The issue fetcher.
    #[must_use]
    pub fn github(&self) -> &GitHubClient {
        &self.github
    }

    /// The analyzer.
    #[must_use]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Fetches the issue, then analyzes it.
    ///
    /// Analysis itself never fails, so every error comes from input validation
    /// or the GitHub fetch.
    ///
    /// # Errors
    ///
    /// Propagates [`GitHubClient::fetch_issue_text`] errors unchanged.
    #[instrument(skip(self))]
    pub async fn handle(
        &self,
        repo_url: &str,
        issue_number: u64,
    ) -> Result<AnalysisResult, IssueLensError> {
        let issue_text = self.github.fetch_issue_text(repo_url, issue_number).await?;
        debug!(chars = issue_text.len(), "Issue text ready");

        let result = self.analyzer.analyze(&issue_text).await;
        info!(issue_type = %result.issue_type, "Issue analyzed");
        Ok(result)
    }
}
