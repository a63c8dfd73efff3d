// SPDX-License-Identifier: Apache-2.0

//! GitHub issue fetching.
//!
//! Fetches an issue and its comments over the REST API and flattens them into
//! the plain-text form sent to the model.

use std::fmt::Write;
use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::IssueReference;
use crate::config::GitHubConfig;
use crate::error::IssueLensError;

/// Characters escaped when placing owner/repo into a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Issue title, body and comments flattened into a single prompt-ready string.
pub type IssueText = String;

/// Subset of the GitHub issue payload used for analysis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueResponse {
    /// Issue title.
    #[serde(default)]
    pub title: Option<String>,
    /// Issue body (markdown), `null` when empty.
    #[serde(default)]
    pub body: Option<String>,
}

/// Subset of a GitHub issue comment payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentResponse {
    /// Comment body (markdown).
    #[serde(default)]
    pub body: Option<String>,
}

/// Minimal GitHub REST client for reading issues.
///
/// Holds the HTTP client, API base URL and optional token for reuse across requests.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<SecretString>,
}

impl GitHubClient {
    /// Creates a client from configuration and an optional bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &GitHubConfig, token: Option<SecretString>) -> Result<Self, IssueLensError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| IssueLensError::Internal {
                message: format!("Failed to create GitHub HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Whether requests carry a bearer token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Endpoint for a single issue.
    #[must_use]
    pub fn issue_url(&self, reference: &IssueReference) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            self.api_url,
            utf8_percent_encode(&reference.owner, PATH_SEGMENT),
            utf8_percent_encode(&reference.repo, PATH_SEGMENT),
            reference.number
        )
    }

    /// Endpoint for an issue's comments.
    #[must_use]
    pub fn comments_url(&self, reference: &IssueReference) -> String {
        format!("{}/comments", self.issue_url(reference))
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("IssueLens/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        if let Some(token) = &self.token
            && let Ok(mut value) =
                HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, IssueLensError> {
        let response = self
            .http
            .get(url)
            .headers(self.build_headers())
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => return Err(IssueLensError::IssueNotFound),
            StatusCode::FORBIDDEN => return Err(IssueLensError::RateLimited),
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(IssueLensError::GitHub {
                    status: s.as_u16(),
                    message: if body.is_empty() {
                        s.canonical_reason().unwrap_or("unknown error").to_string()
                    } else {
                        body
                    },
                });
            }
            _ => {}
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetches the issue metadata.
    ///
    /// # Errors
    ///
    /// `IssueNotFound` on 404, `RateLimited` on 403, `GitHub`/`Network` otherwise.
    #[instrument(skip_all, fields(issue = %reference))]
    pub async fn fetch_issue(
        &self,
        reference: &IssueReference,
    ) -> Result<IssueResponse, IssueLensError> {
        debug!("Fetching issue");
        self.get_json(&self.issue_url(reference)).await
    }

    /// Fetches the first page of comments on the issue.
    ///
    /// # Errors
    ///
    /// Same mapping as [`GitHubClient::fetch_issue`].
    #[instrument(skip_all, fields(issue = %reference))]
    pub async fn fetch_comments(
        &self,
        reference: &IssueReference,
    ) -> Result<Vec<CommentResponse>, IssueLensError> {
        debug!("Fetching comments");
        self.get_json(&self.comments_url(reference)).await
    }

    /// Resolves the repository URL, fetches the issue and then its comments,
    /// and formats them for the model.
    ///
    /// The URL is validated before any network call is made.
    ///
    /// # Errors
    ///
    /// `InvalidUrl`/`InvalidIssueNumber` for bad input, otherwise the errors of
    /// [`GitHubClient::fetch_issue`].
    #[instrument(skip(self))]
    pub async fn fetch_issue_text(
        &self,
        repo_url: &str,
        issue_number: u64,
    ) -> Result<IssueText, IssueLensError> {
        let reference = IssueReference::new(repo_url, issue_number)?;

        let issue = self.fetch_issue(&reference).await?;
        let comments = self.fetch_comments(&reference).await?;

        debug!(comments = comments.len(), "Fetched issue details");

        Ok(format_issue_text(&issue, &comments))
    }
}

/// Formats an issue and its comments for the model.
///
/// Empty comments are skipped but keep their position in the numbering. When
/// there are no comments the text says so explicitly, keeping the prompt shape stable.
#[must_use]
pub fn format_issue_text(issue: &IssueResponse, comments: &[CommentResponse]) -> IssueText {
    let mut text = String::new();
    let _ = write!(text, "Title: {}\n\n", issue.title.as_deref().unwrap_or_default());
    let _ = write!(text, "Body: {}\n\n", issue.body.as_deref().unwrap_or_default());

    if comments.is_empty() {
        text.push_str("No comments found.\n");
        return text;
    }

    text.push_str("--- Comments ---\n");
    for (i, comment) in comments.iter().enumerate() {
        let body = comment.body.as_deref().unwrap_or_default().trim();
        if !body.is_empty() {
            let _ = write!(text, "Comment {}: {body}\n\n", i + 1);
        }
    }
    text
}
