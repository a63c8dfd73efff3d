// SPDX-License-Identifier: Apache-2.0

//! Error types for IssueLens.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Binaries should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur while fetching and analyzing an issue.
///
/// LLM output problems are deliberately absent: the analyzer always degrades
/// to a fallback result instead of failing.
#[derive(Error, Debug)]
pub enum IssueLensError {
    /// Repository URL could not be decomposed into owner and repo.
    #[error("Invalid GitHub URL. Use format: github.com/owner/repo")]
    InvalidUrl {
        /// The URL as supplied by the caller.
        url: String,
    },

    /// Issue numbers start at 1.
    #[error("Invalid issue number {number}. Issue numbers start at 1.")]
    InvalidIssueNumber {
        /// The rejected issue number.
        number: u64,
    },

    /// GitHub answered 404 for the issue or its comments.
    #[error("Issue not found. Please check the URL and issue number.")]
    IssueNotFound,

    /// GitHub answered 403 (quota exhausted or access denied).
    #[error("GitHub API rate limit exceeded or access denied.")]
    RateLimited,

    /// GitHub answered with an unexpected HTTP status.
    #[error("GitHub API error (HTTP {status}): {message}")]
    GitHub {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration file or environment error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Unexpected failure that should not be shown to callers verbatim.
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

/// Coarse classification used by transports to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied something unusable (HTTP 400).
    Client,
    /// An external service failed or was unreachable (HTTP 502).
    Upstream,
    /// Our own bug or misconfiguration (HTTP 500).
    Internal,
}

impl IssueLensError {
    /// Classifies this error for transport-level reporting.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            IssueLensError::InvalidUrl { .. }
            | IssueLensError::InvalidIssueNumber { .. }
            | IssueLensError::IssueNotFound
            | IssueLensError::RateLimited => ErrorCategory::Client,
            IssueLensError::GitHub { .. } | IssueLensError::Network(_) => ErrorCategory::Upstream,
            IssueLensError::Config { .. } | IssueLensError::Internal { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

impl From<config::ConfigError> for IssueLensError {
    fn from(err: config::ConfigError) -> Self {
        IssueLensError::Config {
            message: err.to_string(),
        }
    }
}
