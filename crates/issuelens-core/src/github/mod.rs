// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides repository URL parsing and the REST client used to fetch issues.

use tracing::debug;

use crate::error::IssueLensError;

pub mod issues;

pub use issues::{GitHubClient, IssueText};

/// A fully resolved issue location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Issue number (always positive).
    pub number: u64,
}

impl IssueReference {
    /// Builds a reference from a repository URL and an issue number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the URL lacks owner or repo segments,
    /// and `InvalidIssueNumber` if `number` is zero.
    pub fn new(repo_url: &str, number: u64) -> Result<Self, IssueLensError> {
        let (owner, repo) = parse_repo_url(repo_url)?;
        if number == 0 {
            return Err(IssueLensError::InvalidIssueNumber { number });
        }
        Ok(Self {
            owner,
            repo,
            number,
        })
    }
}

impl std::fmt::Display for IssueReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Parses a repository web URL into `(owner, repo)`.
///
/// Accepts `https://github.com/owner/repo`, `http://www.github.com/owner/repo/`,
/// `github.com/owner/repo.git` and URLs with extra path segments such as
/// `github.com/owner/repo/issues/12`. The first segment is always taken to be
/// the host.
///
/// # Errors
///
/// Returns `InvalidUrl` if fewer than two non-empty segments follow the host,
/// or if the owner or repository is a `.` or `..` path segment.
pub fn parse_repo_url(url: &str) -> Result<(String, String), IssueLensError> {
    let invalid = || IssueLensError::InvalidUrl {
        url: url.to_string(),
    };

    let trimmed = url.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);
    let path = without_www
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_matches('/');

    let mut parts = path.split('/').skip(1);
    let owner = parts.next().filter(|s| is_name_segment(s)).ok_or_else(invalid)?;
    let repo = parts
        .next()
        .map(|s| s.strip_suffix(".git").unwrap_or(s))
        .filter(|s| is_name_segment(s))
        .ok_or_else(invalid)?;

    debug!(owner = %owner, repo = %repo, "Parsed repository URL");
    Ok((owner.to_string(), repo.to_string()))
}

/// Dot segments would be normalized away by the URL layer and retarget the API path.
fn is_name_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_url_full() {
        let (owner, repo) = parse_repo_url("https://github.com/fastapi/fastapi").unwrap();
        assert_eq!(owner, "fastapi");
        assert_eq!(repo, "fastapi");
    }

    #[test]
    fn test_parse_repo_url_http_www_trailing_slash() {
        let (owner, repo) = parse_repo_url("http://www.github.com/octocat/Hello-World/").unwrap();
        assert_eq!(owner, "octocat");
        assert_eq!(repo, "Hello-World");
    }

    #[test]
    fn test_parse_repo_url_without_scheme() {
        let (owner, repo) = parse_repo_url("github.com/rust-lang/rust").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "rust");
    }

    #[test]
    fn test_parse_repo_url_ignores_extra_segments_and_query() {
        let (owner, repo) =
            parse_repo_url("https://github.com/block/goose/issues/5836?tab=comments#top").unwrap();
        assert_eq!(owner, "block");
        assert_eq!(repo, "goose");
    }

    #[test]
    fn test_parse_repo_url_strips_git_suffix() {
        let (_, repo) = parse_repo_url("https://github.com/tokio-rs/tokio.git").unwrap();
        assert_eq!(repo, "tokio");
    }

    #[test]
    fn test_parse_repo_url_missing_segments() {
        for url in [
            "",
            "https://github.com",
            "https://github.com/",
            "https://github.com/octocat",
            "github.com/octocat/",
            "https://github.com//repo",
            "octocat/Hello-World",
            "https://github.com/../..",
            "https://github.com/./repo",
            "https://github.com/octocat/..",
            "https://github.com/octocat/.",
            "https://github.com/octocat/...git",
            "github.com/../repo/issues/1",
        ] {
            let err = parse_repo_url(url).unwrap_err();
            assert!(
                matches!(err, IssueLensError::InvalidUrl { .. }),
                "expected InvalidUrl for {url:?}"
            );
        }
    }

    #[test]
    fn test_parse_repo_url_allows_dots_inside_names() {
        let (owner, repo) = parse_repo_url("https://github.com/octo.cat/.github").unwrap();
        assert_eq!(owner, "octo.cat");
        assert_eq!(repo, ".github");

        let (_, repo) = parse_repo_url("https://github.com/octocat/...").unwrap();
        assert_eq!(repo, "...");
    }

    #[test]
    fn test_issue_reference_rejects_dot_segments() {
        let err = IssueReference::new("https://github.com/../..", 1).unwrap_err();
        assert!(matches!(err, IssueLensError::InvalidUrl { .. }));
    }

    #[test]
    fn test_issue_reference_rejects_zero() {
        let err = IssueReference::new("https://github.com/octocat/Hello-World", 0).unwrap_err();
        assert!(matches!(err, IssueLensError::InvalidIssueNumber { number: 0 }));
    }

    #[test]
    fn test_issue_reference_display() {
        let reference = IssueReference::new("https://github.com/octocat/Hello-World", 42).unwrap();
        assert_eq!(reference.to_string(), "octocat/Hello-World#42");
    }
}
