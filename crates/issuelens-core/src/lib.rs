// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # IssueLens Core
//!
//! Core library for IssueLens - LLM-assisted GitHub issue classification.
//!
//! This crate provides reusable components for:
//! - GitHub issue fetching (URL parsing, issue and comments retrieval)
//! - Few-shot issue analysis through an LLM provider (Gemini by default)
//! - Sanitizing model output into a schema-complete result
//! - Configuration and credential resolution
//! - In-memory result caching
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use issuelens_core::{Credentials, EnvTokenProvider, Pipeline, load_config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = load_config()?;
//! let credentials = Credentials::from_provider(&EnvTokenProvider);
//!
//! // Create the pipeline once and reuse it for every request
//! let pipeline = Pipeline::from_config(&config, &credentials)?;
//!
//! let result = pipeline
//!     .handle("https://github.com/rust-lang/rust", 1)
//!     .await?;
//! println!("{}: {}", result.issue_type, result.summary);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ai`] - Prompting, LLM providers, and output sanitizing
//! - [`auth`] - Credential resolution
//! - [`cache`] - TTL result cache
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub issue fetching
//! - [`pipeline`] - Fetch-then-analyze request handling

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{Credentials, EnvTokenProvider, TokenProvider};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{ErrorCategory, IssueLensError};

/// Convenience Result type for IssueLens operations.
///
/// This is equivalent to `std::result::Result<T, IssueLensError>`.
pub type Result<T> = std::result::Result<T, IssueLensError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AiConfig, AppConfig, CacheConfig, GitHubConfig, ServerConfig, config_dir, config_file_path,
    load_config, load_config_from,
};

// ============================================================================
// Caching
// ============================================================================

pub use cache::{CacheEntry, ResultCache};

// ============================================================================
// AI Analysis
// ============================================================================

pub use ai::sanitize::{extract_json, fallback, normalize};
pub use ai::{AnalysisResult, Analyzer, GeminiClient, IssueType, LlmProvider};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::{GitHubClient, IssueReference, IssueText, parse_repo_url};

// ============================================================================
// Request Handling
// ============================================================================

pub use pipeline::Pipeline;

// ============================================================================
// Modules
// ============================================================================

pub mod ai;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod pipeline;
