// SPDX-License-Identifier: Apache-2.0

//! AI integration module.
//!
//! Provides few-shot issue classification through an LLM provider, plus the
//! sanitizer that turns free-form model output into a schema-complete result.

pub mod analyzer;
pub mod gemini;
pub mod prompt;
pub mod provider;
pub mod sanitize;
pub mod types;

pub use analyzer::Analyzer;
pub use gemini::GeminiClient;
pub use provider::LlmProvider;
pub use types::{AnalysisResult, IssueType};

/// Google AI Studio OpenAI-compatible chat completions endpoint.
pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
