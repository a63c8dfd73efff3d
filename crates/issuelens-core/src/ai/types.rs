// SPDX-License-Identifier: Apache-2.0

//! AI request/response types.
//!
//! Defines the chat-completions wire structures and the analysis result
//! returned to callers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A chat message for the chat completions API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat completions API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g., "gemini-flash-lite-latest").
    pub model: String,
    /// List of messages in the conversation.
    pub messages: Vec<ChatMessage>,
    /// Response format specification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    /// Maximum tokens in response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Response format specification for structured output.
#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    /// Type of response format ("`json_object`" for structured output).
    #[serde(rename = "type")]
    pub format_type: String,
}

/// Response from the chat completions API.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// List of choices (usually just one).
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A single choice in the chat completion response.
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ResponseMessage,
}

/// Assistant message in a completion; `content` may be `null`.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    /// Generated text, if any.
    #[serde(default)]
    pub content: Option<String>,
}

/// Issue category assigned by the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Something is broken.
    Bug,
    /// A request for new functionality.
    FeatureRequest,
    /// Docs are missing or wrong.
    Documentation,
    /// A support question.
    Question,
    /// Anything else, including unrecognized model output.
    #[default]
    Other,
}

impl IssueType {
    /// Maps a model-supplied label onto a variant.
    ///
    /// Matching ignores case and surrounding whitespace and treats `-` and
    /// spaces as `_`, so `"Feature Request"` and `"feature-request"` both map
    /// to [`IssueType::FeatureRequest`]. Unknown labels map to [`IssueType::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "bug" => Self::Bug,
            "feature_request" => Self::FeatureRequest,
            "documentation" => Self::Documentation,
            "question" => Self::Question,
            _ => Self::Other,
        }
    }

    /// Wire name of the variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::FeatureRequest => "feature_request",
            Self::Documentation => "documentation",
            Self::Question => "question",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured classification of a single issue.
///
/// Every field is always populated; missing model output is filled with
/// defaults by the sanitizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// One or two sentence summary of the issue.
    pub summary: String,
    /// Issue category.
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Score from 1 (low) to 5 (critical) followed by a justification.
    pub priority_score: String,
    /// At most three suggested labels.
    pub suggested_labels: Vec<String>,
    /// Impact on users or the codebase.
    pub potential_impact: String,
}

impl AnalysisResult {
    /// Leading priority digit (1-5) of `priority_score`, if there is one.
    ///
    /// Display helper only; scores are never validated against it.
    #[must_use]
    pub fn priority_level(&self) -> Option<u8> {
        self.priority_score
            .trim_start()
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .and_then(|d| u8::try_from(d).ok())
            .filter(|d| (1..=5).contains(d))
    }
}
