// SPDX-License-Identifier: Apache-2.0

//! HTTP route handlers.

use axum::Json;
use axum::extract::State;
use issuelens_core::{AnalysisResult, IssueLensError};
use serde::{Deserialize, Serialize};
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

/// Message returned by `GET /`.
pub const ROOT_MESSAGE: &str = "IssueLens API is running. Use POST /analyze to process issues.";

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Repository web URL, e.g. `https://github.com/owner/repo`.
    pub repo_url: String,
    /// Issue number within the repository.
    pub issue_number: u64,
}

/// Body of `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    /// Liveness message.
    pub message: String,
}

/// Credential presence as reported by `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatus {
    /// Credential is configured.
    Valid,
    /// Credential is missing or not set.
    Missing,
}

impl CredentialStatus {
    fn from_present(present: bool) -> Self {
        if present { Self::Valid } else { Self::Missing }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// GitHub token presence.
    pub github_token: CredentialStatus,
    /// LLM API key presence.
    pub llm_api_key: CredentialStatus,
}

pub(crate) async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    // Presence only; validating would cost an API call per probe.
    Json(HealthCheckResponse {
        github_token: CredentialStatus::from_present(state.pipeline.github().is_authenticated()),
        llm_api_key: CredentialStatus::from_present(state.pipeline.analyzer().is_configured()),
    })
}

pub(crate) async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let span = info_span!(
        "analyze",
        request_id = %Uuid::new_v4(),
        repo_url = %request.repo_url,
        issue_number = request.issue_number
    );

    let result = analyze_cached(&state, &request).instrument(span).await?;
    Ok(Json(result))
}

async fn analyze_cached(
    state: &AppState,
    request: &AnalyzeRequest,
) -> Result<AnalysisResult, IssueLensError> {
    if let Some(cached) = state.cache.get(&request.repo_url, request.issue_number) {
        debug!("Serving cached analysis");
        return Ok(cached);
    }

    let result = state
        .pipeline
        .handle(&request.repo_url, request.issue_number)
        .await?;
    if result.is_fallback() {
        debug!("Degraded analysis, not caching");
    } else {
        state
            .cache
            .insert(&request.repo_url, request.issue_number, result.clone());
    }
    Ok(result)
}
