// SPDX-License-Identifier: Apache-2.0

//! Error conversion from issuelens-core errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use issuelens_core::{ErrorCategory, IssueLensError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// JSON error body: `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error description.
    pub detail: String,
}

/// A request failure, rendered according to its [`ErrorCategory`].
///
/// - `Client` -> 400 with the error message
/// - `Upstream` -> 502 with `External API Error: <message>`
/// - `Internal` -> 500 with a generic message; the real error is only logged
#[derive(Debug)]
pub struct ApiError(pub IssueLensError);

impl From<IssueLensError> for ApiError {
    fn from(err: IssueLensError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and body for this error.
    #[must_use]
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        let err = &self.0;
        match err.category() {
            ErrorCategory::Client => (StatusCode::BAD_REQUEST, err.to_string()),
            ErrorCategory::Upstream => (
                StatusCode::BAD_GATEWAY,
                format!("External API Error: {err}"),
            ),
            ErrorCategory::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        match self.0.category() {
            ErrorCategory::Client => {}
            ErrorCategory::Upstream => warn!(error = %self.0, "Upstream request failed"),
            ErrorCategory::Internal => error!(error = ?self.0, "Internal error handling request"),
        }
        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let (status, detail) = ApiError(IssueLensError::IssueNotFound).status_and_detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            detail,
            "Issue not found. Please check the URL and issue number."
        );
    }

    #[test]
    fn upstream_errors_map_to_bad_gateway() {
        let err = IssueLensError::GitHub {
            status: 503,
            message: "unavailable".to_string(),
        };
        let (status, detail) = ApiError(err).status_and_detail();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            detail,
            "External API Error: GitHub API error (HTTP 503): unavailable"
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = IssueLensError::Internal {
            message: "secret detail".to_string(),
        };
        let response = ApiError(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let (_, detail) = ApiError(IssueLensError::Config {
            message: "bad".to_string(),
        })
        .status_and_detail();
        assert_eq!(detail, "Internal Server Error");
    }
}
