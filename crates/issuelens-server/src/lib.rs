// SPDX-License-Identifier: Apache-2.0

//! HTTP API exposing issuelens-core issue analysis.
//!
//! Routes:
//! - `GET /` - liveness message
//! - `GET /health` - credential presence
//! - `POST /analyze` - fetch and classify one issue

mod error;
mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use issuelens_core::{AnalysisResult, AppConfig, Credentials, IssueLensError, Pipeline, ResultCache};
use tokio::net::TcpListener;

pub use error::{ApiError, ErrorBody};
pub use routes::{
    AnalyzeRequest, CredentialStatus, HealthCheckResponse, ROOT_MESSAGE, RootResponse,
};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    cache: Arc<ResultCache<AnalysisResult>>,
}

impl AppState {
    /// Wraps a pipeline with a result cache of the given TTL.
    #[must_use]
    pub fn new(pipeline: Pipeline, cache_ttl_seconds: u64) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            cache: Arc::new(ResultCache::new(cache_ttl_seconds)),
        }
    }

    /// Builds state from configuration and startup credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the pipeline's HTTP clients cannot be built.
    pub fn from_config(
        config: &AppConfig,
        credentials: &Credentials,
    ) -> Result<Self, IssueLensError> {
        let pipeline = Pipeline::from_config(config, credentials)?;
        Ok(Self::new(pipeline, config.cache.ttl_seconds))
    }
}

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/analyze", post(routes::analyze))
        .with_state(state)
}

/// Binds a listener on `host`, which may be a hostname, an IP literal, or a
/// bracketed IPv6 literal.
async fn bind_listener(host: &str, port: u16) -> std::io::Result<TcpListener> {
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    TcpListener::bind((host, port)).await
}

/// Run the API over HTTP.
///
/// Starts an HTTP server on the specified host and port. Gracefully shuts
/// down on Ctrl+C.
pub async fn run_http(host: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    tracing::info!("Starting IssueLens HTTP server on {}:{}", host, port);

    let listener = bind_listener(host, port).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_listener_resolves_hostnames() {
        let listener = bind_listener("localhost", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn bind_listener_accepts_ip_literals() {
        let listener = bind_listener("127.0.0.1", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().port() > 0);
    }

    #[tokio::test]
    async fn bind_listener_rejects_unresolvable_host() {
        assert!(bind_listener("not a host", 0).await.is_err());
    }
}
