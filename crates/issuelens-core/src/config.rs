// SPDX-License-Identifier: Apache-2.0

//! Configuration management for IssueLens.
//!
//! Provides layered configuration from files and environment variables.
//! Credentials are not part of this configuration; see [`crate::auth`].
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `ISSUELENS_`)
//! 2. Config file: `~/.config/issuelens/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Override the LLM model via environment variable
//! ISSUELENS_AI__MODEL=gemini-2.5-flash issuelens serve
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::IssueLensError;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// LLM provider settings.
    pub ai: AiConfig,
    /// Result cache settings.
    pub cache: CacheConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL (no trailing slash).
    pub api_url: String,
    /// API request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            timeout_seconds: 10,
        }
    }
}

/// LLM provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Chat completions endpoint.
    pub api_url: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum tokens for API responses.
    pub max_tokens: u32,
    /// Temperature for API requests (0.0-1.0).
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: crate::ai::GEMINI_API_URL.to_string(),
            model: "gemini-flash-lite-latest".to_string(),
            timeout_seconds: 30,
            max_tokens: 1024,
            temperature: 0.2,
        }
    }
}

/// Result cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a completed analysis is reused, in seconds. `0` disables caching.
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: 300 }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Returns the IssueLens configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/issuelens`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("issuelens");
    }
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("issuelens")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration from the default config file location.
///
/// Environment variables use the prefix `ISSUELENS_` and double underscore
/// for nested keys (e.g., `ISSUELENS_GITHUB__API_URL`).
///
/// # Errors
///
/// Returns `IssueLensError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, IssueLensError> {
    load_config_from(&config_file_path())
}

/// Load application configuration from an explicit file path.
///
/// The file is optional; a missing file yields defaults plus environment overrides.
///
/// # Errors
///
/// Returns `IssueLensError::Config` if the file exists but is invalid.
pub fn load_config_from(path: &Path) -> Result<AppConfig, IssueLensError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("ISSUELENS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_load_config_defaults() {
        let config = load_config_from(Path::new("/nonexistent/issuelens/config.toml"))
            .expect("should load with defaults");

        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.timeout_seconds, 10);
        assert_eq!(config.ai.model, "gemini-flash-lite-latest");
        assert_eq!(config.ai.timeout_seconds, 30);
        assert_eq!(config.cache.ttl_seconds, 300);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    #[serial]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create temp file");
        writeln!(
            file,
            r#"
[github]
api_url = "http://localhost:9999"

[ai]
model = "gemini-2.5-flash"
max_tokens = 2048

[cache]
ttl_seconds = 0
"#
        )
        .expect("write config");

        let config = load_config_from(file.path()).expect("should parse file");

        assert_eq!(config.github.api_url, "http://localhost:9999");
        assert_eq!(config.github.timeout_seconds, 10);
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert_eq!(config.ai.max_tokens, 2048);
        assert_eq!(config.cache.ttl_seconds, 0);
    }

    #[test]
    #[serial]
    #[allow(unsafe_code)]
    fn test_env_overrides_file() {
        // SAFETY: serialized test; no other thread touches this variable.
        unsafe {
            std::env::set_var("ISSUELENS_SERVER__PORT", "9123");
        }

        let config = load_config_from(Path::new("/nonexistent/issuelens/config.toml"));

        unsafe {
            std::env::remove_var("ISSUELENS_SERVER__PORT");
        }

        assert_eq!(config.expect("should load").server.port, 9123);
    }

    #[test]
    #[serial]
    fn test_invalid_file_is_config_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create temp file");
        writeln!(file, "[server]\nport = \"not a number\"").expect("write config");

        let result = load_config_from(file.path());
        assert!(matches!(result, Err(IssueLensError::Config { .. })));
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with("issuelens/config.toml"));
    }

    #[test]
    #[serial]
    #[allow(unsafe_code)]
    fn test_config_dir_respects_xdg_config_home() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        // SAFETY: serialized test; no other thread touches this variable.
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "/custom/config");
        }

        let dir = config_dir();
        assert_eq!(dir, PathBuf::from("/custom/config/issuelens"));

        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }
}
