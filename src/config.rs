//! Configuration management for appforge.
//!
//! Configuration can be set via environment variables:
//! - `OPENAI_API_KEY` - Required. API key for the completion service.
//! - `LLM_MODEL` - Optional. The model to use. Defaults to `gpt-4-turbo-preview`.
//! - `LLM_BASE_URL` - Optional. Base URL of the completion service. Defaults to
//!   `https://api.openai.com/v1/`.
//! - `EXECUTION_API_URL` - Optional. Endpoint of the remote code-execution
//!   backend. Defaults to `https://replit.com/api/v1/execute`.
//! - `EXECUTION_LANGUAGE` - Optional. Language tag sent with every execution
//!   request. Defaults to `python`. The tag is NOT derived from the stack the
//!   model chose; override it here if you target a different backend runtime.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `REQUEST_TIMEOUT_SECS` - Optional. Timeout for outbound HTTP calls.
//!   Defaults to `120`.
//! - `LOG_FILE` - Optional. Append-only log file. Defaults to `app.log`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
///
/// Built once at startup and handed to [`crate::api::serve`]; there is no
/// ambient global configuration state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Completion-service API key
    pub api_key: String,

    /// Model identifier sent with every completion request
    pub model: String,

    /// Base URL of the completion service
    pub llm_base_url: String,

    /// Endpoint of the remote code-execution backend
    pub execution_api_url: String,

    /// Language tag for execution requests
    pub execution_language: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Timeout applied to outbound HTTP calls, in seconds
    pub request_timeout_secs: u64,

    /// Append-only log file name
    pub log_file: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model =
            std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4-turbo-preview".to_string());

        let llm_base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/".to_string());

        let execution_api_url = std::env::var("EXECUTION_API_URL")
            .unwrap_or_else(|_| "https://replit.com/api/v1/execute".to_string());

        let execution_language =
            std::env::var("EXECUTION_LANGUAGE").unwrap_or_else(|_| "python".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        let log_file = std::env::var("LOG_FILE").unwrap_or_else(|_| "app.log".to_string());

        Ok(Self {
            api_key,
            model,
            llm_base_url,
            execution_api_url,
            execution_language,
            host,
            port,
            request_timeout_secs,
            log_file,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, execution_api_url: String) -> Self {
        Self {
            api_key,
            model: "gpt-4-turbo-preview".to_string(),
            llm_base_url: "https://api.openai.com/v1/".to_string(),
            execution_api_url,
            execution_language: "python".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            request_timeout_secs: 120,
            log_file: "app.log".to_string(),
        }
    }
}
