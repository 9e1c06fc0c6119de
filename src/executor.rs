//! Remote code-execution client.
//!
//! Submits generated code to the execution backend and reports the outcome as
//! an [`ExecutionResult`]. This call never fails past its own boundary:
//! transport errors and non-200 statuses both become `ExecutionResult::Error`.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Outcome of submitting code for execution.
///
/// Exactly one of success or error, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    /// The backend ran the code; payload is whatever JSON it returned
    Success(Value),
    /// The backend refused, failed, or was unreachable
    Error(String),
}

impl ExecutionResult {
    /// The error message, if this is an error result.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ExecutionResult::Success(_) => None,
            ExecutionResult::Error(message) => Some(message),
        }
    }
}

#[derive(Serialize)]
struct ExecutionRequest<'a> {
    language: &'a str,
    code: &'a str,
}

/// Client for the remote code-execution backend.
pub struct CodeExecutor {
    client: Client,
    url: String,
    // The language tag is fixed per deployment, not derived from the stack
    // the model chose. See EXECUTION_LANGUAGE in the config docs.
    language: String,
}

impl CodeExecutor {
    pub fn new(client: Client, url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            language: language.into(),
        }
    }

    /// Submit `code` to the backend and report the outcome.
    pub async fn execute(&self, code: &str) -> ExecutionResult {
        tracing::debug!("Submitting code to execution backend at {}", self.url);

        let payload = ExecutionRequest {
            language: &self.language,
            code,
        };

        let response = match self.client.post(&self.url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Transport error during code execution: {}", e);
                return ExecutionResult::Error(e.to_string());
            }
        };

        let status = response.status();
        if status.as_u16() != 200 {
            tracing::error!("Code execution failed with status code: {}", status);
            return ExecutionResult::Error(format!(
                "Execution failed with status {}",
                status.as_u16()
            ));
        }

        match response.json::<Value>().await {
            Ok(body) => {
                tracing::info!("Code execution successful");
                ExecutionResult::Success(body)
            }
            Err(e) => {
                tracing::error!("Malformed execution response: {}", e);
                ExecutionResult::Error(e.to_string())
            }
        }
    }
}
