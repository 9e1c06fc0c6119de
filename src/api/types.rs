//! API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pipeline::{DEFAULT_STACK, DEFAULT_TASK};

/// Query parameters for the generate-and-run endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateParams {
    /// The task description / user prompt
    #[serde(default = "default_task")]
    pub task: String,

    /// Technology stack. Pass an empty value to have the model suggest one.
    #[serde(default = "default_stack")]
    pub stack: String,
}

fn default_task() -> String {
    DEFAULT_TASK.to_string()
}

fn default_stack() -> String {
    DEFAULT_STACK.to_string()
}

/// Response body for the generate-and-run endpoint.
///
/// Always exactly one of the two shapes, both served with status 200.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    /// Execution succeeded
    Ran {
        generated_code: String,
        execution_result: Value,
    },
    /// Execution failed; one refinement attempt is included, untested
    Refined {
        error: String,
        improved_code: String,
    },
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
