//! HTTP request handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::types::{GenerateParams, GenerateResponse, HealthResponse};
use super::AppState;
use crate::pipeline::{PipelineOutcome, DEFAULT_TASK};

/// Run the full generate → execute → refine pipeline for one request.
///
/// Always answers 200 with one of the two [`GenerateResponse`] shapes. A
/// completion-provider failure is the one exception: it surfaces as a 500
/// with the error text.
pub async fn generate_and_run_code(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    // An explicitly empty task falls back to the default so generation never
    // sees an empty task. An empty stack is meaningful: it requests a
    // suggestion.
    let task = if params.task.trim().is_empty() {
        DEFAULT_TASK.to_string()
    } else {
        params.task
    };

    tracing::info!("Received code generation request - Task: {}", task);
    tracing::debug!("Parameters - Stack: {}", params.stack);

    let outcome = state
        .pipeline
        .run(&task, &params.stack)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(match outcome {
        PipelineOutcome::Ran {
            generated_code,
            execution_result,
        } => GenerateResponse::Ran {
            generated_code,
            execution_result,
        },
        PipelineOutcome::Refined {
            error,
            improved_code,
        } => GenerateResponse::Refined {
            error,
            improved_code,
        },
    }))
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
