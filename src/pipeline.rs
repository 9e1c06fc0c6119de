//! The generate → execute → refine pipeline.
//!
//! Four steps in strict sequence, no branching back:
//!
//! 1. If no stack was supplied, ask the model to suggest one
//! 2. Ask the model to generate code for the task and stack
//! 3. Submit the code to the execution backend
//! 4. If execution reported an error, ask the model once to refine the code
//!
//! An empty completion response is absorbed into a sentinel string; a failed
//! completion call propagates as [`LlmError`] to the request boundary.

use std::sync::Arc;

use crate::executor::{CodeExecutor, ExecutionResult};
use crate::llm::{ChatMessage, LlmClient, LlmError};

/// Task used when the caller supplies none.
pub const DEFAULT_TASK: &str = "A ToDo App";

/// Stack used when the caller supplies none.
pub const DEFAULT_STACK: &str = "Angular";

const UNKNOWN_STACK: &str = "Unknown stack";
const UNKNOWN_CODE: &str = "Unknown code";

/// Outcome of one full pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Execution succeeded
    Ran {
        generated_code: String,
        execution_result: serde_json::Value,
    },
    /// Execution failed; carries the error and one refinement attempt.
    /// The improved code is not executed again.
    Refined {
        error: String,
        improved_code: String,
    },
}

/// Stateless orchestrator over the completion service and the execution
/// backend. Shared across requests; holds no per-request state.
pub struct CodePipeline {
    llm: Arc<dyn LlmClient>,
    executor: CodeExecutor,
}

impl CodePipeline {
    pub fn new(llm: Arc<dyn LlmClient>, executor: CodeExecutor) -> Self {
        Self { llm, executor }
    }

    /// Ask the model to suggest a technology stack for the task.
    ///
    /// Returns the sentinel `"Unknown stack"` when the provider returns no
    /// text.
    pub async fn suggest_stack(&self, task: &str) -> Result<String, LlmError> {
        tracing::info!("Suggesting tech stack for task: {}", task);

        let prompt = format!(
            "Suggest the best tech stack for this project: {task}. \
             Include frontend, backend, mobile (if applicable), and any required libraries."
        );
        let content = self.llm.chat_completion(&[ChatMessage::user(prompt)]).await?;
        Ok(content.unwrap_or_else(|| UNKNOWN_STACK.to_string()))
    }

    /// Ask the model to generate application code for the task and stack.
    ///
    /// Returns the sentinel `"Unknown code"` when the provider returns no
    /// text.
    pub async fn generate_code(&self, task: &str, stack: &str) -> Result<String, LlmError> {
        let prompt =
            format!("Generate an application for {task}. Use {stack} and apply best practices.");
        let content = self.llm.chat_completion(&[ChatMessage::user(prompt)]).await?;
        Ok(content.unwrap_or_else(|| UNKNOWN_CODE.to_string()))
    }

    /// One best-effort refinement pass seeded with the previous code and its
    /// execution error. Reuses the code-generation call path; no loop.
    pub async fn refine_code(
        &self,
        task: &str,
        stack: &str,
        prev_code: &str,
        execution_error: &str,
    ) -> Result<String, LlmError> {
        let refinement_task = format!(
            "The following full-stack application code was generated for task: {task}\n\
             Stack: {stack}\n\
             Code:\n{prev_code}\n\
             Execution Result:\n{execution_error}\n\
             Please improve the code to fix errors and optimize performance."
        );
        self.generate_code(&refinement_task, stack).await
    }

    /// Run the full pipeline for one request.
    pub async fn run(&self, task: &str, stack: &str) -> Result<PipelineOutcome, LlmError> {
        let stack = if stack.trim().is_empty() {
            self.suggest_stack(task).await?
        } else {
            stack.to_string()
        };

        let code = self.generate_code(task, &stack).await?;

        match self.executor.execute(&code).await {
            ExecutionResult::Success(payload) => Ok(PipelineOutcome::Ran {
                generated_code: code,
                execution_result: payload,
            }),
            ExecutionResult::Error(message) => {
                tracing::error!("Execution error: {}", message);
                let improved_code = self.refine_code(task, &stack, &code, &message).await?;
                Ok(PipelineOutcome::Refined {
                    error: message,
                    improved_code,
                })
            }
        }
    }
}
