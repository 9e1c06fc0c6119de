//! HTTP API server.
//!
//! One functional endpoint, `POST /generate_and_run_code/`, plus a health
//! probe. All dependencies are injected through [`AppState`] at construction
//! time; there are no process-wide globals.

mod handlers;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::executor::CodeExecutor;
use crate::llm::OpenAiClient;
use crate::pipeline::CodePipeline;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The generate → execute → refine pipeline
    pub pipeline: Arc<CodePipeline>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/generate_and_run_code/",
            post(handlers::generate_and_run_code),
        )
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire up the pipeline from configuration and serve until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    // One pooled client for all outbound calls, with the configured timeout
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let llm = Arc::new(OpenAiClient::new(
        http.clone(),
        config.api_key.clone(),
        config.llm_base_url.clone(),
        config.model.clone(),
    ));
    let executor = CodeExecutor::new(
        http,
        config.execution_api_url.clone(),
        config.execution_language.clone(),
    );
    let state = AppState {
        pipeline: Arc::new(CodePipeline::new(llm, executor)),
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatMessage, LlmClient, LlmError};
    use crate::testutil::spawn_json_backend;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    /// Always answers with the same text.
    struct FixedLlm(&'static str);

    #[async_trait]
    impl LlmClient for FixedLlm {
        async fn chat_completion(
            &self,
            _messages: &[ChatMessage],
        ) -> Result<Option<String>, LlmError> {
            Ok(Some(self.0.to_string()))
        }
    }

    /// Always fails, like a provider outage would.
    struct FailingLlm;

    #[async_trait]
    impl LlmClient for FailingLlm {
        async fn chat_completion(
            &self,
            _messages: &[ChatMessage],
        ) -> Result<Option<String>, LlmError> {
            Err(LlmError::Api {
                status: 401,
                body: "invalid api key".to_string(),
            })
        }
    }

    async fn spawn_app(backend_url: String, llm: Arc<dyn LlmClient>) -> String {
        let executor = CodeExecutor::new(reqwest::Client::new(), backend_url, "python");
        let state = AppState {
            pipeline: Arc::new(CodePipeline::new(llm, executor)),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.expect("serve");
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn success_returns_generated_code_and_execution_result() {
        let backend = spawn_json_backend("/execute", StatusCode::OK, json!({"status": "ran"})).await;
        let app = spawn_app(backend, Arc::new(FixedLlm("model text"))).await;

        let response = reqwest::Client::new()
            .post(format!("{}/generate_and_run_code/", app))
            .query(&[("task", "Build a counter app"), ("stack", "React")])
            .send()
            .await
            .expect("request");

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.expect("json body");
        assert_eq!(body["generated_code"], "model text");
        assert_eq!(body["execution_result"], json!({"status": "ran"}));
        assert!(body.get("error").is_none());
        assert!(body.get("improved_code").is_none());
    }

    #[tokio::test]
    async fn failed_execution_returns_error_and_improved_code() {
        let backend =
            spawn_json_backend("/execute", StatusCode::BAD_REQUEST, json!({})).await;
        let app = spawn_app(backend, Arc::new(FixedLlm("model text"))).await;

        let response = reqwest::Client::new()
            .post(format!("{}/generate_and_run_code/", app))
            .query(&[("task", "Build a counter app"), ("stack", "React")])
            .send()
            .await
            .expect("request");

        // Failed execution still answers 200
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.expect("json body");
        assert_eq!(body["error"], "Execution failed with status 400");
        assert_eq!(body["improved_code"], "model text");
        assert!(body.get("generated_code").is_none());
        assert!(body.get("execution_result").is_none());
    }

    #[tokio::test]
    async fn missing_params_use_defaults() {
        let backend = spawn_json_backend("/execute", StatusCode::OK, json!({"output": "ok"})).await;
        let app = spawn_app(backend, Arc::new(FixedLlm("model text"))).await;

        let response = reqwest::Client::new()
            .post(format!("{}/generate_and_run_code/", app))
            .send()
            .await
            .expect("request");

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.expect("json body");
        assert_eq!(body["generated_code"], "model text");
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_server_error() {
        let backend = spawn_json_backend("/execute", StatusCode::OK, json!({"output": "ok"})).await;
        let app = spawn_app(backend, Arc::new(FailingLlm)).await;

        let response = reqwest::Client::new()
            .post(format!("{}/generate_and_run_code/", app))
            .send()
            .await
            .expect("request");

        assert_eq!(response.status(), 500);
        let body = response.text().await.expect("body");
        assert!(body.contains("401"));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let backend = spawn_json_backend("/execute", StatusCode::OK, json!({})).await;
        let app = spawn_app(backend, Arc::new(FixedLlm("unused"))).await;

        let response = reqwest::Client::new()
            .get(format!("{}/health", app))
            .send()
            .await
            .expect("request");

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.expect("json body");
        assert_eq!(body["status"], "ok");
    }
}
