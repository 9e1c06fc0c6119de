//! Shared helpers for tests: throwaway HTTP backends on ephemeral ports.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Spawn a backend that answers every POST to `path` with the given status
/// and JSON body. Returns the full URL of the route.
pub(crate) async fn spawn_json_backend(path: &str, status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        path,
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    serve(app, path).await
}

/// Spawn a backend that echoes the request JSON back as
/// `{"received": <request body>}` with status 200.
pub(crate) async fn spawn_echo_backend(path: &str) -> String {
    let app = Router::new().route(
        path,
        post(|Json(body): Json<Value>| async move { Json(json!({ "received": body })) }),
    );
    serve(app, path).await
}

/// A URL on a port where nothing is listening, so connections are refused.
pub(crate) async fn refused_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}{}", addr, path)
}

async fn serve(app: Router, path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}{}", addr, path)
}
