use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tracing::error;

use crate::relay::Relay;

pub fn router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route("/", post(handle_chat))
        .route("/health", get(health_check))
        .with_state(relay)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Outer boundary of the pipeline. Replies, command acks and rendered
/// provider errors are all 200 plain text; only faults the pipeline did not
/// anticipate become a 500, and the process keeps serving either way.
async fn handle_chat(State(relay): State<Arc<Relay>>, body: Bytes) -> Response {
    // The vintage client sends whatever bytes it has; decode leniently.
    let body = String::from_utf8_lossy(&body);

    match relay.handle(&body).await {
        Ok(reply) => plain_text(StatusCode::OK, reply),
        Err(err) => {
            error!(error = %err, "request failed");
            plain_text(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn plain_text(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
