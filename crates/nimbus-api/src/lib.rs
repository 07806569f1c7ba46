//! Inbound delivery surface for addon callbacks.
//!
//! Addons post their result arrays to `POST /callbacks/{cid}`; the handler
//! forwards the raw bytes to the callback registry. The sender is never
//! shown an error: a malformed, unknown, or already-consumed correlation id
//! is dropped silently, since the search it belonged to has already settled.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use nimbus_providers::CallbackRegistry;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::debug;
use uuid::Uuid;

/// Build the callback router over a shared registry.
#[must_use]
pub fn router(registry: Arc<CallbackRegistry>) -> Router {
    Router::new()
        .route("/callbacks/{cid}", post(deliver_callback))
        .with_state(registry)
}

async fn deliver_callback(
    State(registry): State<Arc<CallbackRegistry>>,
    Path(cid): Path<String>,
    body: Bytes,
) -> StatusCode {
    match Uuid::parse_str(&cid) {
        Ok(id) => registry.deliver(id, body.to_vec()),
        Err(_) => debug!(%cid, "ignoring callback with malformed correlation id"),
    }
    StatusCode::OK
}

/// Serve the callback router on the given listener until the task is
/// cancelled.
///
/// # Errors
///
/// Returns an error if the server fails to accept connections.
pub async fn serve(listener: TcpListener, registry: Arc<CallbackRegistry>) -> anyhow::Result<()> {
    let app = router(registry).layer(TraceLayer::new_for_http());
    axum::serve(listener, app).await?;
    Ok(())
}
