use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{Res, api, api::CallbackState};

/// Serves the callback route on `listener` until the callback handler asks
/// for shutdown. The server stopping after that request is the normal way
/// out and returns `Ok`.
pub async fn serve_callback(
    listener: TcpListener,
    callback_path: &str,
    state: Arc<CallbackState>,
) -> Res<()> {
    let shutdown = state.shutdown_signal();
    let app = Router::new()
        .route("/health", get(api::health))
        .route(callback_path, get(api::callback).layer(Extension(state)));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.notified().await })
        .await?;
    Ok(())
}
