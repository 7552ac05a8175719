use crate::error::AppError;
use crate::service::{AnswerResult, QaService, QueryRequest};
use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::Instrument;

pub fn router(service: Arc<QaService>) -> Router {
    Router::new()
        .route("/api/request", post(handle_request))
        .with_state(service)
}

async fn handle_request(
    State(service): State<Arc<QaService>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<AnswerResult>, AppError> {
    let span = tracing::info_span!("request", id = request.id);
    let result = service.handle(request).instrument(span).await?;
    Ok(Json(result))
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, service: Arc<QaService>) -> Result<()> {
    let addr = listener.local_addr().context("Failed to read bound address")?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
