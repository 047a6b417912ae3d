//! RPC request handlers.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use kyc_engine::tracing_spans::rpc_span;
use kyc_engine::VerificationOrchestrator;
use kyc_types::{Decision, VerificationRequest};
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;

use crate::error::RpcError;

/// Shared by every handler.
pub struct AppState {
    pub orchestrator: Arc<VerificationOrchestrator>,
    /// When false, `/metrics` answers 404.
    pub metrics_enabled: bool,
}

// ── Verification ─────────────────────────────────────────────────────────

pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VerificationRequest>,
) -> Result<Json<Decision>, RpcError> {
    let decision = state
        .orchestrator
        .verify(&request)
        .instrument(rpc_span("verify"))
        .await?;
    Ok(Json(decision))
}

// ── Health ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ── Metrics ──────────────────────────────────────────────────────────────

pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, RpcError> {
    if !state.metrics_enabled {
        return Err(RpcError::MetricsDisabled);
    }
    let body = state
        .orchestrator
        .metrics()
        .encode()
        .map_err(|e| RpcError::Internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
