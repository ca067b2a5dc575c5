//! Health Routes
//!
//! - GET /health - Liveness with server time and uptime

use axum::{extract::State, Json};
use chrono::{Local, SecondsFormat};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health
///
/// Returns 200 while the process is serving. The upstream provider is not
/// probed.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        ts: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
