//! `GET /health`
//!
//! Reports `degraded` while the projects directory cannot be listed, so a
//! deleted or unmounted data root shows up before the first project request
//! fails.

use std::fs;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub data_root: String,
    pub data_root_readable: bool,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let layout = state.store.layout().clone();
    let readable = tokio::task::spawn_blocking(move || fs::read_dir(&layout.projects_dir).is_ok())
        .await
        .unwrap_or(false);
    if !readable {
        warn!(
            "Projects directory {} is not readable",
            state.store.layout().projects_dir.display()
        );
    }

    let uptime = Utc::now().signed_duration_since(state.startup_time);
    Json(HealthResponse {
        status: if readable { "ok" } else { "degraded" },
        module: "suno-fs",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: uptime.num_seconds().max(0) as u64,
        data_root: state.store.layout().root.display().to_string(),
        data_root_readable: readable,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
