//! suno-fs library - project store HTTP service
//!
//! Serves project records, style metadata and the prompt template from the
//! data root as JSON. All generation and enhancement calls happen in the
//! browser; this service only reads and writes files.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use suno_common::DataLayout;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod store;

pub use crate::error::{ApiError, ApiResult};
pub use crate::store::ProjectStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Project, style and template storage
    pub store: Arc<ProjectStore>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state over `layout`
    pub fn new(layout: DataLayout) -> Self {
        Self {
            store: Arc::new(ProjectStore::new(layout)),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Data routes are nested under `/api/fs` and accept cross-origin requests
/// from any origin; `/health` sits at the root.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let data_routes = Router::new()
        .route("/projects", get(api::list_projects).post(api::create_project))
        .route("/projects/:id", get(api::get_project).put(api::update_project))
        .route("/projects/:id/generations", post(api::save_generation))
        .route("/styles", get(api::list_styles))
        .route("/templates/gpt-prompt", get(api::get_prompt_template))
        .layer(cors);

    Router::new()
        .nest("/api/fs", data_routes)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
