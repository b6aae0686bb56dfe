//! HTTP API handlers for suno-fs
//!
//! Every data route lives under `/api/fs`. Handlers hand the synchronous store
//! call to the blocking thread pool and translate the result into JSON.

pub mod health;
pub mod projects;
pub mod styles;

pub use health::health_routes;
pub use projects::{create_project, get_project, list_projects, save_generation, update_project};
pub use styles::{get_prompt_template, list_styles};

use crate::store::ProjectStore;
use crate::{ApiError, ApiResult, AppState};

/// Run a store operation on the blocking pool
pub(crate) async fn with_store<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&ProjectStore) -> suno_common::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("Store task failed: {}", e)))?
        .map_err(ApiError::from)
}
