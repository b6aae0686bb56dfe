//! Project endpoints
//!
//! - `GET  /api/fs/projects`
//! - `POST /api/fs/projects`
//! - `GET  /api/fs/projects/:id`
//! - `PUT  /api/fs/projects/:id`
//! - `POST /api/fs/projects/:id/generations`

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use super::with_store;
use crate::store::{CreateProjectRequest, ProjectConfig, UpdateProjectRequest};
use crate::{ApiResult, AppState};

/// `{success: true}`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// `{success: true, attempt: N}`
#[derive(Debug, Serialize)]
pub struct SaveGenerationResponse {
    pub success: bool,
    pub attempt: u32,
}

/// GET /api/fs/projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Map<String, Value>>>> {
    let projects = with_store(&state, |store| store.list_projects()).await?;
    Ok(Json(projects))
}

/// GET /api/fs/projects/:id
///
/// Config, lyrics and generations merged into one object. 404 if the project
/// directory does not exist.
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Map<String, Value>>> {
    let project = with_store(&state, move |store| store.get_project(&id)).await?;
    Ok(Json(project))
}

/// POST /api/fs/projects
///
/// **Request:** `{"id"?: "...", "name"?: any, "style"?: any}`
/// **Response:** the written config
pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> ApiResult<Json<ProjectConfig>> {
    let config = with_store(&state, move |store| store.create_project(request)).await?;
    Ok(Json(config))
}

/// PUT /api/fs/projects/:id
///
/// **Request:** `{"name"?, "style"?, "rawLyrics"?, "enhancedLyrics"?}`; `name`
/// and `style` may be any JSON value, lyrics must be strings
/// **Response:** `{"success": true}`
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    with_store(&state, move |store| store.update_project(&id, request)).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/fs/projects/:id/generations
///
/// **Request:** any JSON object; every field is stored with the attempt
/// **Response:** `{"success": true, "attempt": N}`
pub async fn save_generation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> ApiResult<Json<SaveGenerationResponse>> {
    let attempt = with_store(&state, move |store| store.append_generation(&id, fields)).await?;
    Ok(Json(SaveGenerationResponse {
        success: true,
        attempt,
    }))
}
