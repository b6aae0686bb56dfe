//! Read-only reference data: styles and the prompt template

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{Map, Value};

use super::with_store;
use crate::{ApiResult, AppState};

/// Prompt template response
#[derive(Debug, Serialize)]
pub struct PromptTemplateResponse {
    pub prompt: String,
}

/// GET /api/fs/styles
pub async fn list_styles(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Map<String, Value>>>> {
    let styles = with_store(&state, |store| store.list_styles()).await?;
    Ok(Json(styles))
}

/// GET /api/fs/templates/gpt-prompt
///
/// 404 when `templates/gpt-prompt.txt` is missing.
pub async fn get_prompt_template(
    State(state): State<AppState>,
) -> ApiResult<Json<PromptTemplateResponse>> {
    let prompt = with_store(&state, |store| store.read_prompt_template()).await?;
    Ok(Json(PromptTemplateResponse { prompt }))
}
