use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use super::json_body;
use crate::error::ApiError;
use crate::middleware::StagedResult;
use crate::state::AppState;

/// GET /api/:resource/:id
pub async fn record_get(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<StagedResult, ApiError> {
    let record = state.store.get(&resource, &id).await?;
    Ok(StagedResult::plain(record))
}

/// PUT /api/:resource/:id - full replacement, id preserved
pub async fn record_put(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StagedResult, ApiError> {
    let body = json_body(body)?;
    let record = state.store.replace(&resource, &id, body).await?;
    Ok(StagedResult::plain(record))
}

/// PATCH /api/:resource/:id - shallow merge
pub async fn record_patch(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StagedResult, ApiError> {
    let body = json_body(body)?;
    let record = state.store.patch(&resource, &id, body).await?;
    Ok(StagedResult::plain(record))
}

/// DELETE /api/:resource/:id - answers `{}`
pub async fn record_delete(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<StagedResult, ApiError> {
    state.store.delete(&resource, &id).await?;
    tracing::debug!("Deleted {} from {}", id, resource);
    Ok(StagedResult::plain(json!({})))
}
