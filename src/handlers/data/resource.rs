use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;

use super::json_body;
use crate::error::ApiError;
use crate::middleware::{RequestContext, StagedResult};
use crate::query::ListQuery;
use crate::state::AppState;
use crate::store::ResourceKind;

/// GET /api/:resource - list a collection or read a singular resource
pub async fn resource_get(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<StagedResult, ApiError> {
    match state.store.kind(&resource).await? {
        ResourceKind::Singular => Ok(StagedResult::plain(state.store.get_singular(&resource).await?)),
        ResourceKind::Collection => {
            let query = ListQuery::parse(&ctx.query);
            let page = state.store.list(&resource, &query).await?;

            let data = Value::Array(page.items);
            if page.paginated && state.config.pagination.counts(&resource) {
                Ok(StagedResult::counted(data, page.total))
            } else {
                Ok(StagedResult::plain(data))
            }
        }
    }
}

/// POST /api/:resource - insert into a collection, or replace a singular resource
pub async fn resource_post(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, StagedResult), ApiError> {
    let body = json_body(body)?;
    match state.store.kind(&resource).await? {
        ResourceKind::Collection => {
            let record = state.store.insert(&resource, body).await?;
            tracing::debug!("Inserted record into {}", resource);
            Ok((StatusCode::CREATED, StagedResult::plain(record)))
        }
        ResourceKind::Singular => {
            let value = state.store.replace_singular(&resource, body).await?;
            Ok((StatusCode::CREATED, StagedResult::plain(value)))
        }
    }
}

/// PUT /api/:resource - replace a singular resource
pub async fn resource_put(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StagedResult, ApiError> {
    let body = json_body(body)?;
    match state.store.kind(&resource).await? {
        ResourceKind::Singular => Ok(StagedResult::plain(state.store.replace_singular(&resource, body).await?)),
        ResourceKind::Collection => Err(ApiError::MethodNotSupported),
    }
}

/// PATCH /api/:resource - merge into a singular resource
pub async fn resource_patch(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StagedResult, ApiError> {
    let body = json_body(body)?;
    match state.store.kind(&resource).await? {
        ResourceKind::Singular => Ok(StagedResult::plain(state.store.patch_singular(&resource, body).await?)),
        ResourceKind::Collection => Err(ApiError::MethodNotSupported),
    }
}
