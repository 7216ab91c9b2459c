// handlers/data/mod.rs - Generic resource router over the document store
//
// `/:resource` addresses a collection or a singular resource,
// `/:resource/:id` a single record of a collection. Successful reads and
// writes are returned as `StagedResult` so the envelope stage can see the
// total count.
pub mod record;
pub mod resource;

pub use record::{record_delete, record_get, record_patch, record_put};
pub use resource::{resource_get, resource_patch, resource_post, resource_put};

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

use crate::error::ApiError;

/// Unwrap a JSON body, reporting parse failures as 400.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
    }
}
