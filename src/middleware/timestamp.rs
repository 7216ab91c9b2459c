use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Map, Value};

use crate::middleware::context::{ContentKind, RequestContext, WriteKind};
use crate::state::AppState;
use crate::store::record::{CREATED_AT_FIELD, UPDATED_AT_FIELD};

/// Milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Stamp a write body with one captured instant.
pub fn stamp(body: &mut Map<String, Value>, kind: WriteKind, now_ms: i64) {
    match kind {
        WriteKind::Create => {
            body.insert(CREATED_AT_FIELD.to_string(), Value::from(now_ms));
            body.insert(UPDATED_AT_FIELD.to_string(), Value::from(now_ms));
        }
        WriteKind::Update => {
            // createdAt is only ever set at creation
            body.remove(CREATED_AT_FIELD);
            body.insert(UPDATED_AT_FIELD.to_string(), Value::from(now_ms));
        }
    }
}

/// Annotates JSON object bodies of POST/PUT/PATCH requests. Anything else
/// passes through untouched; multipart bodies are stamped by the upload handler.
pub async fn stamp_json_writes(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let kind = match request.extensions().get::<RequestContext>() {
        Some(ctx) if ctx.content == ContentKind::Json => ctx.write_kind,
        _ => None,
    };
    let Some(kind) = kind else {
        return next.run(request).await;
    };

    let (mut parts, body) = request.into_parts();
    let bytes = match to_bytes(body, state.config.server.max_request_size_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Rejecting write body: {}", e);
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({ "error": "Request body too large" })),
            )
                .into_response();
        }
    };

    let body = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(mut fields)) => {
            stamp(&mut fields, kind, now_ms());
            match serde_json::to_vec(&Value::Object(fields)) {
                Ok(rewritten) => {
                    parts.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(rewritten.len()));
                    Body::from(rewritten)
                }
                Err(_) => Body::from(bytes),
            }
        }
        // Arrays, scalars and malformed JSON are left for the handler to judge
        _ => Body::from(bytes),
    };

    next.run(Request::from_parts(parts, body)).await
}
