use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::middleware::context::RequestContext;
use crate::query::PageRequest;

pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// A router result waiting for the envelope stage. Carried to
/// [`wrap_paginated`] through the response extensions.
#[derive(Debug, Clone)]
pub struct StagedResult {
    pub data: Value,
    pub total_count: Option<usize>,
}

impl StagedResult {
    pub fn plain(data: Value) -> Self {
        Self { data, total_count: None }
    }

    pub fn counted(data: Value, total_count: usize) -> Self {
        Self { data, total_count: Some(total_count) }
    }
}

impl IntoResponse for StagedResult {
    fn into_response(self) -> Response {
        let mut response = Json(&self.data).into_response();
        if let Some(total) = self.total_count {
            response
                .headers_mut()
                .insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
        }
        response.extensions_mut().insert(self);
        response
    }
}

/// `{data, pagination: {_page, _limit, _totalRows}}`
pub fn envelope(data: Value, page: PageRequest, total_rows: usize) -> Value {
    json!({
        "data": data,
        "pagination": {
            "_page": page.page,
            "_limit": page.limit,
            "_totalRows": total_rows,
        }
    })
}

/// Rewrites counted GET results into the pagination envelope. Status and
/// headers are kept; every other response passes through as staged.
pub async fn wrap_paginated(request: Request, next: Next) -> Response {
    let is_get = request.method() == Method::GET;
    let page = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.page)
        .unwrap_or_default();

    let response = next.run(request).await;
    if !is_get {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let Some(staged) = parts.extensions.remove::<StagedResult>() else {
        return Response::from_parts(parts, body);
    };
    let Some(total) = staged.total_count else {
        return Response::from_parts(parts, body);
    };

    let wrapped = envelope(staged.data, page, total);
    match serde_json::to_vec(&wrapped) {
        Ok(bytes) => {
            parts.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()));
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::error!("Failed to serialize pagination envelope: {}", e);
            Response::from_parts(parts, body)
        }
    }
}
