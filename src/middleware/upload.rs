use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::middleware::context::{ContentKind, RequestContext};

pub fn accepts_method(method: &Method) -> bool {
    method == Method::POST || method == Method::PATCH || method == Method::PUT
}

/// Gates the thumbnail routes: unsupported methods are 404 whatever their
/// content type, then anything but multipart is 400.
pub async fn require_multipart(request: Request, next: Next) -> Result<Response, ApiError> {
    if !accepts_method(request.method()) {
        return Err(ApiError::MethodNotSupported);
    }

    let content = match request.extensions().get::<RequestContext>() {
        Some(ctx) => ctx.content,
        None => ContentKind::from_headers(request.headers()),
    };
    if content != ContentKind::Multipart {
        return Err(ApiError::InvalidContentType);
    }

    Ok(next.run(request).await)
}
