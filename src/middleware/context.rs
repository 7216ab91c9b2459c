use axum::{
    extract::Request,
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::Response,
};

use crate::query::{parse_pairs, PageRequest};

/// What kind of write a request performs, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
}

impl WriteKind {
    pub fn from_method(method: &Method) -> Option<Self> {
        if method == Method::POST {
            Some(WriteKind::Create)
        } else if method == Method::PATCH || method == Method::PUT {
            Some(WriteKind::Update)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Multipart,
    Other,
}

impl ContentKind {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(value) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
            return ContentKind::Other;
        };
        let value = value.to_ascii_lowercase();
        if value.contains("multipart/form-data") {
            ContentKind::Multipart
        } else if value.contains("application/json") || value.contains("+json") {
            ContentKind::Json
        } else {
            ContentKind::Other
        }
    }
}

/// The `Authorization` header as the route guard sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Missing,
    WrongScheme,
    /// Scheme was `Bearer`; the token part may be empty.
    Bearer(String),
}

impl Credentials {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(raw) = headers.get(header::AUTHORIZATION) else {
            return Credentials::Missing;
        };
        let Ok(raw) = raw.to_str() else {
            return Credentials::WrongScheme;
        };
        if raw.is_empty() {
            return Credentials::Missing;
        }

        let mut parts = raw.split(' ');
        match parts.next() {
            Some("Bearer") => Credentials::Bearer(parts.next().unwrap_or("").to_string()),
            _ => Credentials::WrongScheme,
        }
    }
}

/// Everything later stages need to know about the request, parsed once.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub write_kind: Option<WriteKind>,
    pub content: ContentKind,
    pub credentials: Credentials,
    pub query: Vec<(String, String)>,
    pub page: PageRequest,
}

impl RequestContext {
    pub fn from_parts(method: &Method, headers: &HeaderMap, raw_query: Option<&str>) -> Self {
        let query = raw_query.map(parse_pairs).unwrap_or_default();
        let page = PageRequest::from_pairs(&query);
        Self {
            write_kind: WriteKind::from_method(method),
            content: ContentKind::from_headers(headers),
            credentials: Credentials::from_headers(headers),
            query,
            page,
        }
    }
}

pub async fn capture_context(mut request: Request, next: Next) -> Response {
    let context = RequestContext::from_parts(request.method(), request.headers(), request.uri().query());
    request.extensions_mut().insert(context);
    next.run(request).await
}
