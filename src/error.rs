// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::TokenError;
use crate::storage::StorageError;
use crate::store::StoreError;

pub const MISSING_LOGIN_MESSAGE: &str = "You need to login to access";
pub const INVALID_TOKEN_TYPE_MESSAGE: &str = "Invalid token type. Only \"Bearer\" supported";
pub const INVALID_TOKEN_MESSAGE: &str = "Access token is not valid or expired.";
pub const INVALID_CONTENT_TYPE_MESSAGE: &str =
    "Invalid Content-Type, only multipart/form-data is supported.";

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// The body key differs by family: validation and gate failures answer with
/// `{"error": ..}`, authentication failures with `{"message": ..}`, and a
/// missing resource with an empty object.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError(String),
    BadRequest(String),
    InvalidContentType,

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    MethodNotSupported,
    ResourceNotFound,

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidContentType => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::MethodNotSupported => StatusCode::NOT_FOUND,
            ApiError::ResourceNotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(msg) => msg,
            ApiError::BadRequest(msg) => msg,
            ApiError::InvalidContentType => INVALID_CONTENT_TYPE_MESSAGE,
            ApiError::Unauthorized(msg) => msg,
            ApiError::MethodNotSupported => "Not Found",
            ApiError::ResourceNotFound => "Not Found",
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Unauthorized(msg) | ApiError::BadRequest(msg) => json!({ "message": msg }),
            ApiError::ResourceNotFound => json!({}),
            _ => json!({ "error": self.message() }),
        }
    }
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownResource(_) | StoreError::RecordNotFound { .. } => {
                ApiError::ResourceNotFound
            }
            StoreError::NotACollection(name) => {
                tracing::debug!("Collection operation on singular resource '{}'", name);
                ApiError::ResourceNotFound
            }
            StoreError::InvalidRecord(msg) => ApiError::bad_request(msg),
            StoreError::DuplicateId(_) => ApiError::conflict("Insert failed, duplicate id"),
            StoreError::Io(e) => {
                // Don't expose filesystem paths to clients
                tracing::error!("Document store I/O error: {}", e);
                ApiError::internal_server_error("Failed to persist document")
            }
            StoreError::Serialization(e) => {
                tracing::error!("Document store serialization error: {}", e);
                ApiError::internal_server_error("Failed to persist document")
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Upload storage error: {}", err);
        ApiError::internal_server_error("Failed to store uploaded file")
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MissingSecret | TokenError::Encoding(_) => {
                tracing::error!("Token issuance failed: {}", err);
                ApiError::internal_server_error("Failed to issue access token")
            }
            TokenError::Invalid(_) => ApiError::unauthorized(INVALID_TOKEN_MESSAGE),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
