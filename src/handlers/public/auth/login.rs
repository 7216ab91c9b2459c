// handlers/public/auth/login.rs - POST /api/login handler

use axum::{extract::rejection::JsonRejection, extract::State, response::Json};
use serde::Serialize;
use serde_json::Value;

use crate::auth::issue_token;
use crate::error::ApiError;
use crate::state::AppState;

pub const MIN_USERNAME_CHARS: usize = 4;
pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Lenient read of a JSON body: strings as-is, numbers and booleans in
    /// their text form, anything else absent.
    pub fn from_value(body: &Value) -> Self {
        let field = |name: &str| match body.get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        };
        Self {
            username: field("username"),
            password: field("password"),
        }
    }

    /// First failing rule wins. Lengths count UTF-16 code units, the way
    /// browser clients measure them.
    pub fn validate(&self) -> Result<(&str, &str), ApiError> {
        let username = match self.username.as_deref() {
            Some(u) if !u.is_empty() => u,
            _ => return Err(ApiError::validation_error("Missing username")),
        };
        if text_length(username) < MIN_USERNAME_CHARS {
            return Err(ApiError::validation_error("username should have at least 4 characters"));
        }

        let password = match self.password.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => return Err(ApiError::validation_error("Missing password")),
        };
        if text_length(password) < MIN_PASSWORD_CHARS {
            return Err(ApiError::validation_error("password should have at least 6 characters"));
        }

        Ok((username, password))
    }
}

fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// Absolute expiry, milliseconds since the epoch
    pub expired_at: i64,
}

/// POST /api/login - exchange a username/password pair for a bearer token.
///
/// The password is shape-checked only; there is no credential store.
pub async fn login_post(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let body = match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            tracing::debug!("Login body unreadable, treating as empty: {}", rejection);
            Value::Null
        }
    };

    let request = LoginRequest::from_value(&body);
    let (username, _password) = request.validate()?;

    let issued = issue_token(username, &state.config.security)?;
    tracing::info!("Issued access token for '{}'", username);

    Ok(Json(LoginResponse {
        access_token: issued.access_token,
        expired_at: issued.expired_at_ms,
    }))
}
