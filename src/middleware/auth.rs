use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{verify_token, TokenError};
use crate::error::{ApiError, INVALID_TOKEN_MESSAGE, INVALID_TOKEN_TYPE_MESSAGE, MISSING_LOGIN_MESSAGE};
use crate::middleware::context::{Credentials, RequestContext};
use crate::state::AppState;

/// Authenticated caller, inserted into request extensions by the guard
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    /// Raw bearer token, kept for handlers that re-read its payload
    pub token: String,
}

/// Route guard for private routes. Rejects with 401 unless the request
/// carries a valid `Bearer` token signed with the configured secret.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credentials = match request.extensions().get::<RequestContext>() {
        Some(ctx) => ctx.credentials.clone(),
        None => Credentials::from_headers(request.headers()),
    };

    let user = authenticate(&credentials, &state.config.security.jwt_secret)?;
    tracing::debug!("Authenticated request for '{}'", user.username);

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Check order: header present, scheme, then the token itself.
pub fn authenticate(credentials: &Credentials, secret: &str) -> Result<AuthUser, ApiError> {
    let token = match credentials {
        Credentials::Missing => return Err(ApiError::unauthorized(MISSING_LOGIN_MESSAGE)),
        Credentials::WrongScheme => return Err(ApiError::unauthorized(INVALID_TOKEN_TYPE_MESSAGE)),
        Credentials::Bearer(token) => token,
    };

    let claims = verify_token(token, secret).map_err(|e| {
        if matches!(e, TokenError::MissingSecret) {
            tracing::warn!("Rejecting bearer token: JWT secret not configured");
        }
        ApiError::unauthorized(INVALID_TOKEN_MESSAGE)
    })?;

    Ok(AuthUser {
        username: claims.sub,
        token: token.clone(),
    })
}
