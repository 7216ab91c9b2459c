// handlers/protected/auth/profile.rs - GET /api/profile handler

use axum::{response::Json, Extension};
use serde::Serialize;

use crate::auth::decode_subject;
use crate::error::ApiError;
use crate::fixtures::Faker;
use crate::middleware::AuthUser;

#[derive(Debug, Serialize)]
pub struct Profile {
    pub username: String,
    pub city: String,
    pub email: String,
}

/// GET /api/profile - who the token says the caller is.
///
/// Only `username` comes from the token; city and email are filler.
pub async fn profile_get(Extension(user): Extension<AuthUser>) -> Result<Json<Profile>, ApiError> {
    let username = decode_subject(&user.token).map_err(|e| {
        tracing::warn!("Failed to parse token: {}", e);
        ApiError::bad_request("Failed to parse token.")
    })?;

    let mut faker = Faker::default();
    Ok(Json(Profile {
        username,
        city: faker.city(),
        email: faker.email().to_lowercase(),
    }))
}
