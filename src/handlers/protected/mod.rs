// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Mounted behind `middleware::require_bearer`, so every handler here can
// rely on an `AuthUser` in the request extensions.
pub mod auth;
