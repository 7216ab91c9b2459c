// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and the thumbnail upload routes.
pub mod auth;
pub mod upload;
