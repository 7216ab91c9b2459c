// handlers/public/upload/mod.rs - Thumbnail upload routes
//
// Mounted behind `middleware::require_multipart`; the handler turns the
// multipart form into a JSON record and delegates to the posts collection.
pub mod thumbnail;

pub use thumbnail::{thumbnail_create, thumbnail_update, POSTS_COLLECTION};
