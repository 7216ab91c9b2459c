pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod server;
pub mod state;
pub mod storage;
pub mod store;

pub use server::app;
pub use state::AppState;
