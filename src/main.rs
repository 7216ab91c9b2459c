use std::sync::Arc;

use json_mock_api::{
    config, fixtures,
    fixtures::FixtureOptions,
    is_production,
    server,
    store::JsonFileStore,
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PORT, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config().clone();
    tracing::info!("Starting JSON mock API in {:?} mode", config.environment);

    if is_production!() && config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; logins will fail until it is configured");
    }

    let store = JsonFileStore::open_or_seed(&config.storage.db_path, || {
        fixtures::generate(&FixtureOptions::default())
    })
    .await?;

    let state = AppState::new(config, Arc::new(store));
    server::serve(state).await
}
