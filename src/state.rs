use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::{AssetStore, DiskAssetStore};
use crate::store::DocumentStore;

/// Folder under the public directory that receives post thumbnails.
pub const UPLOAD_FOLDER: &str = "posts";

/// Shared handles every handler and middleware needs
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub assets: Arc<dyn AssetStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let assets = DiskAssetStore::new(
            config.storage.public_dir.clone(),
            UPLOAD_FOLDER,
            config.server.static_url.clone(),
        );
        Self {
            config: Arc::new(config),
            store,
            assets: Arc::new(assets),
        }
    }

    pub fn with_assets(mut self, assets: Arc<dyn AssetStore>) -> Self {
        self.assets = assets;
        self
    }
}
