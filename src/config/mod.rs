use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Public base URL the uploaded assets are reachable under.
    pub static_url: String,
    pub max_request_size_bytes: usize,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// The JSON document holding every collection
    pub db_path: PathBuf,
    /// Served as static files; uploads land in `<public_dir>/posts`
    pub public_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Collections that report a total count on paginated lists.
    /// `None` means every collection does.
    pub counted_collections: Option<BTreeSet<String>>,
}

impl PaginationConfig {
    pub fn counts(&self, collection: &str) -> bool {
        match &self.counted_collections {
            Some(set) => set.contains(collection),
            None => true,
        }
    }
}

pub const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60 * 24;
const DEFAULT_PORT: u16 = 3000;
const DEV_JWT_SECRET: &str = "json-mock-api-development-secret";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        match env::var("STATIC_URL") {
            Ok(v) if !v.trim().is_empty() => {
                self.server.static_url = v.trim().trim_end_matches('/').to_string();
            }
            // Follow the port when no explicit URL is set
            _ => self.server.static_url = format!("http://localhost:{}", self.server.port),
        }
        if let Ok(v) = env::var("MAX_REQUEST_SIZE_BYTES") {
            self.server.max_request_size_bytes = v.parse().unwrap_or(self.server.max_request_size_bytes);
        }
        if let Ok(v) = env::var("ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }

        // Storage overrides
        if let Ok(v) = env::var("DB_PATH") {
            self.storage.db_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PUBLIC_DIR") {
            self.storage.public_dir = PathBuf::from(v);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("TOKEN_TTL_SECS") {
            self.security.token_ttl_secs = v.parse().unwrap_or(self.security.token_ttl_secs);
        }

        // Pagination overrides
        if let Ok(v) = env::var("PAGINATION_COLLECTIONS") {
            self.pagination.counted_collections = parse_collection_list(&v);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: DEFAULT_PORT,
                static_url: format!("http://localhost:{}", DEFAULT_PORT),
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
                enable_cors: true,
            },
            storage: StorageConfig {
                db_path: PathBuf::from("db.json"),
                public_dir: PathBuf::from("public"),
            },
            security: SecurityConfig {
                jwt_secret: DEV_JWT_SECRET.to_string(),
                token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            },
            pagination: PaginationConfig::default(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: DEFAULT_PORT,
                static_url: format!("http://localhost:{}", DEFAULT_PORT),
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
                enable_cors: true,
            },
            storage: StorageConfig {
                db_path: PathBuf::from("db.json"),
                public_dir: PathBuf::from("public"),
            },
            security: SecurityConfig {
                // Must be injected through JWT_SECRET
                jwt_secret: String::new(),
                token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            },
            pagination: PaginationConfig::default(),
        }
    }
}

/// `"posts, products"` -> {"posts", "products"}; `"*"` or blank means all.
fn parse_collection_list(raw: &str) -> Option<BTreeSet<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "*" {
        return None;
    }
    Some(
        trimmed
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
