#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

use json_mock_api::config::AppConfig;
use json_mock_api::storage::AssetStore;
use json_mock_api::store::{Document, JsonFileStore};
use json_mock_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const POST_COUNT: usize = 37;

/// One server per test: its own port, document file and public directory.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub config: AppConfig,
    _dir: TempDir,
}

impl TestServer {
    pub fn db_path(&self) -> PathBuf {
        self.config.storage.db_path.clone()
    }

    pub fn public_dir(&self) -> PathBuf {
        self.config.storage.public_dir.clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Log in and return the access token
    pub async fn login(&self, client: &reqwest::Client, username: &str) -> Result<String> {
        let res = client
            .post(self.url("/api/login"))
            .json(&json!({ "username": username, "password": "secret-password" }))
            .send()
            .await?;
        anyhow::ensure!(res.status().is_success(), "login failed: {}", res.status());
        let body = res.json::<Value>().await?;
        body["accessToken"]
            .as_str()
            .map(str::to_string)
            .context("login response missing accessToken")
    }
}

pub fn test_config(dir: &TempDir, port: u16) -> AppConfig {
    let mut config = AppConfig::development();
    config.server.port = port;
    config.server.static_url = format!("http://127.0.0.1:{}", port);
    config.storage.db_path = dir.path().join("db.json");
    config.storage.public_dir = dir.path().join("public");
    config.security.jwt_secret = TEST_SECRET.to_string();
    config
}

pub async fn start_server() -> Result<TestServer> {
    start_server_with(seed_document(), |_| {}).await
}

pub async fn start_server_with(
    document: Document,
    customize: impl FnOnce(&mut AppConfig),
) -> Result<TestServer> {
    spawn_server(document, customize, |state| state).await
}

/// Seeded server whose uploads go to `assets` instead of the public directory.
pub async fn start_server_with_assets(assets: Arc<dyn AssetStore>) -> Result<TestServer> {
    spawn_server(seed_document(), |_| {}, |state| state.with_assets(assets)).await
}

async fn spawn_server(
    document: Document,
    customize: impl FnOnce(&mut AppConfig),
    wire: impl FnOnce(AppState) -> AppState,
) -> Result<TestServer> {
    let dir = tempfile::tempdir().context("failed to create temp dir")?;

    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let mut config = test_config(&dir, port);
    customize(&mut config);

    let store = JsonFileStore::open_or_seed(&config.storage.db_path, || document).await?;
    let state = wire(AppState::new(config.clone(), Arc::new(store)));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app(state)).await;
    });

    Ok(TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        config,
        _dir: dir,
    })
}

/// 37 posts with integer ids, 12 students, cities, a tag list and a profile.
pub fn seed_document() -> Document {
    let created = 1_600_000_000_000_i64;

    let posts: Vec<Value> = (1..=POST_COUNT as i64)
        .map(|i| {
            json!({
                "id": i,
                "title": format!("Post {:02}", i),
                "author": if i % 3 == 0 { "Ada Lovelace" } else { "Alan Turing" },
                "views": i * 10,
                "imageUrl": format!("https://picsum.photos/id/{}/1368/400", i),
                "createdAt": created,
                "updatedAt": created,
            })
        })
        .collect();

    let students: Vec<Value> = (1..=12_i64)
        .map(|i| {
            json!({
                "id": format!("s{}", i),
                "name": format!("Student {:02}", i),
                "gender": if i % 2 == 0 { "female" } else { "male" },
                "mark": (i % 10) as f64,
                "city": if i <= 6 { "hn" } else { "hcm" },
                "createdAt": created,
                "updatedAt": created,
            })
        })
        .collect();

    let mut doc = Map::new();
    doc.insert("posts".into(), Value::Array(posts));
    doc.insert("students".into(), Value::Array(students));
    doc.insert(
        "cities".into(),
        json!([{ "code": "hn", "name": "Ha Noi" }, { "code": "hcm", "name": "Ho Chi Minh" }]),
    );
    doc.insert("tags".into(), json!(["Design", "Dashboard"]));
    doc.insert(
        "public-profile".into(),
        json!({ "id": "public-profile", "name": "Public Person", "city": "Hue", "email": "public@example.com" }),
    );
    doc
}

pub fn counted(collections: &[&str]) -> Option<BTreeSet<String>> {
    Some(collections.iter().map(|c| c.to_string()).collect())
}

/// Read the document file as the server last wrote it
pub fn read_document(server: &TestServer) -> Result<Value> {
    let bytes = std::fs::read(server.db_path())?;
    Ok(serde_json::from_slice(&bytes)?)
}
