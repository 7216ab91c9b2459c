//! Storage for uploaded files. Files are immutable once written; each upload
//! gets a fresh name so nothing is ever overwritten.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub file_name: String,
    pub public_url: String,
}

#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn store(&self, bytes: &[u8], original_name: &str) -> Result<StoredAsset, StorageError>;
}

/// Writes assets to `<root>/<folder>/` and links them as `<base_url>/<folder>/<file>`.
pub struct DiskAssetStore {
    root: PathBuf,
    folder: String,
    base_url: String,
}

impl DiskAssetStore {
    pub fn new(root: impl Into<PathBuf>, folder: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            folder: folder.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn directory(&self) -> PathBuf {
        self.root.join(&self.folder)
    }
}

#[async_trait]
impl AssetStore for DiskAssetStore {
    async fn store(&self, bytes: &[u8], original_name: &str) -> Result<StoredAsset, StorageError> {
        let directory = self.directory();
        tokio::fs::create_dir_all(&directory).await?;

        let file_name = unique_file_name(original_name);
        tokio::fs::write(directory.join(&file_name), bytes).await?;

        tracing::info!(
            "Stored upload '{}' as {}/{} ({} bytes)",
            original_name,
            self.folder,
            file_name,
            bytes.len()
        );

        Ok(StoredAsset {
            public_url: format!("{}/{}/{}", self.base_url, self.folder, file_name),
            file_name,
        })
    }
}

/// A uuid stem carrying over the original extension: `a.png` -> `<uuid>.png`.
pub fn unique_file_name(original_name: &str) -> String {
    let stem = Uuid::new_v4().simple().to_string();
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{}.{}", stem, ext.to_ascii_lowercase()),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_keep_the_extension() {
        let name = unique_file_name("holiday photo.PNG");
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), 32 + 4);
        assert_ne!(unique_file_name("a.png"), unique_file_name("a.png"));
    }

    #[test]
    fn odd_extensions_are_dropped() {
        assert_eq!(unique_file_name("README").len(), 32);
        assert_eq!(unique_file_name("../../etc/passwd").len(), 32);
        assert_eq!(unique_file_name("x.p/ng").len(), 32);
    }

    #[tokio::test]
    async fn store_creates_directory_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskAssetStore::new(dir.path().join("public"), "posts", "http://cdn.test/");

        let asset = store.store(b"\x89PNG", "a.png").await.unwrap();

        assert!(asset.public_url.starts_with("http://cdn.test/posts/"));
        assert!(asset.public_url.ends_with(".png"));
        let written = std::fs::read(store.directory().join(&asset.file_name)).unwrap();
        assert_eq!(written, b"\x89PNG");
    }
}
