//! The document store: one JSON object whose top-level keys are resources.
//!
//! An array-valued key is a collection of records addressed by `id`; an
//! object-valued key is a singular resource. Everything the HTTP layer needs
//! goes through [`DocumentStore`] so the backing medium can change without
//! touching the middleware.

pub mod json_file;
pub mod record;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::query::{ListPage, ListQuery};

pub use json_file::JsonFileStore;

pub type Document = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Resource '{0}' is not a collection")]
    NotACollection(String),

    #[error("Record {id} not found in {collection}")]
    RecordNotFound { collection: String, id: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Collection,
    Singular,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn kind(&self, resource: &str) -> Result<ResourceKind, StoreError>;

    async fn list(&self, collection: &str, query: &ListQuery) -> Result<ListPage, StoreError>;

    async fn count(&self, collection: &str) -> Result<usize, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Value, StoreError>;

    async fn insert(&self, collection: &str, record: Value) -> Result<Value, StoreError>;

    /// Full replacement. The path id wins over any body id.
    async fn replace(&self, collection: &str, id: &str, record: Value) -> Result<Value, StoreError>;

    /// Shallow merge of `changes` into the stored record.
    async fn patch(&self, collection: &str, id: &str, changes: Value) -> Result<Value, StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<Value, StoreError>;

    async fn get_singular(&self, name: &str) -> Result<Value, StoreError>;

    async fn replace_singular(&self, name: &str, value: Value) -> Result<Value, StoreError>;

    async fn patch_singular(&self, name: &str, changes: Value) -> Result<Value, StoreError>;
}
