use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::record::{self, CREATED_AT_FIELD, ID_FIELD};
use super::{Document, DocumentStore, ResourceKind, StoreError};
use crate::query::{ListPage, ListQuery};

/// In-memory document, written back to a JSON file after every mutation.
///
/// Writers hold the lock across the file write, so mutations land on disk in
/// the order they were applied.
pub struct JsonFileStore {
    path: Option<PathBuf>,
    document: RwLock<Document>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let bytes = tokio::fs::read(&path).await?;
        let document = record::into_object(serde_json::from_slice(&bytes)?)?;

        tracing::info!(
            "Loaded document {} with {} resources",
            path.display(),
            document.len()
        );

        Ok(Self {
            path: Some(path),
            document: RwLock::new(document),
        })
    }

    /// Open `path`, or write `seed()` there first when it does not exist yet.
    pub async fn open_or_seed(
        path: impl Into<PathBuf>,
        seed: impl FnOnce() -> Document,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        if tokio::fs::try_exists(&path).await? {
            return Self::open(path).await;
        }

        tracing::warn!("Document {} not found, generating fixtures", path.display());
        let store = Self {
            path: Some(path),
            document: RwLock::new(seed()),
        };
        {
            let document = store.document.read().await;
            store.persist(&document).await?;
        }
        Ok(store)
    }

    /// A store that never touches the filesystem.
    pub fn in_memory(document: Document) -> Self {
        Self {
            path: None,
            document: RwLock::new(document),
        }
    }

    async fn persist(&self, document: &Document) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;

        tracing::debug!("Persisted document to {}", path.display());
        Ok(())
    }
}

fn collection<'a>(document: &'a Document, name: &str) -> Result<&'a Vec<Value>, StoreError> {
    match document.get(name) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(StoreError::NotACollection(name.to_string())),
        None => Err(StoreError::UnknownResource(name.to_string())),
    }
}

fn collection_mut<'a>(document: &'a mut Document, name: &str) -> Result<&'a mut Vec<Value>, StoreError> {
    match document.get_mut(name) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(StoreError::NotACollection(name.to_string())),
        None => Err(StoreError::UnknownResource(name.to_string())),
    }
}

fn singular_mut<'a>(document: &'a mut Document, name: &str) -> Result<&'a mut Map<String, Value>, StoreError> {
    match document.get_mut(name) {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(StoreError::UnknownResource(name.to_string())),
    }
}

fn not_found(collection: &str, id: &str) -> StoreError {
    StoreError::RecordNotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn kind(&self, resource: &str) -> Result<ResourceKind, StoreError> {
        let document = self.document.read().await;
        match document.get(resource) {
            Some(Value::Array(_)) => Ok(ResourceKind::Collection),
            Some(Value::Object(_)) => Ok(ResourceKind::Singular),
            _ => Err(StoreError::UnknownResource(resource.to_string())),
        }
    }

    async fn list(&self, name: &str, query: &ListQuery) -> Result<ListPage, StoreError> {
        let document = self.document.read().await;
        let items = collection(&document, name)?;
        Ok(query.apply(items))
    }

    async fn count(&self, name: &str) -> Result<usize, StoreError> {
        let document = self.document.read().await;
        Ok(collection(&document, name)?.len())
    }

    async fn get(&self, name: &str, id: &str) -> Result<Value, StoreError> {
        let document = self.document.read().await;
        collection(&document, name)?
            .iter()
            .find(|r| record::id_matches(r, id))
            .cloned()
            .ok_or_else(|| not_found(name, id))
    }

    async fn insert(&self, name: &str, value: Value) -> Result<Value, StoreError> {
        let mut fields = record::into_object(value)?;
        let mut document = self.document.write().await;
        let items = collection_mut(&mut document, name)?;

        match fields.get(ID_FIELD).filter(|v| !v.is_null()) {
            Some(id) => {
                let id = record::id_text(id);
                if items.iter().any(|r| record::id_matches(r, &id)) {
                    return Err(StoreError::DuplicateId(id));
                }
            }
            None => {
                fields.insert(ID_FIELD.to_string(), record::next_id(items));
            }
        }

        let created = Value::Object(fields);
        items.push(created.clone());
        self.persist(&document).await?;
        Ok(created)
    }

    async fn replace(&self, name: &str, id: &str, value: Value) -> Result<Value, StoreError> {
        let mut fields = record::into_object(value)?;
        let mut document = self.document.write().await;
        let items = collection_mut(&mut document, name)?;
        let slot = items
            .iter_mut()
            .find(|r| record::id_matches(r, id))
            .ok_or_else(|| not_found(name, id))?;

        if let Some(existing_id) = slot.get(ID_FIELD).cloned() {
            fields.insert(ID_FIELD.to_string(), existing_id);
        }
        // createdAt is set once, at creation
        match slot.get(CREATED_AT_FIELD).cloned() {
            Some(created_at) => {
                fields.insert(CREATED_AT_FIELD.to_string(), created_at);
            }
            None => {
                fields.remove(CREATED_AT_FIELD);
            }
        }

        *slot = Value::Object(fields);
        let replaced = slot.clone();
        self.persist(&document).await?;
        Ok(replaced)
    }

    async fn patch(&self, name: &str, id: &str, changes: Value) -> Result<Value, StoreError> {
        let changes = record::into_object(changes)?;
        let mut document = self.document.write().await;
        let items = collection_mut(&mut document, name)?;
        let slot = items
            .iter_mut()
            .find(|r| record::id_matches(r, id))
            .ok_or_else(|| not_found(name, id))?;

        let Some(fields) = slot.as_object_mut() else {
            return Err(StoreError::InvalidRecord(format!("record {} in {} is not an object", id, name)));
        };
        record::merge(fields, changes);

        let patched = slot.clone();
        self.persist(&document).await?;
        Ok(patched)
    }

    async fn delete(&self, name: &str, id: &str) -> Result<Value, StoreError> {
        let mut document = self.document.write().await;
        let items = collection_mut(&mut document, name)?;
        let position = items
            .iter()
            .position(|r| record::id_matches(r, id))
            .ok_or_else(|| not_found(name, id))?;

        let removed = items.remove(position);
        self.persist(&document).await?;
        Ok(removed)
    }

    async fn get_singular(&self, name: &str) -> Result<Value, StoreError> {
        let document = self.document.read().await;
        match document.get(name) {
            Some(value @ Value::Object(_)) => Ok(value.clone()),
            _ => Err(StoreError::UnknownResource(name.to_string())),
        }
    }

    async fn replace_singular(&self, name: &str, value: Value) -> Result<Value, StoreError> {
        let fields = record::into_object(value)?;
        let mut document = self.document.write().await;
        let slot = singular_mut(&mut document, name)?;
        *slot = fields;

        let replaced = Value::Object(slot.clone());
        self.persist(&document).await?;
        Ok(replaced)
    }

    async fn patch_singular(&self, name: &str, changes: Value) -> Result<Value, StoreError> {
        let changes = record::into_object(changes)?;
        let mut document = self.document.write().await;
        let slot = singular_mut(&mut document, name)?;
        for (key, value) in changes {
            slot.insert(key, value);
        }

        let patched = Value::Object(slot.clone());
        self.persist(&document).await?;
        Ok(patched)
    }
}
