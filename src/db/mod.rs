use std::{
    collections::HashMap,
    fs,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::{
    config::{Config, StoreBackend},
    errors::{AppError, AppResult},
};

/// Raw string values under fixed keys. Values are opaque to the store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// One `<key>.json` file per key inside a data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn open(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::StorageError(format!(
                "Invalid store key '{}'",
                key
            )));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, value).await?;
        tokio::fs::rename(&tmp_path, &path).await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone)]
pub struct Database {
    store: Arc<dyn KeyValueStore>,
}

impl Database {
    pub fn open(config: &Config) -> AppResult<Self> {
        let db = match config.store_backend {
            StoreBackend::File => {
                log::info!("Opening file store at {}", config.data_dir);
                Self::with_store(Arc::new(FileStore::open(&config.data_dir)?))
            }
            StoreBackend::Memory => {
                log::warn!("Using in-memory store; attempts will not survive a restart");
                Self::in_memory()
            }
        };
        Ok(db)
    }

    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get_collection<T>(&self, key: &str) -> Collection<T> {
        Collection {
            store: Arc::clone(&self.store),
            key: key.to_string(),
            _record: PhantomData,
        }
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.store.get("health_probe").await.map(|_| ())
    }
}

/// A JSON array of `T` stored under one key.
pub struct Collection<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Absent keys and malformed values both read as an empty collection.
    pub async fn read_all(&self) -> Vec<T> {
        match self.store.get(&self.key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                log::warn!(
                    "Ignoring malformed data under key '{}': {}",
                    self.key,
                    err
                );
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("Failed to read key '{}': {}", self.key, err);
                Vec::new()
            }
        }
    }

    pub async fn write_all(&self, items: &[T]) -> AppResult<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(&self.key, &raw).await
    }
}
