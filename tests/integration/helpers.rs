//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;

use schoolhub_core::config::notifications::NotificationsConfig;
use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::storage::KeyValueStore;
use schoolhub_notify::NotificationStore;
use schoolhub_storage::providers::{LocalKeyValueStore, MemoryKeyValueStore};

/// Store over a fresh in-memory backend. The backend handle is returned so
/// tests can inspect or seed the persisted payload.
pub async fn memory_store() -> (Arc<NotificationStore>, MemoryKeyValueStore) {
    let backend = MemoryKeyValueStore::new();
    let store = store_over(Arc::new(backend.clone())).await;
    (store, backend)
}

/// Store over a local directory backend rooted at `root`.
pub async fn local_store(root: &std::path::Path) -> Arc<NotificationStore> {
    let backend = LocalKeyValueStore::new(root.to_str().expect("utf-8 temp path"))
        .await
        .expect("Failed to init local storage");
    store_over(Arc::new(backend)).await
}

/// Store over an arbitrary backend with default configuration.
pub async fn store_over(backend: Arc<dyn KeyValueStore>) -> Arc<NotificationStore> {
    Arc::new(NotificationStore::load(backend, &NotificationsConfig::default()).await)
}

/// Backend whose every call fails.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    fn provider_type(&self) -> &str {
        "failing"
    }

    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::storage("backend unavailable"))
    }

    async fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::storage("backend unavailable"))
    }

    async fn remove(&self, _key: &str) -> AppResult<()> {
        Err(AppError::storage("backend unavailable"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }
}
