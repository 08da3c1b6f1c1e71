use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::KeyedStorage;

/// Default storage provider. Keeps everything in process memory, so nothing survives a restart.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyedStorage for MemoryStorage {
    async fn keys(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}
