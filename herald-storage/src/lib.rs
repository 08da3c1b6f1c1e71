use std::sync::Arc;

use async_trait::async_trait;
use cache::SettingsCache;
use tokio::sync::Mutex;

pub mod cache;
pub mod memory;
pub mod model;

/// A string key/value store. This is the only surface the rest of Herald uses to persist data.
///
/// Implementations may suspend on every call (e.g. a database or a file), so all methods are
/// async.
#[async_trait]
pub trait KeyedStorage: Send + Sync {
    async fn keys(&self) -> anyhow::Result<Vec<String>>;

    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    async fn set(&self, key: &str, value: String) -> anyhow::Result<()>;

    async fn remove(&self, key: &str) -> anyhow::Result<()>;

    async fn exists(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        for key in self.keys().await? {
            self.remove(&key).await?;
        }
        Ok(())
    }
}

/// Storage handler wrapping a [`KeyedStorage`] provider with an in-memory cache for the settings
/// read on every dispatched message.
pub struct StorageHandler {
    pub(crate) provider: Arc<dyn KeyedStorage>,
    pub(crate) cache: SettingsCache,
    /// Serializes read-modify-write setting updates.
    pub(crate) write_lock: Mutex<()>,
}
impl StorageHandler {
    pub fn new(provider: Arc<dyn KeyedStorage>) -> Self {
        Self {
            provider,
            cache: SettingsCache::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn provider(&self) -> &Arc<dyn KeyedStorage> {
        &self.provider
    }
}

/// Storage key of a per-guild setting.
pub(crate) fn guild_key(guild_id: u64, setting: &str) -> String {
    format!("guild:{guild_id}:{setting}")
}
