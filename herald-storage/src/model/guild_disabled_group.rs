use std::sync::Arc;

use anyhow::Context;

use crate::{StorageHandler, guild_key};

/// A command group disabled in a guild. The full list is stored as one JSON array per guild.
pub struct GuildDisabledGroup {
    pub guild_id: u64,
    pub group: String,
}
impl GuildDisabledGroup {
    pub async fn list(handler: &StorageHandler, guild_id: u64) -> anyhow::Result<Arc<Vec<String>>> {
        if let Some(groups) = handler.cache.get_disabled_groups(guild_id) {
            return Ok(groups);
        }

        let groups = match handler.provider.get(&guild_key(guild_id, "disabled_groups")).await? {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw)
                .with_context(|| format!("Malformed disabled groups setting for guild {guild_id}"))?,
            None => vec![],
        };

        let groups = Arc::new(groups);
        handler.cache.set_disabled_groups(guild_id, groups.clone());

        Ok(groups)
    }

    pub async fn is_disabled(&self, handler: &StorageHandler) -> anyhow::Result<bool> {
        Ok(Self::list(handler, self.guild_id).await?.contains(&self.group))
    }

    pub async fn enable(&self, handler: &StorageHandler) -> anyhow::Result<()> {
        let _guard = handler.write_lock.lock().await;

        let mut groups = (*Self::list(handler, self.guild_id).await?).clone();
        groups.retain(|group| group != &self.group);

        Self::store(handler, self.guild_id, groups).await
    }

    pub async fn disable(&self, handler: &StorageHandler) -> anyhow::Result<()> {
        let _guard = handler.write_lock.lock().await;

        let mut groups = (*Self::list(handler, self.guild_id).await?).clone();
        if !groups.contains(&self.group) {
            groups.push(self.group.clone());
        }

        Self::store(handler, self.guild_id, groups).await
    }

    async fn store(handler: &StorageHandler, guild_id: u64, groups: Vec<String>) -> anyhow::Result<()> {
        let key = guild_key(guild_id, "disabled_groups");
        if groups.is_empty() {
            handler.provider.remove(&key).await?;
        } else {
            handler.provider.set(&key, serde_json::to_string(&groups)?).await?;
        }

        handler.cache.set_disabled_groups(guild_id, Arc::new(groups));

        Ok(())
    }
}
