use crate::{StorageHandler, guild_key};

#[derive(Clone, Debug, PartialEq)]
pub struct Prefix {
    pub prefix: String,
}
impl Prefix {
    pub async fn set(&self, handler: &StorageHandler, guild_id: u64) -> anyhow::Result<()> {
        handler
            .provider
            .set(&guild_key(guild_id, "prefix"), self.prefix.clone())
            .await?;

        handler.cache.set_prefix(guild_id, self.clone());

        Ok(())
    }

    pub async fn get(handler: &StorageHandler, guild_id: u64) -> anyhow::Result<Option<Self>> {
        if let Some(prefix) = handler.cache.get_prefix(guild_id) {
            return Ok(Some(prefix));
        }

        match handler.provider.get(&guild_key(guild_id, "prefix")).await? {
            Some(prefix) => {
                let prefix = Prefix { prefix };
                handler.cache.set_prefix(guild_id, prefix.clone());
                Ok(Some(prefix))
            },
            None => Ok(None),
        }
    }
}
