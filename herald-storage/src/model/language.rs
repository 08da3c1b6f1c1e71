use crate::{StorageHandler, guild_key};

/// The localization language configured for a guild.
#[derive(Clone, Debug, PartialEq)]
pub struct Language {
    pub lang: String,
}
impl Language {
    pub async fn set(&self, handler: &StorageHandler, guild_id: u64) -> anyhow::Result<()> {
        handler
            .provider
            .set(&guild_key(guild_id, "lang"), self.lang.clone())
            .await?;

        handler.cache.set_language(guild_id, self.clone());

        Ok(())
    }

    pub async fn get(handler: &StorageHandler, guild_id: u64) -> anyhow::Result<Option<Self>> {
        if let Some(language) = handler.cache.get_language(guild_id) {
            return Ok(Some(language));
        }

        match handler.provider.get(&guild_key(guild_id, "lang")).await? {
            Some(lang) => {
                let language = Language { lang };
                handler.cache.set_language(guild_id, language.clone());
                Ok(Some(language))
            },
            None => Ok(None),
        }
    }
}
