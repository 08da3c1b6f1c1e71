use crate::StorageHandler;

pub mod guild_disabled_group;
pub mod language;
pub mod prefix;

/// Removes every stored setting of a guild, e.g. after the bot was removed from it.
pub async fn clear_guild(handler: &StorageHandler, guild_id: u64) -> anyhow::Result<()> {
    let namespace = format!("guild:{guild_id}:");
    for key in handler.provider.keys().await? {
        if key.starts_with(&namespace) {
            handler.provider.remove(&key).await?;
        }
    }

    handler.cache.invalidate_guild(guild_id);
    Ok(())
}
