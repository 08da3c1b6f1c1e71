use herald_common::err;
use herald_storage::model::clear_guild;
use tracing::info;
use twilight_model::id::Id;
use twilight_model::id::marker::GuildMarker;

use crate::herald::ThreadSafeHerald;

pub async fn handle(herald: ThreadSafeHerald, guild_id: Id<GuildMarker>) {
    match clear_guild(&herald.storage, guild_id.get()).await {
        Ok(()) => info!("Removed from guild {}", guild_id.get()),
        Err(e) => err!("Failed to clear settings of guild {}: {e:#}", guild_id.get()),
    }
}

#[cfg(test)]
mod tests {
    use herald_storage::model::prefix::Prefix;

    use crate::gateway_handler::DispatchOutcome;
    use crate::test_util::{TEST_GUILD_ID, guild_message, herald};

    #[tokio::test]
    async fn settings_are_forgotten() {
        let (herald, _client) = herald();
        herald.register_base_commands().await.unwrap();

        Prefix { prefix: "?".to_owned() }
            .set(&herald.storage, TEST_GUILD_ID)
            .await
            .unwrap();
        assert_eq!(herald.handle_message(guild_message(10, "!ping")).await, DispatchOutcome::Ignored);

        herald.guild_removed(twilight_model::id::Id::new(TEST_GUILD_ID)).await;

        assert_eq!(Prefix::get(&herald.storage, TEST_GUILD_ID).await.unwrap(), None);
        assert_eq!(
            herald.handle_message(guild_message(10, "!ping")).await,
            DispatchOutcome::Executed("ping".to_owned())
        );
    }
}
