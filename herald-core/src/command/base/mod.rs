//! The built-in `base` group: help, ping and per-server settings.

use anyhow::Context;

use super::Command;
use super::errors::ConfigError;
use crate::client::Message;

pub mod groups;
pub mod help;
pub mod lang;
pub mod ping;
pub mod prefix;

/// Group of the built-in commands. It can't be disabled.
pub const BASE_GROUP: &str = "base";

pub fn commands() -> Result<Vec<Command>, ConfigError> {
    Ok(vec![
        help::command()?,
        ping::command()?,
        prefix::command()?,
        groups::command()?,
        lang::command()?,
    ])
}

fn guild_id(message: &Message) -> anyhow::Result<u64> {
    message
        .guild_id
        .map(|id| id.get())
        .context("This command can only be used in servers.")
}

#[cfg(test)]
mod tests {
    use twilight_model::guild::Permissions;

    use crate::command::localization::{Lang, parse_lang_file};
    use crate::command::metadata::{self, CommandBuilder};
    use crate::gateway_handler::DispatchOutcome;
    use crate::test_util::{
        MockClient, dm_message, guild_message, herald_with_localization, noop_command, test_config,
    };
    use crate::herald::ThreadSafeHerald;

    use std::sync::Arc;

    async fn setup() -> (ThreadSafeHerald, Arc<MockClient>) {
        let mut lang = Lang::new("en_us");
        lang.add(
            parse_lang_file(
                "fr",
                "[CMD_SETLANG_SUCCESS]\nLa langue est maintenant {0}.\n[CMD_SETLANG_CURRENT]\nLangue: {0}",
            )
            .unwrap(),
        );

        let (herald, client) = herald_with_localization(test_config(), lang);
        herald.register_base_commands().await.unwrap();
        for builder in [
            CommandBuilder::new("dice").group("fun"),
            CommandBuilder::new("secret").group("fun").with(metadata::hidden()),
            CommandBuilder::new("shutdown").group("admin").with(metadata::owner_only()),
        ] {
            herald.register(noop_command(builder)).await.unwrap();
        }

        (herald, client)
    }

    async fn run(herald: &ThreadSafeHerald, content: &str) -> DispatchOutcome {
        herald.handle_message(guild_message(10, content)).await
    }

    #[tokio::test]
    async fn help_lists_usable_commands_by_group() {
        let (herald, client) = setup().await;

        assert_eq!(run(&herald, "!help").await, DispatchOutcome::Executed("help".to_owned()));
        let listing = client.sent().pop().unwrap();

        assert!(listing.starts_with("**base**: `help`, `ping`"));
        assert!(listing.contains("**fun**: `dice`"));
        assert!(!listing.contains("secret"));
        assert!(!listing.contains("admin"));
        // needs manage guild
        assert!(!listing.contains("`prefix`"));

        client.set_permissions(Permissions::MANAGE_GUILD);
        run(&herald, "!commands").await;
        assert!(client.sent().pop().unwrap().contains("`prefix`"));
    }

    #[tokio::test]
    async fn help_in_dms_lists_guild_only_commands() {
        let (herald, client) = setup().await;

        herald.handle_message(dm_message(10, "help")).await;
        let listing = client.sent().pop().unwrap();
        assert!(listing.contains("`prefix`"));
        assert!(listing.contains("`lang`"));
        assert!(!listing.contains("shutdown"));
    }

    #[tokio::test]
    async fn help_for_one_command() {
        let (herald, client) = setup().await;
        client.set_permissions(Permissions::MANAGE_GUILD);

        run(&herald, "!help groups").await;
        let details = client.sent().pop().unwrap();
        assert!(details.starts_with("**groups**: list command groups"));
        assert!(details.contains("Usage: `!groups [enable|disable <group>]`"));
        assert!(details.contains("Aliases: group"));
        assert!(details.contains("`!groups disable fun`"));

        run(&herald, "!help nope").await;
        assert!(client.sent().pop().unwrap().starts_with("No command named `nope`"));

        run(&herald, "!help secret").await;
        assert!(client.sent().pop().unwrap().starts_with("**secret**"));
    }

    #[tokio::test]
    async fn ping_replies() {
        let (herald, client) = setup().await;
        assert_eq!(run(&herald, "!ping").await, DispatchOutcome::Executed("ping".to_owned()));
        assert_eq!(client.sent(), vec!["Pong! 8 commands loaded.".to_owned()]);
    }

    #[tokio::test]
    async fn prefix_view_and_set() {
        let (herald, client) = setup().await;

        assert_eq!(run(&herald, "!prefix ?").await, DispatchOutcome::Filtered("prefix".to_owned()));

        client.set_permissions(Permissions::MANAGE_GUILD);
        run(&herald, "!prefix").await;
        assert_eq!(client.sent().pop().unwrap(), "This server's prefix is: `!`");

        run(&herald, "!prefix waytoolongforaprefix").await;
        assert!(client.sent().pop().unwrap().contains("cannot be longer"));

        for blank in [r#"!prefix """#, r#"!prefix "  ""#, r#"!prefix "a b""#] {
            run(&herald, blank).await;
            assert_eq!(client.sent().pop().unwrap(), "Prefixes cannot be empty or contain spaces.");
        }
        assert_eq!(run(&herald, "ping me later").await, DispatchOutcome::Ignored);

        run(&herald, "!prefix ?").await;
        assert_eq!(client.sent().pop().unwrap(), "This server's prefix is now: `?`");

        assert_eq!(run(&herald, "!ping").await, DispatchOutcome::Ignored);
        assert_eq!(run(&herald, "?ping").await, DispatchOutcome::Executed("ping".to_owned()));
    }

    #[tokio::test]
    async fn groups_enable_and_disable() {
        let (herald, client) = setup().await;
        client.set_permissions(Permissions::MANAGE_GUILD);

        run(&herald, "!groups disable fun").await;
        assert_eq!(client.sent().pop().unwrap(), "Disabled the `fun` group.");
        assert_eq!(run(&herald, "!dice").await, DispatchOutcome::Filtered("dice".to_owned()));

        run(&herald, "!groups").await;
        let listing = client.sent().pop().unwrap();
        assert!(listing.contains("**fun**: disabled"));
        assert!(listing.contains("**base**: enabled"));

        run(&herald, "!groups disable base").await;
        assert_eq!(client.sent().pop().unwrap(), "The `base` group can't be disabled.");

        run(&herald, "!groups disable nothing").await;
        assert_eq!(client.sent().pop().unwrap(), "There is no group named `nothing`.");

        run(&herald, "!group enable fun").await;
        assert_eq!(run(&herald, "!dice").await, DispatchOutcome::Executed("dice".to_owned()));
    }

    #[tokio::test]
    async fn lang_view_and_set() {
        let (herald, client) = setup().await;
        client.set_permissions(Permissions::MANAGE_GUILD);

        run(&herald, "!lang").await;
        assert_eq!(
            client.sent().pop().unwrap(),
            "The current language is en_us.\nAvailable languages: en_us, fr"
        );

        run(&herald, "!lang de").await;
        assert_eq!(
            client.sent().pop().unwrap(),
            "There is no language named de. Available languages: en_us, fr"
        );

        run(&herald, "!setlang fr").await;
        assert_eq!(client.sent().pop().unwrap(), "La langue est maintenant fr.");

        run(&herald, "!lang").await;
        assert_eq!(client.sent().pop().unwrap(), "Langue: fr");
    }
}
