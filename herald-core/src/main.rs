//! Console front end. Each line read from stdin is dispatched as a message from the first
//! configured owner, and replies are printed to stdout.
//!
//! - `dm <text>` sends `<text>` as a direct message instead of a guild message.
//! - `leave` simulates the bot being removed from the guild.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use herald_common::config::{self, CONFIG_LOCATION, HeraldConfig};
use herald_common::ok_or_break;
use herald_common::util::tracing_init;
use herald_core::client::{Author, ChatClient, Message};
use herald_core::command::Command;
use herald_core::command::arguments::{Argument, text_args};
use herald_core::command::localization::Lang;
use herald_core::command::middleware::{MiddlewareOutcome, SyncMiddleware};
use herald_core::gateway_handler::handle_raw_event;
use herald_core::gateway_handler::incoming_event::IncomingEvent;
use herald_core::herald::Herald;
use herald_storage::StorageHandler;
use herald_storage::memory::MemoryStorage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, UserMarker};

const CONSOLE_GUILD: u64 = 1;
const CONSOLE_CHANNEL: u64 = 1;

/// The console user holds every permission and no roles.
struct ConsoleClient;

#[async_trait]
impl ChatClient for ConsoleClient {
    async fn member_permissions(
        &self,
        _guild_id: Id<GuildMarker>,
        _channel_id: Id<ChannelMarker>,
        _user_id: Id<UserMarker>,
    ) -> anyhow::Result<Permissions> {
        Ok(Permissions::all())
    }

    async fn member_role_names(
        &self,
        _guild_id: Id<GuildMarker>,
        _user_id: Id<UserMarker>,
    ) -> anyhow::Result<Vec<String>> {
        Ok(vec![])
    }

    async fn send_message(&self, _channel_id: Id<ChannelMarker>, content: &str) -> anyhow::Result<()> {
        println!("{content}");
        Ok(())
    }
}

fn echo_command() -> anyhow::Result<Command> {
    let command = Command::builder("echo")
        .description("repeat the arguments back")
        .usage("<text>")
        .ratelimit("3/10s")
        .using(SyncMiddleware(|message: Message, args: Vec<Argument>| {
            if args.is_empty() {
                return Ok(MiddlewareOutcome::reject_with("Nothing to echo."));
            }
            Ok(MiddlewareOutcome::Continue(message, args))
        }))
        .action_fn(|ctxt, _message, args| async move { ctxt.reply(&text_args(&args).join(" ")).await })
        .build()?;

    Ok(command)
}

fn load_config() -> HeraldConfig {
    match config::load(CONFIG_LOCATION) {
        Ok(config) => config,
        Err(e) => {
            warn!("{e:#}, using the default config");
            HeraldConfig::default()
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_init();

    info!("Initialising");
    let config = load_config();

    let default_lang = config.localization.default_lang.clone();
    let lang = match &config.localization.lang_dir {
        Some(dir) => Lang::load_dir(default_lang, dir)?,
        None => Lang::new(default_lang),
    };

    let user_id = config.owners.first().copied().filter(|&id| id != 0).unwrap_or(1);
    let herald = Arc::new(Herald::new(
        config,
        Arc::new(ConsoleClient),
        StorageHandler::new(Arc::new(MemoryStorage::new())),
        Arc::new(lang),
    ));

    herald
        .register_base_commands()
        .await
        .context("Failed to register base commands")?;
    herald.register(echo_command()?).await?;
    info!("Registered {} commands", herald.registry.read().await.len());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut next_id = 1;
    loop {
        // stop on read errors and at end of input
        let line = ok_or_break!(lines.next_line().await);
        let Some(line) = line else {
            break;
        };

        if line.trim() == "leave" {
            handle_raw_event(herald.clone(), IncomingEvent::GuildDelete(Id::new(CONSOLE_GUILD))).await;
            continue;
        }

        let (guild_id, content) = match line.strip_prefix("dm ") {
            Some(content) => (None, content.to_owned()),
            None => (Some(Id::new(CONSOLE_GUILD)), line),
        };

        let message = Message {
            id: Id::new(next_id),
            channel_id: Id::new(CONSOLE_CHANNEL),
            guild_id,
            author: Author {
                id: Id::new(user_id),
                name: "console".to_owned(),
                bot: false,
            },
            content,
        };
        next_id += 1;

        handle_raw_event(herald.clone(), IncomingEvent::MessageCreate(message)).await;
    }

    info!("Input closed, shutting down");
    Ok(())
}
