use anyhow::Context;
use herald_storage::model::prefix::Prefix;
use herald_string_fmt::Markdown;
use twilight_model::guild::Permissions;

use super::{BASE_GROUP, guild_id};
use crate::client::Message;
use crate::command::arguments::{Argument, text_args};
use crate::command::errors::ConfigError;
use crate::command::metadata;
use crate::command::{Command, CommandCtxt};

/// Prefixes longer than this are refused.
const MAX_PREFIX_LENGTH: usize = 14;

pub fn command() -> Result<Command, ConfigError> {
    Command::builder("prefix")
        .group(BASE_GROUP)
        .description("get or set the server prefix")
        .usage("[new prefix]")
        .permissions(Permissions::MANAGE_GUILD)
        .attach([metadata::guild_only(), metadata::examples(["", "?", "%"])])
        .action_fn(prefix)
        .build()
}

async fn prefix(ctxt: CommandCtxt, message: Message, args: Vec<Argument>) -> anyhow::Result<()> {
    let guild_id = guild_id(&message)?;
    let storage = &ctxt.herald.storage;

    let Some(&new) = text_args(&args).first() else {
        let current = Prefix::get(storage, guild_id)
            .await
            .context("Failed to get guild prefix")?
            .map_or_else(|| ctxt.herald.config.prefix.default.clone(), |p| p.prefix);

        return ctxt
            .reply(&format!("This server's prefix is: {}", current.codestring()))
            .await;
    };

    if new.is_empty() || new.chars().any(char::is_whitespace) {
        return ctxt.reply("Prefixes cannot be empty or contain spaces.").await;
    }

    if new.chars().count() > MAX_PREFIX_LENGTH {
        return ctxt
            .reply(&format!("Prefixes cannot be longer than {MAX_PREFIX_LENGTH} characters."))
            .await;
    }

    let new = Prefix { prefix: new.to_owned() };
    new.set(storage, guild_id).await.context("Failed to set new prefix")?;

    ctxt.reply(&format!("This server's prefix is now: {}", new.prefix.codestring()))
        .await
}
