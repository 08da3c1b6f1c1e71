use anyhow::Context;
use herald_storage::model::language::Language;
use twilight_model::guild::Permissions;

use super::{BASE_GROUP, guild_id};
use crate::client::Message;
use crate::command::arguments::{Argument, text_args};
use crate::command::errors::ConfigError;
use crate::command::localization::resource_loader;
use crate::command::metadata;
use crate::command::{Command, CommandCtxt};

pub fn command() -> Result<Command, ConfigError> {
    Command::builder("lang")
        .aliases(["setlang"])
        .group(BASE_GROUP)
        .description("get or set the language of the bot in this server")
        .usage("[language]")
        .permissions(Permissions::MANAGE_GUILD)
        .attach([metadata::guild_only(), metadata::examples(["", "en_us"])])
        .localizable()
        .action_fn(lang)
        .build()
}

async fn lang(ctxt: CommandCtxt, message: Message, args: Vec<Argument>) -> anyhow::Result<()> {
    let guild_id = guild_id(&message)?;
    let res = resource_loader(&args)?.clone();
    let available = ctxt.herald.localization.languages();
    let available_list = available.join(", ");

    let Some(&requested) = text_args(&args).first() else {
        let current = Language::get(&ctxt.herald.storage, guild_id)
            .await
            .context("Failed to get guild language")?
            .map_or_else(|| ctxt.herald.config.localization.default_lang.clone(), |l| l.lang);

        return ctxt
            .reply(&res("CMD_SETLANG_CURRENT", &[current.as_str(), available_list.as_str()]))
            .await;
    };

    if !available.iter().any(|l| l == requested) {
        return ctxt
            .reply(&res("CMD_SETLANG_UNKNOWN", &[requested, available_list.as_str()]))
            .await;
    }

    Language {
        lang: requested.to_owned(),
    }
    .set(&ctxt.herald.storage, guild_id)
    .await
    .context("Failed to set guild language")?;

    // strings for the new language
    let res = ctxt.herald.localization.create_resource_loader(requested);
    ctxt.reply(&res("CMD_SETLANG_SUCCESS", &[requested])).await
}
