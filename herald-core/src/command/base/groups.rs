use anyhow::Context;
use herald_storage::model::guild_disabled_group::GuildDisabledGroup;
use herald_string_fmt::Markdown;
use twilight_model::guild::Permissions;

use super::{BASE_GROUP, guild_id};
use crate::client::Message;
use crate::command::arguments::{Argument, text_args};
use crate::command::errors::ConfigError;
use crate::command::metadata;
use crate::command::{Command, CommandCtxt};

pub fn command() -> Result<Command, ConfigError> {
    Command::builder("groups")
        .aliases(["group"])
        .group(BASE_GROUP)
        .description("list command groups, or enable or disable one in this server")
        .usage("[enable|disable <group>]")
        .permissions(Permissions::MANAGE_GUILD)
        .attach([
            metadata::guild_only(),
            metadata::extra_help(format!(
                "Commands in a disabled group can't be used in this server. The {BASE_GROUP} group can't be disabled."
            )),
            metadata::examples(["", "disable fun", "enable fun"]),
        ])
        .action_fn(groups)
        .build()
}

async fn groups(ctxt: CommandCtxt, message: Message, args: Vec<Argument>) -> anyhow::Result<()> {
    let guild_id = guild_id(&message)?;
    let storage = &ctxt.herald.storage;
    let known = ctxt.herald.registry.read().await.groups();
    let args = text_args(&args);

    let Some(&action) = args.first() else {
        let disabled = GuildDisabledGroup::list(storage, guild_id)
            .await
            .context("Failed to get disabled groups")?;

        let lines = known
            .iter()
            .map(|group| {
                let state = if disabled.contains(group) { "disabled" } else { "enabled" };
                format!("{}: {state}", group.bold())
            })
            .collect::<Vec<_>>();

        return ctxt.reply(&lines.join("\n")).await;
    };

    let Some(&group) = args.get(1) else {
        let usage = format!("{}groups {action} <group>", ctxt.calling_prefix);
        return ctxt.reply(&format!("Missing group name. Usage: {}", usage.codestring())).await;
    };
    if !known.iter().any(|g| g == group) {
        return ctxt
            .reply(&format!("There is no group named {}.", group.codestring()))
            .await;
    }

    let setting = GuildDisabledGroup {
        guild_id,
        group: group.to_owned(),
    };

    match action {
        "enable" => {
            setting.enable(storage).await.context("Failed to enable group")?;
            ctxt.reply(&format!("Enabled the {} group.", group.codestring()))
                .await
        },
        "disable" => {
            if group == BASE_GROUP {
                return ctxt
                    .reply(&format!("The {} group can't be disabled.", BASE_GROUP.codestring()))
                    .await;
            }
            setting.disable(storage).await.context("Failed to disable group")?;
            ctxt.reply(&format!("Disabled the {} group.", group.codestring()))
                .await
        },
        other => {
            ctxt.reply(&format!(
                "Unknown action {}, expected {} or {}.",
                other.codestring(),
                "enable".codestring(),
                "disable".codestring()
            ))
            .await
        },
    }
}
