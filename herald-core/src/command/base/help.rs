use std::fmt::Write;
use std::sync::Arc;

use anyhow::Context;
use herald_string_fmt::Markdown;

use super::BASE_GROUP;
use crate::client::Message;
use crate::command::access::InvokerContext;
use crate::command::arguments::{Argument, text_args};
use crate::command::errors::ConfigError;
use crate::command::metadata;
use crate::command::{Command, CommandCtxt};

pub fn command() -> Result<Command, ConfigError> {
    Command::builder("help")
        .aliases(["commands"])
        .group(BASE_GROUP)
        .description("list commands, or show details of one")
        .usage("[command]")
        .with(metadata::examples(["", "ping"]))
        .action_fn(help)
        .build()
}

/// Commands the invoker may look up here. Hidden commands are only found by exact lookup.
async fn visible_commands(ctxt: &CommandCtxt, message: &Message) -> anyhow::Result<Vec<Arc<Command>>> {
    let invoker = InvokerContext::resolve(&ctxt.herald, message)
        .await
        .context("Failed to resolve invoker")?;

    let registry = ctxt.herald.registry.read().await;
    Ok(if message.is_direct() {
        registry.filter_dm_help(&invoker)
    } else {
        registry.filter_guild_usable(&invoker)
    })
}

async fn help(ctxt: CommandCtxt, message: Message, args: Vec<Argument>) -> anyhow::Result<()> {
    let commands = visible_commands(&ctxt, &message).await?;

    if let Some(&name) = text_args(&args).first() {
        let Some(command) = commands.iter().find(|c| c.answers_to(name)) else {
            let reply = format!(
                "No command named {}. Use {} for a list of commands.",
                name.codestring(),
                format!("{}help", ctxt.calling_prefix).codestring()
            );
            return ctxt.reply(&reply).await;
        };

        return ctxt.reply(&describe(command, &ctxt.calling_prefix)).await;
    }

    let groups = ctxt.herald.registry.read().await.groups();
    let mut out = String::new();
    for group in groups {
        let names = commands
            .iter()
            .filter(|c| c.group == group && !c.hidden)
            .map(|c| c.name.codestring())
            .collect::<Vec<_>>();

        if !names.is_empty() {
            writeln!(out, "{}: {}", group.bold(), names.join(", "))?;
        }
    }

    if out.is_empty() {
        return ctxt.reply("There are no commands you can use here.").await;
    }

    write!(
        out,
        "\nUse {} for more information on a command.",
        format!("{}help <command>", ctxt.calling_prefix).codestring()
    )?;

    ctxt.reply(&out).await
}

fn describe(command: &Command, prefix: &str) -> String {
    let mut out = command.name.bold();
    if !command.description.is_empty() {
        out += ": ";
        out += &command.description;
    }

    out += &format!("\nUsage: {}", command.usage_line(prefix).codestring());

    if !command.aliases.is_empty() {
        out += &format!("\nAliases: {}", command.aliases.join(", "));
    }
    out += &format!("\nGroup: {}", command.group);

    if command.guild_only {
        out += "\nOnly usable in servers.";
    }

    if !command.extra_help.is_empty() {
        out += "\n\n";
        out += &command.extra_help;
    }

    if !command.examples.is_empty() {
        out += "\n\nExamples:";
        for example in &command.examples {
            let line = format!("{prefix}{} {example}", command.name);
            out += &format!("\n{}", line.trim_end().codestring());
        }
    }

    out
}
