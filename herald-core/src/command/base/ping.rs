use super::BASE_GROUP;
use crate::client::Message;
use crate::command::arguments::Argument;
use crate::command::errors::ConfigError;
use crate::command::{Command, CommandCtxt};

pub fn command() -> Result<Command, ConfigError> {
    Command::builder("ping")
        .group(BASE_GROUP)
        .description("check that the bot is responding")
        .action_fn(ping)
        .build()
}

async fn ping(ctxt: CommandCtxt, _message: Message, _args: Vec<Argument>) -> anyhow::Result<()> {
    let commands = ctxt.herald.registry.read().await.len();
    ctxt.reply(&format!("Pong! {commands} commands loaded.")).await
}
