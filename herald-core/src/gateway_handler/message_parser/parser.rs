use std::sync::Arc;

use super::error::ParseError;
use super::preprocess::preprocess;
use crate::client::Message;
use crate::command::Command;
use crate::herald::Herald;

pub struct ParseResult {
    pub command: Arc<Command>,
    /// The name or alias the command was called with.
    pub invoked_name: String,
    /// Everything after the command token, with leading whitespace removed.
    pub args: String,
    pub calling_prefix: String,
}

/// Parse a message into a command.
///
/// **Step 1**: Preprocess: reject bots and determine the prefix that applies to this message (see
/// [`preprocess`]). If the message does not start with it, prematurely return.
///
/// **Step 2**: Split off the first word after the prefix and resolve it by name or alias against
/// the registry. The registry lock is only held for the lookup; the returned command is an `Arc`
/// so a concurrent reload cannot pull it out from under the caller.
///
/// Usability and rate limits are checked *during* execution (see
/// [`crate::command::check_metadata`]).
pub async fn parse_message_into_command(herald: &Herald, message: &Message) -> Result<ParseResult, ParseError> {
    let preprocess = preprocess(herald, message).await?;

    let command_text = message.content[preprocess.prefix.len()..].trim_start();

    let (name, args) = match command_text.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim_start()),
        None => (command_text, ""),
    };
    if name.is_empty() {
        return Err(ParseError::NoCommandToken);
    }

    let Some(command) = herald.registry.read().await.find_by_name_or_alias(name) else {
        return Err(ParseError::UnknownCommand {
            name: name.to_owned(),
            calling_prefix: preprocess.prefix,
        });
    };

    Ok(ParseResult {
        command,
        invoked_name: name.to_owned(),
        args: args.to_owned(),
        calling_prefix: preprocess.prefix,
    })
}
