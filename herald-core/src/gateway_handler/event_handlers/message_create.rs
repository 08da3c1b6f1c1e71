use anyhow::anyhow;
use herald_common::err;
use herald_string_fmt::Markdown;
use tracing::{debug, warn};

use crate::client::Message;
use crate::command::arguments::parse_args;
use crate::command::errors::ExecutionError;
use crate::command::middleware::Completion;
use crate::command::{CommandCtxt, execute};
use crate::gateway_handler::DispatchOutcome;
use crate::gateway_handler::message_parser::error::{ErrorSeverity, GetErrorSeverity, ParseError};
use crate::gateway_handler::message_parser::parser::parse_message_into_command;
use crate::gateway_handler::reply::reply;
use crate::herald::ThreadSafeHerald;

/// Handle a new message from the chat platform.
///
/// This function passes the message to the command parser, which attempts to resolve it to a
/// command. The command is then checked against the invoker and run. No error escapes this
/// function: everything that goes wrong is logged, reported to the invoker where useful, and
/// summarised in the returned [`DispatchOutcome`].
pub async fn handle(herald: ThreadSafeHerald, message: Message) -> DispatchOutcome {
    let parsed = match parse_message_into_command(&herald, &message).await {
        Ok(parsed) => parsed,
        Err(ParseError::UnknownCommand { name, calling_prefix }) => {
            debug!("no command named {name}");
            if herald.config.dispatch.unknown_command_notice {
                let notice = format!(
                    ":warning: No command named {}. Use {} for a list of commands.",
                    name.codestring(),
                    format!("{calling_prefix}help").codestring()
                );
                notify(&herald, &message, &notice).await;
            }
            return DispatchOutcome::NotFound(name);
        },
        Err(error) => {
            if error.get_severity() == ErrorSeverity::High {
                err!("{error}");
            } else {
                debug!("{error}");
            }
            return DispatchOutcome::Ignored;
        },
    };

    let command = parsed.command;
    let ctxt = CommandCtxt {
        herald: herald.clone(),
        channel_id: message.channel_id,
        calling_prefix: parsed.calling_prefix,
        invoked_name: parsed.invoked_name,
    };
    let args = parse_args(&parsed.args);

    // a panicking action surfaces here as a failed task
    let task = {
        let (command, message) = (command.clone(), message.clone());
        tokio::spawn(async move { execute(&ctxt, &command, message, args).await })
    };
    let result = task
        .await
        .unwrap_or_else(|e| Err(ExecutionError::Command(anyhow!("command task failed: {e}"))));

    match result {
        Ok(Completion::Executed) => {
            debug!("executed {} for {}", command.name, message.author.id);
            DispatchOutcome::Executed(command.name.clone())
        },
        Ok(Completion::Halted) => DispatchOutcome::Halted(command.name.clone()),
        Err(error) => {
            match error.get_severity() {
                ErrorSeverity::Low => debug!("{}: {error}", command.name),
                ErrorSeverity::High => err!("{} failed: {error:#}", command.name),
            }

            match error {
                ExecutionError::Filtered => {
                    if herald.config.dispatch.filtered_notice {
                        notify(&herald, &message, &format!(":warning: {error}")).await;
                    }
                    DispatchOutcome::Filtered(command.name.clone())
                },
                ExecutionError::RateLimited(retry_after) => {
                    notify(&herald, &message, &format!(":hourglass: {error}")).await;
                    DispatchOutcome::RateLimited {
                        command: command.name.clone(),
                        retry_after,
                    }
                },
                ExecutionError::Access(_) | ExecutionError::Command(_) => {
                    notify(
                        &herald,
                        &message,
                        &format!(
                            ":warning: Something went wrong while running {}.",
                            command.name.codestring()
                        ),
                    )
                    .await;
                    DispatchOutcome::Failed(command.name.clone())
                },
            }
        },
    }
}

async fn notify(herald: &ThreadSafeHerald, message: &Message, content: &str) {
    if let Err(e) = reply(herald, message.channel_id, content).await {
        warn!("Failed to send notice to channel {}: {e:#}", message.channel_id);
    }
}
