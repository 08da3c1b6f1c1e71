use std::time::Duration;

use crate::herald::ThreadSafeHerald;

use self::incoming_event::IncomingEvent;

pub mod event_handlers;
pub mod incoming_event;
pub mod message_parser;
pub mod reply;

/// How far a message got through dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not addressed to the bot: wrong prefix, bot author, or no command after the prefix.
    Ignored,
    /// Prefixed, but no command has this name or alias.
    NotFound(String),
    /// The command exists but the invoker can't use it here.
    Filtered(String),
    RateLimited { command: String, retry_after: Duration },
    /// A middleware stage stopped the invocation.
    Halted(String),
    Executed(String),
    /// The action failed, or its context could not be resolved.
    Failed(String),
}

/// Checks the enum variant of this IncomingEvent and calls the appropriate handler function
/// for further processing.
pub async fn handle_raw_event(context: ThreadSafeHerald, event: IncomingEvent) {
    match event {
        IncomingEvent::MessageCreate(message) => {
            event_handlers::message_create::handle(context, message).await;
        },
        IncomingEvent::GuildDelete(guild_id) => {
            event_handlers::guild_delete::handle(context, guild_id).await;
        },
    }
}
