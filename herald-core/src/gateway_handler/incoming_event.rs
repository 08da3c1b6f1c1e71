use twilight_model::id::Id;
use twilight_model::id::marker::GuildMarker;

use crate::client::Message;

/// An event from the chat platform that Herald reacts to.
#[derive(Debug)]
pub enum IncomingEvent {
    MessageCreate(Message),
    /// The bot was removed from a guild.
    GuildDelete(Id<GuildMarker>),
}
