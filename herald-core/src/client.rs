//! The boundary to the chat platform.
//!
//! Herald never talks to a gateway or an HTTP API itself. Whatever connects to the platform
//! converts incoming events into [`Message`]s and implements [`ChatClient`] for the few queries
//! the dispatcher needs to make.

use async_trait::async_trait;
use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, MessageMarker, UserMarker};

#[derive(Clone, Debug)]
pub struct Author {
    pub id: Id<UserMarker>,
    pub name: String,
    /// Bot and webhook authors are never dispatched.
    pub bot: bool,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub id: Id<MessageMarker>,
    pub channel_id: Id<ChannelMarker>,
    /// `None` for direct messages.
    pub guild_id: Option<Id<GuildMarker>>,
    pub author: Author,
    pub content: String,
}

impl Message {
    pub fn is_direct(&self) -> bool {
        self.guild_id.is_none()
    }
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Resolved permissions of `user_id` in the given guild channel.
    async fn member_permissions(
        &self,
        guild_id: Id<GuildMarker>,
        channel_id: Id<ChannelMarker>,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<Permissions>;

    /// Names of every role `user_id` holds in the guild.
    async fn member_role_names(&self, guild_id: Id<GuildMarker>, user_id: Id<UserMarker>)
    -> anyhow::Result<Vec<String>>;

    async fn send_message(&self, channel_id: Id<ChannelMarker>, content: &str) -> anyhow::Result<()>;
}
