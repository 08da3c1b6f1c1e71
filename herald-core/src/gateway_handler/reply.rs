use herald_string_fmt::limit;
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

use crate::herald::Herald;

/// Sends `content` to `channel_id`, cut to fit the platform's message length limit.
pub async fn reply(herald: &Herald, channel_id: Id<ChannelMarker>, content: &str) -> anyhow::Result<()> {
    herald.client.send_message(channel_id, limit(content)).await
}
