pub mod guild_delete;
pub mod message_create;
