use std::sync::Arc;

use herald_common::config::HeraldConfig;
use herald_storage::StorageHandler;
use tokio::sync::RwLock;
use twilight_model::id::Id;
use twilight_model::id::marker::GuildMarker;

use crate::client::{ChatClient, Message};
use crate::command::Command;
use crate::command::errors::ConfigError;
use crate::command::localization::Localization;
use crate::command::registry::CommandRegistry;
use crate::gateway_handler::event_handlers::{guild_delete, message_create};
use crate::gateway_handler::DispatchOutcome;

pub type ThreadSafeHerald = Arc<Herald>;

/// Main Herald structure, storing the current bot state.
///
/// Everything a dispatch needs hangs off this: configuration, the platform client, settings
/// storage, localization and the command registry.
pub struct Herald {
    pub config: HeraldConfig,
    /// Client for the chat platform. Used for permission and role lookups and to send replies.
    pub client: Arc<dyn ChatClient>,
    /// Per-guild settings.
    pub storage: StorageHandler,
    pub localization: Arc<dyn Localization>,
    /// Registered commands. Written only while registering or reloading, so the lock is almost
    /// always uncontended.
    pub registry: RwLock<CommandRegistry>,
}

impl Herald {
    pub fn new(
        config: HeraldConfig,
        client: Arc<dyn ChatClient>,
        storage: StorageHandler,
        localization: Arc<dyn Localization>,
    ) -> Self {
        Self {
            config,
            client,
            storage,
            localization,
            registry: RwLock::new(CommandRegistry::new()),
        }
    }

    /// Registers a command under its own name.
    pub async fn register(&self, command: Command) -> Result<(), ConfigError> {
        let key = command.name.clone();
        self.registry.write().await.register(command, key, false)
    }

    pub async fn register_with_key(&self, command: Command, key: &str, reload: bool) -> Result<(), ConfigError> {
        self.registry.write().await.register(command, key, reload)
    }

    /// Registers the built-in `base` group.
    pub async fn register_base_commands(&self) -> Result<(), ConfigError> {
        for command in crate::command::base::commands()? {
            self.register(command).await?;
        }
        Ok(())
    }

    /// Dispatches one inbound message. Never fails; every outcome is reported in the return value.
    pub async fn handle_message(self: &Arc<Self>, message: Message) -> DispatchOutcome {
        message_create::handle(self.clone(), message).await
    }

    /// Forgets everything stored for a guild the bot has left.
    pub async fn guild_removed(self: &Arc<Self>, guild_id: Id<GuildMarker>) {
        guild_delete::handle(self.clone(), guild_id).await;
    }
}
