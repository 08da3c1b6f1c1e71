use std::sync::Arc;

use anyhow::Context;
use herald_storage::model::guild_disabled_group::GuildDisabledGroup;
use twilight_model::guild::Permissions;

use super::Command;
use crate::client::Message;
use crate::herald::Herald;

/// Everything about an invoker that decides which commands they may use in a given context.
#[derive(Clone, Debug)]
pub struct InvokerContext {
    pub is_owner: bool,
    /// Permissions in the channel. Empty in direct messages.
    pub permissions: Permissions,
    /// Names of the roles held in the guild. Empty in direct messages.
    pub roles: Vec<String>,
    /// Groups disabled in the guild. Empty in direct messages.
    pub disabled_groups: Arc<Vec<String>>,
}

impl Default for InvokerContext {
    fn default() -> Self {
        Self {
            is_owner: false,
            permissions: Permissions::empty(),
            roles: vec![],
            disabled_groups: Arc::default(),
        }
    }
}

impl InvokerContext {
    /// Looks up the invoker's standing for `message`. Only guild messages need the client and
    /// storage.
    pub async fn resolve(herald: &Herald, message: &Message) -> anyhow::Result<Self> {
        let is_owner = herald.config.is_owner(message.author.id.get());

        let Some(guild_id) = message.guild_id else {
            return Ok(Self {
                is_owner,
                ..Default::default()
            });
        };

        let permissions = herald
            .client
            .member_permissions(guild_id, message.channel_id, message.author.id)
            .await
            .context("Failed to fetch member permissions")?;

        let roles = herald
            .client
            .member_role_names(guild_id, message.author.id)
            .await
            .context("Failed to fetch member roles")?;

        let disabled_groups = GuildDisabledGroup::list(&herald.storage, guild_id.get())
            .await
            .context("Failed to fetch disabled groups")?;

        Ok(Self {
            is_owner,
            permissions,
            roles,
            disabled_groups,
        })
    }

    pub fn owner_allows(&self, command: &Command) -> bool {
        !command.owner_only || self.is_owner
    }

    /// Any **one** of the required permissions is enough.
    pub fn permissions_allow(&self, command: &Command) -> bool {
        command.permissions.is_empty() || self.permissions.intersects(command.permissions)
    }

    pub fn roles_allow(&self, command: &Command) -> bool {
        command.roles.is_empty() || command.roles.iter().any(|role| self.roles.contains(role))
    }

    pub fn group_enabled(&self, command: &Command) -> bool {
        !self.disabled_groups.contains(&command.group)
    }

    pub fn can_use_in_guild(&self, command: &Command) -> bool {
        self.permissions_allow(command)
            && self.roles_allow(command)
            && self.group_enabled(command)
            && self.owner_allows(command)
    }

    pub fn can_use_in_dm(&self, command: &Command) -> bool {
        !command.guild_only && self.owner_allows(command)
    }

    /// Guild-only commands are still listed in DM help even though they can't run there.
    pub fn can_see_in_dm_help(&self, command: &Command) -> bool {
        self.owner_allows(command)
    }

    /// Whether `command` may run for `message`, picking the filter for its origin.
    pub fn can_use(&self, command: &Command, message: &Message) -> bool {
        if message.is_direct() {
            self.can_use_in_dm(command)
        } else {
            self.can_use_in_guild(command)
        }
    }
}
