//! The set of registered commands.
//!
//! Commands are stored by key (normally their name) in registration order, which is also the
//! order `help` lists them in and the order lookups prefer. Every alias is owned by exactly one
//! command; the alias map is kept alongside the commands so that registration checks each alias
//! in constant time.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use super::access::InvokerContext;
use super::errors::ConfigError;
use super::Command;

#[derive(Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Arc<Command>>,
    /// alias -> key of the owning command
    aliases: HashMap<String, String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `command` at `key`.
    ///
    /// Fails if another command already has the same name, unless this is a `reload` or the command
    /// declares that it overloads that name. A command overloading a *different* command replaces
    /// it, and the target must exist. Fails if any alias is already owned by a command that is not
    /// being replaced.
    ///
    /// An existing entry at `key` is replaced in place; all other entries keep their position.
    pub fn register(&mut self, command: Command, key: impl Into<String>, reload: bool) -> Result<(), ConfigError> {
        let key = key.into();

        // key of the command being overloaded, looked up by name
        let overload_target = match &command.overloads {
            Some(target) => match self.key_of_name(target) {
                Some(key) => Some(key),
                None => {
                    return Err(ConfigError::UnknownOverload {
                        command: command.name.clone(),
                        target: target.clone(),
                    });
                },
            },
            None => None,
        };

        let same_name = self.key_of_name(&command.name);
        if let Some(existing) = &same_name {
            let overloads_itself = overload_target.as_deref() == Some(existing.as_str());
            if !reload && !overloads_itself {
                return Err(ConfigError::DuplicateName(command.name.clone()));
            }
        }

        // entries that are about to disappear don't own their aliases anymore
        let mut replaced = vec![key.clone()];
        replaced.extend(same_name);
        replaced.extend(overload_target.clone());

        for alias in &command.aliases {
            if let Some(owner) = self.aliases.get(alias) {
                if !replaced.contains(owner) {
                    return Err(ConfigError::DuplicateAlias {
                        alias: alias.clone(),
                        existing: self.commands[owner].name.clone(),
                        incoming: command.name.clone(),
                    });
                }
            }
        }

        for old in &replaced {
            if old != &key {
                self.unregister(old);
            }
        }
        self.aliases.retain(|_, owner| owner != &key);
        for alias in &command.aliases {
            self.aliases.insert(alias.clone(), key.clone());
        }

        info!(
            "{} command {} (group {})",
            if reload { "Reloaded" } else { "Registered" },
            command.name,
            command.group
        );
        self.commands.insert(key, Arc::new(command));

        Ok(())
    }

    /// Removes the command at `key`, keeping the order of the rest.
    pub fn unregister(&mut self, key: &str) -> Option<Arc<Command>> {
        let removed = self.commands.shift_remove(key)?;
        self.aliases.retain(|_, owner| owner != key);
        Some(removed)
    }

    fn key_of_name(&self, name: &str) -> Option<String> {
        if self.commands.get(name).is_some_and(|c| c.name == name) {
            return Some(name.to_owned());
        }

        self.commands
            .iter()
            .find(|(_, c)| c.name == name)
            .map(|(key, _)| key.clone())
    }

    pub fn get(&self, key: &str) -> Option<Arc<Command>> {
        self.commands.get(key).cloned()
    }

    /// Every distinct group, in the order first seen.
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = vec![];
        for command in self.commands.values() {
            if !groups.contains(&command.group) {
                groups.push(command.group.clone());
            }
        }
        groups
    }

    /// The earliest registered command named `text` or aliased as `text`.
    pub fn find_by_name_or_alias(&self, text: &str) -> Option<Arc<Command>> {
        self.commands.values().find(|c| c.answers_to(text)).cloned()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.commands.values()
    }

    fn filter(&self, predicate: impl Fn(&Command) -> bool) -> Vec<Arc<Command>> {
        self.commands.values().filter(|c| predicate(c)).cloned().collect()
    }

    /// Commands the invoker can run in a guild channel.
    pub fn filter_guild_usable(&self, invoker: &InvokerContext) -> Vec<Arc<Command>> {
        self.filter(|c| invoker.can_use_in_guild(c))
    }

    /// Commands the invoker can run in direct messages.
    pub fn filter_dm_usable(&self, invoker: &InvokerContext) -> Vec<Arc<Command>> {
        self.filter(|c| invoker.can_use_in_dm(c))
    }

    /// Commands the invoker can look up help for in direct messages.
    pub fn filter_dm_help(&self, invoker: &InvokerContext) -> Vec<Arc<Command>> {
        self.filter(|c| invoker.can_see_in_dm_help(c))
    }
}
