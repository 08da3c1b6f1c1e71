use std::sync::Arc;
use std::time::Duration;

use moka::sync::{Cache, CacheBuilder};

use crate::model::language::Language;
use crate::model::prefix::Prefix;

// 10,000 entries max, if a setting is not accessed in 5 mins then remove it from cache
fn builder<V: Clone + Send + Sync + 'static>() -> CacheBuilder<u64, V, Cache<u64, V>> {
    Cache::builder()
        .max_capacity(10000)
        .time_to_idle(Duration::from_secs(60 * 5))
}

/// In-memory cache collection for guild settings that are read on every message.
pub struct SettingsCache {
    prefixes: Cache<u64, Prefix>,
    languages: Cache<u64, Language>,
    disabled_groups: Cache<u64, Arc<Vec<String>>>,
}
impl SettingsCache {
    pub fn new() -> Self {
        SettingsCache {
            prefixes: builder().build(),
            languages: builder().build(),
            disabled_groups: builder().build(),
        }
    }

    pub fn get_prefix(&self, guild_id: u64) -> Option<Prefix> {
        self.prefixes.get(&guild_id)
    }

    pub fn set_prefix(&self, guild_id: u64, prefix: Prefix) {
        self.prefixes.insert(guild_id, prefix);
    }

    pub fn get_language(&self, guild_id: u64) -> Option<Language> {
        self.languages.get(&guild_id)
    }

    pub fn set_language(&self, guild_id: u64, language: Language) {
        self.languages.insert(guild_id, language);
    }

    pub fn get_disabled_groups(&self, guild_id: u64) -> Option<Arc<Vec<String>>> {
        self.disabled_groups.get(&guild_id)
    }

    pub fn set_disabled_groups(&self, guild_id: u64, groups: Arc<Vec<String>>) {
        self.disabled_groups.insert(guild_id, groups);
    }

    /// Drops every cached setting of a guild, e.g. when the bot leaves it.
    pub fn invalidate_guild(&self, guild_id: u64) {
        self.prefixes.invalidate(&guild_id);
        self.languages.invalidate(&guild_id);
        self.disabled_groups.invalidate(&guild_id);
    }
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self::new()
    }
}
