// See config.toml for information on the variables here.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct HeraldConfig {
    /// User IDs of the bot owners. Owner-only commands are restricted to these users.
    pub owners: Vec<u64>,
    /// The bot's own user ID, used to recognise mention prefixes.
    pub bot_id: u64,
    pub prefix: Prefixes,
    pub localization: Localization,
    pub dispatch: Dispatch,
    pub dev: DevAttributes,
}

impl HeraldConfig {
    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owners.contains(&user_id)
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Prefixes {
    pub default: String,
}
impl Default for Prefixes {
    fn default() -> Self {
        Self { default: "!".to_owned() }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Localization {
    /// Language used in direct messages and in guilds with no configured language.
    pub default_lang: String,
    /// Directory of `<lang>.lang` files loaded on startup.
    pub lang_dir: Option<PathBuf>,
}
impl Default for Localization {
    fn default() -> Self {
        Self {
            default_lang: "en_us".to_owned(),
            lang_dir: None,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Dispatch {
    /// Reply with a notice when a prefixed message names no known command.
    pub unknown_command_notice: bool,
    /// Reply with a notice when a command exists but is not usable in this context.
    pub filtered_notice: bool,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct DevAttributes {
    /// When set, this is the only accepted prefix, everywhere.
    pub prefix_override: Option<String>,
}
