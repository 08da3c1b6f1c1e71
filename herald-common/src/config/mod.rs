pub mod config;

use std::path::Path;

use anyhow::Context;

pub use crate::config::config::HeraldConfig;

pub static CONFIG_LOCATION: &str = "./config.toml";

/// Reads and deserializes the config file at `path`.
pub fn load(path: impl AsRef<Path>) -> anyhow::Result<HeraldConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read config at {}", path.display()))?;

    parse(&raw).with_context(|| format!("failed to parse config at {}", path.display()))
}

pub fn parse(raw: &str) -> anyhow::Result<HeraldConfig> {
    Ok(toml::from_str::<HeraldConfig>(raw)?)
}
