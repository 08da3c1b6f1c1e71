//! Localized strings for command output.
//!
//! Strings live in `.lang` files, one per language, named after the language (`en_us.lang`).
//! A file is a series of blocks, each a `[KEY]` header line followed by the value:
//!
//! ```text
//! ## comments start with two hashes
//! [CMD_PING_REPLY]
//! Pong! Took {0}ms.
//! ```
//!
//! Values may span several lines; surrounding blank lines are trimmed. `{0}`, `{1}`, ... are
//! replaced with the substitutions passed to the [`ResourceLoader`].

use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use herald_common::util::regex::{LANG_COMMENT, LANG_HEADER, SUBSTITUTION};
use herald_storage::model::language::Language;
use regex::Captures;
use tracing::{debug, info};

use super::arguments::Argument;
use super::middleware::{Middleware, MiddlewareOutcome};
use super::CommandCtxt;
use crate::client::Message;

static BUILTIN_EN_US: &str = include_str!("../../lang/en_us.lang");

/// Looks up a localized string by key, substituting positional values.
pub type ResourceLoader = Arc<dyn Fn(&str, &[&str]) -> String + Send + Sync>;

/// Source of [`ResourceLoader`]s.
pub trait Localization: Send + Sync {
    fn create_resource_loader(&self, lang: &str) -> ResourceLoader;

    /// Names of every known language.
    fn languages(&self) -> Vec<String>;
}

#[derive(Debug, Default)]
pub struct LanguageStrings {
    pub name: String,
    pub strings: HashMap<String, String>,
}

#[derive(Debug)]
pub enum LangParseError {
    /// The file contains no `[KEY]` blocks.
    NoStrings(String),
}
impl Display for LangParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoStrings(lang) => write!(f, "the lang file for {lang} contains no valid localization strings"),
        }
    }
}
impl std::error::Error for LangParseError {}

pub fn parse_lang_file(lang_name: &str, contents: &str) -> Result<LanguageStrings, LangParseError> {
    let mut strings = HashMap::new();
    let mut current: Option<(String, Vec<String>)> = None;

    let mut flush = |block: Option<(String, Vec<String>)>| {
        if let Some((key, lines)) = block {
            strings.insert(key, lines.join("\n").trim().to_owned());
        }
    };

    for line in contents.lines() {
        if let Some(header) = LANG_HEADER.captures(line) {
            flush(current.take());
            current = Some((header[1].to_owned(), vec![]));
            continue;
        }

        // text before the first header is ignored
        let Some((_, lines)) = current.as_mut() else {
            continue;
        };

        if line.trim_start().starts_with("##") {
            continue;
        }

        lines.push(LANG_COMMENT.replace(line, "").into_owned());
    }
    flush(current);

    if strings.is_empty() {
        return Err(LangParseError::NoStrings(lang_name.to_owned()));
    }

    Ok(LanguageStrings {
        name: lang_name.to_owned(),
        strings,
    })
}

fn substitute(template: &str, substitutions: &[&str]) -> String {
    SUBSTITUTION
        .replace_all(template, |c: &Captures<'_>| {
            c[1].parse::<usize>()
                .ok()
                .and_then(|i| substitutions.get(i))
                .map_or_else(|| c[0].to_owned(), |s| (*s).to_owned())
        })
        .into_owned()
}

/// All loaded languages. Lookups fall back to the default language, then to the key itself.
pub struct Lang {
    default_lang: String,
    languages: HashMap<String, Arc<LanguageStrings>>,
}

impl Lang {
    /// Only the strings built into Herald, in `en_us`.
    pub fn new(default_lang: impl Into<String>) -> Self {
        let mut lang = Self {
            default_lang: default_lang.into(),
            languages: HashMap::new(),
        };

        if let Ok(builtin) = parse_lang_file("en_us", BUILTIN_EN_US) {
            lang.add(builtin);
        }

        lang
    }

    /// The built-in strings plus every `<lang>.lang` file in `dir`.
    pub fn load_dir(default_lang: impl Into<String>, dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        let mut lang = Self::new(default_lang);

        let entries = std::fs::read_dir(dir).with_context(|| format!("failed to read lang dir {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|e| e != "lang") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let contents =
                std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let strings = parse_lang_file(name, &contents).with_context(|| format!("in {}", path.display()))?;

            info!("Loaded {} strings for language {}", strings.strings.len(), name);
            lang.add(strings);
        }

        Ok(lang)
    }

    /// Adds a language, overriding individual keys if it is already loaded.
    pub fn add(&mut self, strings: LanguageStrings) {
        match self.languages.get_mut(&strings.name) {
            Some(existing) => {
                let mut merged = existing.strings.clone();
                merged.extend(strings.strings);
                *existing = Arc::new(LanguageStrings {
                    name: strings.name,
                    strings: merged,
                });
            },
            None => {
                self.languages.insert(strings.name.clone(), Arc::new(strings));
            },
        }
    }

    pub fn res(&self, lang: &str, key: &str, substitutions: &[&str]) -> String {
        (self.create_resource_loader(lang))(key, substitutions)
    }
}

impl Localization for Lang {
    fn create_resource_loader(&self, lang: &str) -> ResourceLoader {
        let requested = self.languages.get(lang).cloned();
        let fallback = self.languages.get(&self.default_lang).cloned();

        Arc::new(move |key: &str, substitutions: &[&str]| {
            let template = requested
                .iter()
                .chain(fallback.iter())
                .find_map(|l| l.strings.get(key));

            match template {
                Some(template) => substitute(template, substitutions),
                None => {
                    debug!("no localized string for key {key}");
                    key.to_owned()
                },
            }
        })
    }

    fn languages(&self) -> Vec<String> {
        let mut languages = self.languages.keys().cloned().collect::<Vec<_>>();
        languages.sort();
        languages
    }
}

/// Middleware that resolves the language for the invocation and passes a [`ResourceLoader`] for
/// it as the first argument.
///
/// The language is the guild's configured one, or the configured default in direct messages and
/// guilds without one. Attach this before any stage that inspects arguments by position.
pub struct Localize;

#[async_trait]
impl Middleware for Localize {
    async fn run(
        &self,
        ctxt: &CommandCtxt,
        message: Message,
        mut args: Vec<Argument>,
    ) -> anyhow::Result<MiddlewareOutcome> {
        let herald = &ctxt.herald;
        let default_lang = &herald.config.localization.default_lang;

        let lang = match message.guild_id {
            Some(guild_id) => Language::get(&herald.storage, guild_id.get())
                .await
                .context("Failed to get guild language")?
                .map_or_else(|| default_lang.clone(), |l| l.lang),
            None => default_lang.clone(),
        };

        args.insert(0, Argument::Resource(herald.localization.create_resource_loader(&lang)));
        Ok(MiddlewareOutcome::Continue(message, args))
    }
}

/// The loader injected by [`Localize`].
pub fn resource_loader(args: &[Argument]) -> anyhow::Result<&ResourceLoader> {
    args.first()
        .and_then(Argument::as_resource)
        .context("command expects to be localized, but no resource loader was passed")
}
