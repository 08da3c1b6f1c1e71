//! Declarative command metadata.
//!
//! A command is described by attaching independent [`Attribute`]s to a [`CommandBuilder`], then
//! freezing it with [`CommandBuilder::build`]. Each attribute sets exactly one field; attaching the
//! same kind of attribute twice keeps the last value. Nothing here looks at other commands, that is
//! left to the registry.
//!
//! ```ignore
//! let command = Command::builder("ping")
//!     .attach([
//!         metadata::aliases(["pong"]),
//!         metadata::description("Check that the bot is alive"),
//!         metadata::ratelimit("2/5s"),
//!     ])
//!     .action_fn(|ctxt, _message, _args| async move { ctxt.reply("Pong!").await })
//!     .build()?;
//! ```

use std::future::Future;
use std::sync::Arc;

use twilight_model::guild::Permissions;

use super::arguments::Argument;
use super::errors::ConfigError;
use super::localization::Localize;
use super::middleware::{ActionFn, CommandAction, Middleware, compose};
use super::ratelimit::RateLimiter;
use super::{Command, CommandCtxt};
use crate::client::Message;

/// Group assigned to commands that do not declare one.
pub const DEFAULT_GROUP: &str = "misc";

#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    Name(String),
    Aliases(Vec<String>),
    Description(String),
    Usage(String),
    ExtraHelp(String),
    Examples(Vec<String>),
    Group(String),
    Permissions(Permissions),
    Roles(Vec<String>),
    RateLimit(String),
    Overloads(String),
    OwnerOnly,
    GuildOnly,
    Hidden,
}

fn strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

pub fn name(name: impl Into<String>) -> Attribute {
    Attribute::Name(name.into())
}

pub fn aliases<I, S>(aliases: I) -> Attribute
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Attribute::Aliases(strings(aliases))
}

pub fn description(description: impl Into<String>) -> Attribute {
    Attribute::Description(description.into())
}

/// Argument synopsis shown after the command name, e.g. `<user> [reason]`.
pub fn usage(usage: impl Into<String>) -> Attribute {
    Attribute::Usage(usage.into())
}

/// Longer help text, shown only when help is requested for this command specifically.
pub fn extra_help(extra_help: impl Into<String>) -> Attribute {
    Attribute::ExtraHelp(extra_help.into())
}

/// Example argument strings, without prefix or command name.
pub fn examples<I, S>(examples: I) -> Attribute
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Attribute::Examples(strings(examples))
}

pub fn group(group: impl Into<String>) -> Attribute {
    Attribute::Group(group.into())
}

/// The invoker needs at least **one** of these permissions in the channel.
pub fn permissions(permissions: Permissions) -> Attribute {
    Attribute::Permissions(permissions)
}

/// The invoker needs at least one role with one of these names.
pub fn roles<I, S>(roles: I) -> Attribute
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Attribute::Roles(strings(roles))
}

/// `<limit>/<duration><unit>`, parsed when the command is built.
pub fn ratelimit(spec: impl Into<String>) -> Attribute {
    Attribute::RateLimit(spec.into())
}

/// Allows this command to replace the registered command named `target`.
pub fn overloads(target: impl Into<String>) -> Attribute {
    Attribute::Overloads(target.into())
}

pub fn owner_only() -> Attribute {
    Attribute::OwnerOnly
}

pub fn guild_only() -> Attribute {
    Attribute::GuildOnly
}

pub fn hidden() -> Attribute {
    Attribute::Hidden
}

/// A command definition that has not been frozen yet.
pub struct CommandBuilder {
    name: String,
    aliases: Vec<String>,
    description: String,
    usage: String,
    extra_help: String,
    examples: Vec<String>,
    group: String,
    permissions: Permissions,
    roles: Vec<String>,
    ratelimit: Option<String>,
    overloads: Option<String>,
    owner_only: bool,
    guild_only: bool,
    hidden: bool,
    stages: Vec<Arc<dyn Middleware>>,
    action: Option<Arc<dyn CommandAction>>,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: vec![],
            description: String::new(),
            usage: String::new(),
            extra_help: String::new(),
            examples: vec![],
            group: DEFAULT_GROUP.to_owned(),
            permissions: Permissions::empty(),
            roles: vec![],
            ratelimit: None,
            overloads: None,
            owner_only: false,
            guild_only: false,
            hidden: false,
            stages: vec![],
            action: None,
        }
    }

    pub fn with(mut self, attribute: Attribute) -> Self {
        match attribute {
            Attribute::Name(name) => self.name = name,
            Attribute::Aliases(aliases) => self.aliases = aliases,
            Attribute::Description(description) => self.description = description,
            Attribute::Usage(usage) => self.usage = usage,
            Attribute::ExtraHelp(extra_help) => self.extra_help = extra_help,
            Attribute::Examples(examples) => self.examples = examples,
            Attribute::Group(group) => self.group = group,
            Attribute::Permissions(permissions) => self.permissions = permissions,
            Attribute::Roles(roles) => self.roles = roles,
            Attribute::RateLimit(spec) => self.ratelimit = Some(spec),
            Attribute::Overloads(target) => self.overloads = Some(target),
            Attribute::OwnerOnly => self.owner_only = true,
            Attribute::GuildOnly => self.guild_only = true,
            Attribute::Hidden => self.hidden = true,
        }
        self
    }

    pub fn attach(self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        attributes.into_iter().fold(self, Self::with)
    }

    pub fn aliases<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(aliases(values))
    }

    pub fn description(self, value: impl Into<String>) -> Self {
        self.with(description(value))
    }

    pub fn usage(self, value: impl Into<String>) -> Self {
        self.with(usage(value))
    }

    pub fn group(self, value: impl Into<String>) -> Self {
        self.with(group(value))
    }

    pub fn permissions(self, value: Permissions) -> Self {
        self.with(permissions(value))
    }

    pub fn ratelimit(self, spec: impl Into<String>) -> Self {
        self.with(ratelimit(spec))
    }

    /// Appends a middleware stage. Stages run in the order they are added.
    pub fn using(mut self, stage: impl Middleware + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Appends the localization stage, which passes a resource loader as the first argument.
    pub fn localizable(self) -> Self {
        self.using(Localize)
    }

    pub fn action(mut self, action: impl CommandAction + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn action_fn<F, Fut>(self, action: F) -> Self
    where
        F: Fn(CommandCtxt, Message, Vec<Argument>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.action(ActionFn(action))
    }

    /// Freezes the definition. Fails if the name is empty, no action was given, or the rate limit
    /// does not parse.
    pub fn build(self) -> Result<Command, ConfigError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(ConfigError::MissingName);
        }

        let Some(action) = self.action else {
            return Err(ConfigError::MissingAction(name));
        };

        let ratelimit = match self.ratelimit {
            Some(spec) => RateLimiter::new(&spec).map_err(|error| ConfigError::RateLimit {
                command: name.clone(),
                error,
            })?,
            None => RateLimiter::not_rate_limited(),
        };

        let mut aliases = Vec::with_capacity(self.aliases.len());
        for alias in self.aliases {
            if !alias.is_empty() && alias != name && !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }

        Ok(Command {
            name,
            aliases,
            description: self.description,
            usage: self.usage,
            extra_help: self.extra_help,
            examples: self.examples,
            group: self.group,
            permissions: self.permissions,
            roles: self.roles,
            ratelimit,
            overloads: self.overloads,
            owner_only: self.owner_only,
            guild_only: self.guild_only,
            hidden: self.hidden,
            invoke: compose(&self.stages, action),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ratelimit::RateLimit;

    fn noop() -> CommandBuilder {
        CommandBuilder::new("cmd").action_fn(|_ctxt, _message, _args| async { Ok(()) })
    }

    #[test]
    fn defaults() {
        let command = noop().build().unwrap();
        assert_eq!(command.name, "cmd");
        assert_eq!(command.group, DEFAULT_GROUP);
        assert!(command.aliases.is_empty());
        assert!(command.permissions.is_empty());
        assert!(!command.owner_only && !command.guild_only && !command.hidden);
        assert_eq!(command.ratelimit.rate_limit(), None);
        assert_eq!(command.overloads, None);
    }

    #[test]
    fn attributes_set_their_field() {
        let command = noop()
            .attach([
                aliases(["c", "cm"]),
                description("does things"),
                usage("<thing>"),
                extra_help("more"),
                examples(["a", "b"]),
                group("tools"),
                permissions(Permissions::MANAGE_GUILD | Permissions::ADMINISTRATOR),
                roles(["Mod"]),
                ratelimit("3/10s"),
                overloads("other"),
                owner_only(),
                guild_only(),
                hidden(),
            ])
            .build()
            .unwrap();

        assert_eq!(command.aliases, vec!["c", "cm"]);
        assert_eq!(command.description, "does things");
        assert_eq!(command.usage, "<thing>");
        assert_eq!(command.extra_help, "more");
        assert_eq!(command.examples, vec!["a", "b"]);
        assert_eq!(command.group, "tools");
        assert!(command.permissions.contains(Permissions::MANAGE_GUILD));
        assert_eq!(command.roles, vec!["Mod"]);
        assert_eq!(
            command.ratelimit.rate_limit(),
            Some(RateLimit {
                limit: 3,
                duration: std::time::Duration::from_secs(10)
            })
        );
        assert_eq!(command.overloads.as_deref(), Some("other"));
        assert!(command.owner_only && command.guild_only && command.hidden);
    }

    #[test]
    fn reattaching_overwrites() {
        let command = noop()
            .with(group("a"))
            .with(group("b"))
            .with(aliases(["x"]))
            .with(aliases(["y"]))
            .with(name("renamed"))
            .build()
            .unwrap();

        assert_eq!(command.name, "renamed");
        assert_eq!(command.group, "b");
        assert_eq!(command.aliases, vec!["y"]);
    }

    #[test]
    fn duplicate_and_self_aliases_are_dropped() {
        let command = noop().aliases(["cmd", "c", "c", ""]).build().unwrap();
        assert_eq!(command.aliases, vec!["c"]);
    }

    #[test]
    fn build_rejects_misuse() {
        assert!(matches!(
            CommandBuilder::new("  ")
                .action_fn(|_ctxt, _message, _args| async { Ok(()) })
                .build(),
            Err(ConfigError::MissingName)
        ));
        assert!(matches!(
            CommandBuilder::new("two words")
                .action_fn(|_ctxt, _message, _args| async { Ok(()) })
                .build(),
            Err(ConfigError::MissingName)
        ));
        assert!(matches!(
            CommandBuilder::new("cmd").build(),
            Err(ConfigError::MissingAction(name)) if name == "cmd"
        ));
        assert!(matches!(
            noop().ratelimit("often").build(),
            Err(ConfigError::RateLimit { command, .. }) if command == "cmd"
        ));
    }
}
