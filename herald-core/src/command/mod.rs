//! The command system.
//!
//! The key things that make up the command system are:
//!
//! - [`Command`]: a frozen command definition. It is created from a [`metadata::CommandBuilder`],
//!   to which metadata attributes (name, aliases, group, required permissions, rate limit, ...),
//!   middleware stages and finally an action are attached.
//!
//!   Once built, a command never changes. Reloading a command means registering a new definition
//!   under the same key.
//!
//! - The registry: [`registry::CommandRegistry`] owns every registered command, keeps names and
//!   aliases unique and answers the filter queries used by `help` and the dispatcher.
//!
//! - Middleware: [`middleware`] composes a command's stages around its action. Stages can rewrite
//!   the message and arguments, or halt the invocation.
//!
//! - [`check_metadata`] and [`execute`], which the message handler calls once a message has been
//!   resolved to a command. They apply the context filter for where the message came from, the
//!   command's rate limit, and then run the middleware chain.

use std::fmt::Debug;

use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;

use self::access::InvokerContext;
use self::arguments::Argument;
use self::errors::ExecutionError;
use self::metadata::CommandBuilder;
use self::middleware::{Completion, Invoke};
use self::ratelimit::{Decision, RateLimiter};
use crate::client::Message;
use crate::gateway_handler::reply as gateway_reply;
use crate::herald::ThreadSafeHerald;

pub mod access;
pub mod arguments;
pub mod base;
pub mod errors;
pub mod localization;
pub mod metadata;
pub mod middleware;
pub mod ratelimit;
pub mod registry;

/// A registered command.
pub struct Command {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub usage: String,
    pub extra_help: String,
    pub examples: Vec<String>,
    pub group: String,
    /// The invoker needs any one of these. Empty means no requirement.
    pub permissions: Permissions,
    /// The invoker needs any one of these roles. Empty means no requirement.
    pub roles: Vec<String>,
    pub ratelimit: RateLimiter,
    /// Name of the command this one may replace on registration.
    pub overloads: Option<String>,
    pub owner_only: bool,
    pub guild_only: bool,
    /// Omitted from help listings. Still usable.
    pub hidden: bool,
    invoke: Box<dyn Invoke>,
}

impl Command {
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder::new(name)
    }

    pub fn answers_to(&self, text: &str) -> bool {
        self.name == text || self.aliases.iter().any(|alias| alias == text)
    }

    /// `<prefix><name> <usage>`
    pub fn usage_line(&self, prefix: &str) -> String {
        if self.usage.is_empty() {
            format!("{prefix}{}", self.name)
        } else {
            format!("{prefix}{} {}", self.name, self.usage)
        }
    }

    /// Runs the middleware chain and action, without any checks.
    pub async fn invoke(&self, ctxt: &CommandCtxt, message: Message, args: Vec<Argument>) -> anyhow::Result<Completion> {
        self.invoke.invoke(ctxt, message, args).await
    }
}

impl Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("group", &self.group)
            .field("permissions", &self.permissions)
            .field("roles", &self.roles)
            .field("ratelimit", &self.ratelimit.rate_limit())
            .field("overloads", &self.overloads)
            .field("owner_only", &self.owner_only)
            .field("guild_only", &self.guild_only)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

/// Per-invocation context handed to middleware and actions. Cheap to clone.
#[derive(Clone)]
pub struct CommandCtxt {
    pub herald: ThreadSafeHerald,
    pub channel_id: Id<ChannelMarker>,
    /// The prefix the command was called with, e.g. `!` or a bot mention.
    pub calling_prefix: String,
    /// The name or alias the command was called with.
    pub invoked_name: String,
}

impl CommandCtxt {
    /// Sends `content` to the invoking channel, cut to the message length limit.
    pub async fn reply(&self, content: &str) -> anyhow::Result<()> {
        gateway_reply::reply(&self.herald, self.channel_id, content).await
    }
}

/// Checks that `command` may run for `message` right now, recording the call against the command's
/// rate limit if so.
///
/// The context filter comes first, so a filtered call never counts towards the limit.
pub async fn check_metadata(ctxt: &CommandCtxt, command: &Command, message: &Message) -> Result<(), ExecutionError> {
    let invoker = InvokerContext::resolve(&ctxt.herald, message)
        .await
        .map_err(ExecutionError::Access)?;

    if !invoker.can_use(command, message) {
        return Err(ExecutionError::Filtered);
    }

    match command.ratelimit.check(message.author.id) {
        Decision::Admit => Ok(()),
        Decision::Reject(wait) => Err(ExecutionError::RateLimited(wait)),
    }
}

/// Checks, then runs the command.
pub async fn execute(
    ctxt: &CommandCtxt,
    command: &Command,
    message: Message,
    args: Vec<Argument>,
) -> Result<Completion, ExecutionError> {
    check_metadata(ctxt, command, &message).await?;

    command
        .invoke(ctxt, message, args)
        .await
        .map_err(ExecutionError::Command)
}
