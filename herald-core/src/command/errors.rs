use std::fmt::Display;
use std::time::Duration;

use herald_common::util::format_duration;

use crate::gateway_handler::message_parser::error::{ErrorSeverity, GetErrorSeverity};

/// A rate limit string that does not follow `<limit>/<duration><unit>`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseRateLimitError {
    /// The string does not match the grammar at all.
    Malformed(String),
    /// Limit or duration is zero, or the window does not fit in milliseconds.
    OutOfRange(String),
}
impl Display for ParseRateLimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(spec) => write!(f, "malformed rate limit {spec:?}, expected <limit>/<duration><s|m|h|d>"),
            Self::OutOfRange(spec) => write!(f, "rate limit {spec:?} must have a non-zero limit and duration"),
        }
    }
}
impl std::error::Error for ParseRateLimitError {}

/// A command definition that cannot be built or registered. Always fatal to the registration.
#[derive(Debug)]
pub enum ConfigError {
    MissingName,
    MissingAction(String),
    RateLimit {
        command: String,
        error: ParseRateLimitError,
    },
    DuplicateName(String),
    DuplicateAlias {
        alias: String,
        existing: String,
        incoming: String,
    },
    UnknownOverload {
        command: String,
        target: String,
    },
}
impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => f.write_str("a command must have a non-empty name"),
            Self::MissingAction(name) => write!(f, "command \"{name}\" has no action"),
            Self::RateLimit { command, error } => write!(f, "command \"{command}\": {error}"),
            Self::DuplicateName(name) => write!(f, "a command with the name \"{name}\" already exists"),
            Self::DuplicateAlias {
                alias,
                existing,
                incoming,
            } => write!(f, "commands may not share aliases: {existing}, {incoming} (shared alias: {alias})"),
            Self::UnknownOverload { command, target } => {
                write!(f, "command \"{command}\" overloads \"{target}\", which is not registered")
            },
        }
    }
}
impl std::error::Error for ConfigError {}

/// Why a resolved command did not run to completion.
#[derive(Debug)]
pub enum ExecutionError {
    /// The command is not usable by this invoker in this context.
    Filtered,
    /// The invoker must wait this long before calling the command again.
    RateLimited(Duration),
    /// Permissions, roles or settings needed for filtering could not be fetched.
    Access(anyhow::Error),
    /// The command action itself failed.
    Command(anyhow::Error),
}
impl Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filtered => f.write_str("this command is not available here"),
            Self::RateLimited(wait) => write!(
                f,
                "you are using this command too quickly, try again in {}",
                format_duration(*wait)
            ),
            Self::Access(e) => write!(f, "failed to check command access: {e:#}"),
            Self::Command(e) => write!(f, "{e:#}"),
        }
    }
}
impl std::error::Error for ExecutionError {}
impl GetErrorSeverity for ExecutionError {
    fn get_severity(&self) -> ErrorSeverity {
        match self {
            Self::Filtered | Self::RateLimited(_) => ErrorSeverity::Low,
            Self::Access(_) | Self::Command(_) => ErrorSeverity::High,
        }
    }
}
