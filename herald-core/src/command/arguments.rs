use std::fmt::Debug;

use herald_common::util::regex::ARGUMENT;

use crate::command::localization::ResourceLoader;

/// A single invocation argument.
///
/// Arguments start out as [`Argument::Text`], one per word of the message. Middleware may replace
/// them with parsed values or insert new ones, such as the [`Argument::Resource`] injected by the
/// localization stage.
#[derive(Clone)]
pub enum Argument {
    Text(String),
    Resource(ResourceLoader),
}

impl Argument {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&ResourceLoader> {
        match self {
            Self::Resource(r) => Some(r),
            _ => None,
        }
    }
}

impl Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Self::Resource(_) => f.write_str("Resource(..)"),
        }
    }
}

impl PartialEq for Argument {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

/// Splits raw argument text on whitespace. A double-quoted segment is kept as one argument,
/// without its quotes.
pub fn parse_args(raw: &str) -> Vec<Argument> {
    ARGUMENT
        .captures_iter(raw)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| Argument::Text(m.as_str().to_owned()))
        .collect()
}

/// The text arguments, in order, skipping anything middleware turned into another kind.
pub fn text_args(args: &[Argument]) -> Vec<&str> {
    args.iter().filter_map(Argument::as_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(raw: &str) -> Vec<String> {
        parse_args(raw)
            .into_iter()
            .map(|a| a.as_text().unwrap().to_owned())
            .collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(texts("a  b\tc"), vec!["a", "b", "c"]);
        assert!(parse_args("   ").is_empty());
    }

    #[test]
    fn keeps_quoted_segments() {
        assert_eq!(texts(r#"set "hello world" x"#), vec!["set", "hello world", "x"]);
        assert_eq!(texts(r#""""#), vec![""]);
    }
}
