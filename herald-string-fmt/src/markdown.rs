use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

/// Longest message, in characters, that chat platforms generally accept.
pub const MESSAGE_LIMIT: usize = 2000;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*").unwrap();
    static ref CODESTRING: Regex = Regex::new(r"`").unwrap();
}

pub trait Markdown {
    fn escape_bold(&self) -> String;
    fn escape_codestring(&self) -> String;

    fn bold(&self) -> String;
    fn codestring(&self) -> String;
}

fn cut(t: impl Display, to: usize) -> String {
    t.to_string().chars().take(to).collect::<String>()
}

/// Truncates `content` so that it fits in a single message.
pub fn limit(content: &str) -> &str {
    match content.char_indices().nth(MESSAGE_LIMIT) {
        Some((byte_index, _)) => &content[..byte_index],
        None => content,
    }
}

impl<T> Markdown for T
where
    T: Display,
{
    fn escape_bold(&self) -> String {
        BOLD.replace_all(&cut(self, MESSAGE_LIMIT - 4), r"\*\*").into_owned()
    }

    fn escape_codestring(&self) -> String {
        CODESTRING.replace_all(&cut(self, MESSAGE_LIMIT - 2), "'").into_owned()
    }

    fn bold(&self) -> String {
        format!("**{}**", self.escape_bold())
    }

    fn codestring(&self) -> String {
        format!("`{}`", self.escape_codestring())
    }
}
