mod markdown;

pub use markdown::{Markdown, limit};
