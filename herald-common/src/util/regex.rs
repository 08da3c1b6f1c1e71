use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref RATE_LIMIT: Regex = Regex::new(r"^(\d+)/(\d+)([smhd])$").unwrap();
    pub static ref LANG_HEADER: Regex = Regex::new(r"^\[(\w+)\]\s*$").unwrap();
    pub static ref LANG_COMMENT: Regex = Regex::new(r"\s*##.*$").unwrap();
    pub static ref SUBSTITUTION: Regex = Regex::new(r"\{(\d+)\}").unwrap();
    pub static ref ARGUMENT: Regex = Regex::new(r#""([^"]*)"|(\S+)"#).unwrap();
}
