use herald_storage::model::prefix::Prefix;
use tracing::debug;

use crate::client::Message;
use crate::gateway_handler::message_parser::error::PreParseError;
use crate::herald::Herald;

pub struct PreprocessResult {
    pub prefix: String,
}

/// Returns `Some(prefix)` if the prefix is the mention of the bot, otherwise `None`
pub fn message_mention_prefix(content: &str, bot_id: u64) -> Option<String> {
    let mention_no_nickname = format!("<@{bot_id}>");
    let mention_nickname = format!("<@!{bot_id}>");

    if content.starts_with(&mention_no_nickname) {
        Some(mention_no_nickname)
    } else if content.starts_with(&mention_nickname) {
        Some(mention_nickname)
    } else {
        None
    }
}

/// Initial message processing.
/// Checks the validity of the message before performing any kind of parsing.
///
/// This includes:
/// - Checking that the message is not sent by a bot or a webhook,
/// - Checking that the message starts with the correct prefix for the context, and returning any
///   identified prefix.
pub async fn preprocess(herald: &Herald, message: &Message) -> Result<PreprocessResult, PreParseError> {
    if message.author.bot {
        return Err(PreParseError::UserIsBotOrWebhook(message.author.id.get()));
    }

    // prefix precendence:
    // 1. prefix override (disabling other prefixes)
    // 2. mention prefix
    // 3. in dm: the default prefix if present, otherwise no prefix
    // 4. in guild: guild prefix
    let parsed_prefix = if let Some(ref r#override) = herald.config.dev.prefix_override {
        r#override.clone()
    } else if let Some(mention_prefix) = message_mention_prefix(&message.content, herald.config.bot_id) {
        mention_prefix
    } else if let Some(guild_id) = message.guild_id {
        let guild_prefix = Prefix::get(&herald.storage, guild_id.get()).await;
        match guild_prefix {
            // found prefix in storage/cache
            Ok(Some(p)) => p.prefix,
            // no prefix stored, add default
            Ok(None) => {
                let default_prefix = Prefix {
                    prefix: herald.config.prefix.default.clone(),
                };

                default_prefix
                    .set(&herald.storage, guild_id.get())
                    .await
                    .map_err(|e| PreParseError::Failure(format!("failed to set default prefix: {e}")))?;

                default_prefix.prefix
            },
            // error fetching, throw error
            Err(error) => {
                return Err(PreParseError::Failure(format!("failed to fetch prefixes: {error}")));
            },
        }
    } else if message.content.starts_with(&herald.config.prefix.default) {
        herald.config.prefix.default.clone()
    } else {
        "".to_owned()
    };

    debug!("parser: parsed prefix: {:?}", parsed_prefix);

    if !message.content.starts_with(&parsed_prefix) {
        return Err(PreParseError::MessageNotPrefixed(parsed_prefix));
    }

    Ok(PreprocessResult { prefix: parsed_prefix })
}
