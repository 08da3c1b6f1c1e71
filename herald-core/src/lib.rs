//! Herald: declarative command dispatch for chat bots.
//!
//! Commands are declared with [`command::metadata::CommandBuilder`] and registered into the
//! [`herald::Herald`] state. Each incoming message is then passed to
//! [`herald::Herald::handle_message`], which resolves it to at most one command, checks the
//! command's constraints against the invoker, and runs it through its middleware.

pub mod client;
pub mod command;
pub mod gateway_handler;
pub mod herald;

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use anyhow::bail;
    use async_trait::async_trait;
    use herald_common::config::HeraldConfig;
    use herald_storage::StorageHandler;
    use herald_storage::memory::MemoryStorage;
    use twilight_model::guild::Permissions;
    use twilight_model::id::Id;
    use twilight_model::id::marker::{ChannelMarker, GuildMarker, UserMarker};

    use crate::client::{Author, ChatClient, Message};
    use crate::command::arguments::Argument;
    use crate::command::localization::Lang;
    use crate::command::metadata::CommandBuilder;
    use crate::command::{Command, CommandCtxt};
    use crate::herald::{Herald, ThreadSafeHerald};

    pub const TEST_BOT_ID: u64 = 1000;
    pub const TEST_OWNER_ID: u64 = 1;
    pub const TEST_GUILD_ID: u64 = 500;
    pub const TEST_CHANNEL_ID: u64 = 600;

    /// Serves fixed permissions and roles to every member, and records sent messages.
    pub struct MockClient {
        permissions: Mutex<Permissions>,
        roles: Mutex<Vec<String>>,
        fail_lookups: AtomicBool,
        sent: Mutex<Vec<String>>,
    }

    impl MockClient {
        pub fn new() -> Self {
            Self {
                permissions: Mutex::new(Permissions::empty()),
                roles: Mutex::new(vec![]),
                fail_lookups: AtomicBool::new(false),
                sent: Mutex::new(vec![]),
            }
        }

        pub fn set_permissions(&self, permissions: Permissions) {
            *self.permissions.lock().unwrap() = permissions;
        }

        pub fn set_roles<const N: usize>(&self, roles: [&str; N]) {
            *self.roles.lock().unwrap() = roles.iter().map(|r| (*r).to_owned()).collect();
        }

        /// Makes every permission and role lookup fail from now on.
        pub fn fail_lookups(&self) {
            self.fail_lookups.store(true, Ordering::SeqCst);
        }

        pub fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatClient for MockClient {
        async fn member_permissions(
            &self,
            _guild_id: Id<GuildMarker>,
            _channel_id: Id<ChannelMarker>,
            _user_id: Id<UserMarker>,
        ) -> anyhow::Result<Permissions> {
            if self.fail_lookups.load(Ordering::SeqCst) {
                bail!("permission lookup failed");
            }
            Ok(*self.permissions.lock().unwrap())
        }

        async fn member_role_names(
            &self,
            _guild_id: Id<GuildMarker>,
            _user_id: Id<UserMarker>,
        ) -> anyhow::Result<Vec<String>> {
            if self.fail_lookups.load(Ordering::SeqCst) {
                bail!("role lookup failed");
            }
            Ok(self.roles.lock().unwrap().clone())
        }

        async fn send_message(&self, _channel_id: Id<ChannelMarker>, content: &str) -> anyhow::Result<()> {
            self.sent.lock().unwrap().push(content.to_owned());
            Ok(())
        }
    }

    pub fn test_config() -> HeraldConfig {
        HeraldConfig {
            owners: vec![TEST_OWNER_ID],
            bot_id: TEST_BOT_ID,
            ..Default::default()
        }
    }

    pub fn herald() -> (ThreadSafeHerald, Arc<MockClient>) {
        herald_with(test_config())
    }

    pub fn herald_with(config: HeraldConfig) -> (ThreadSafeHerald, Arc<MockClient>) {
        let lang = Lang::new(config.localization.default_lang.clone());
        herald_with_localization(config, lang)
    }

    pub fn herald_with_localization(config: HeraldConfig, lang: Lang) -> (ThreadSafeHerald, Arc<MockClient>) {
        let client = Arc::new(MockClient::new());
        let herald = Herald::new(
            config,
            client.clone(),
            StorageHandler::new(Arc::new(MemoryStorage::new())),
            Arc::new(lang),
        );
        (Arc::new(herald), client)
    }

    fn message(author: u64, guild_id: Option<u64>, content: &str) -> Message {
        Message {
            id: Id::new(1),
            channel_id: Id::new(TEST_CHANNEL_ID),
            guild_id: guild_id.map(Id::new),
            author: Author {
                id: Id::new(author),
                name: format!("user{author}"),
                bot: false,
            },
            content: content.to_owned(),
        }
    }

    pub fn guild_message(author: u64, content: &str) -> Message {
        message(author, Some(TEST_GUILD_ID), content)
    }

    pub fn dm_message(author: u64, content: &str) -> Message {
        message(author, None, content)
    }

    pub fn ctxt(herald: &ThreadSafeHerald, message: &Message) -> CommandCtxt {
        CommandCtxt {
            herald: herald.clone(),
            channel_id: message.channel_id,
            calling_prefix: "!".to_owned(),
            invoked_name: "test".to_owned(),
        }
    }

    pub fn text(value: &str) -> Argument {
        Argument::Text(value.to_owned())
    }

    /// Builds a command whose action does nothing.
    pub fn noop_command(builder: CommandBuilder) -> Command {
        builder
            .action_fn(|_ctxt, _message, _args| async { Ok(()) })
            .build()
            .unwrap()
    }
}
