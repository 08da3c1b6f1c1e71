//! Middleware: ordered transforms run over `(message, args)` before a command's action.
//!
//! A command's stages are composed around its action when the command is built, outermost stage
//! first, so they run in the order they were attached. Every wrapper has the same shape as the
//! action it wraps ([`Invoke`]), which is all the dispatcher ever sees.
//!
//! A stage either hands a (possibly replaced) `(message, args)` pair to the next stage with
//! [`MiddlewareOutcome::Continue`], or halts the chain. Halting happens on
//! [`MiddlewareOutcome::Reject`], which optionally sends a notice to the invoking channel first,
//! and on any `Err`, whose message is sent to the channel instead. Nothing after a halting stage
//! runs, including the action.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::CommandCtxt;
use super::arguments::Argument;
use crate::client::Message;

pub enum MiddlewareOutcome {
    Continue(Message, Vec<Argument>),
    Reject(Option<String>),
}

impl MiddlewareOutcome {
    pub fn reject() -> Self {
        Self::Reject(None)
    }

    pub fn reject_with(notice: impl Into<String>) -> Self {
        Self::Reject(Some(notice.into()))
    }
}

impl From<(Message, Vec<Argument>)> for MiddlewareOutcome {
    fn from((message, args): (Message, Vec<Argument>)) -> Self {
        Self::Continue(message, args)
    }
}

/// A single transform stage. Shared by every invocation of the command it is attached to, so it
/// must not keep per-call state.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn run(&self, ctxt: &CommandCtxt, message: Message, args: Vec<Argument>)
    -> anyhow::Result<MiddlewareOutcome>;
}

/// The executable body of a command.
#[async_trait]
pub trait CommandAction: Send + Sync {
    async fn execute(&self, ctxt: &CommandCtxt, message: Message, args: Vec<Argument>) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The action ran and returned `Ok`.
    Executed,
    /// A middleware stage halted the chain before the action.
    Halted,
}

/// An action, possibly wrapped in middleware.
#[async_trait]
pub trait Invoke: Send + Sync {
    async fn invoke(&self, ctxt: &CommandCtxt, message: Message, args: Vec<Argument>) -> anyhow::Result<Completion>;
}

struct Execute(Arc<dyn CommandAction>);

#[async_trait]
impl Invoke for Execute {
    async fn invoke(&self, ctxt: &CommandCtxt, message: Message, args: Vec<Argument>) -> anyhow::Result<Completion> {
        self.0.execute(ctxt, message, args).await?;
        Ok(Completion::Executed)
    }
}

/// `next`, guarded by one middleware stage.
pub struct Using {
    stage: Arc<dyn Middleware>,
    next: Box<dyn Invoke>,
}

impl Using {
    pub fn new(stage: Arc<dyn Middleware>, next: Box<dyn Invoke>) -> Self {
        Self { stage, next }
    }

    async fn notify(ctxt: &CommandCtxt, notice: &str) {
        if let Err(e) = ctxt.reply(notice).await {
            warn!("Failed to send middleware notice to channel {}: {e:#}", ctxt.channel_id);
        }
    }
}

#[async_trait]
impl Invoke for Using {
    async fn invoke(&self, ctxt: &CommandCtxt, message: Message, args: Vec<Argument>) -> anyhow::Result<Completion> {
        match self.stage.run(ctxt, message, args).await {
            Ok(MiddlewareOutcome::Continue(message, args)) => self.next.invoke(ctxt, message, args).await,
            Ok(MiddlewareOutcome::Reject(notice)) => {
                debug!("middleware rejected invocation of {}", ctxt.invoked_name);
                if let Some(notice) = notice {
                    Self::notify(ctxt, &notice).await;
                }
                Ok(Completion::Halted)
            },
            Err(error) => {
                debug!("middleware failed for {}: {error:#}", ctxt.invoked_name);
                Self::notify(ctxt, &error.to_string()).await;
                Ok(Completion::Halted)
            },
        }
    }
}

/// Wraps `action` so that `stages` run first, in order.
pub fn compose(stages: &[Arc<dyn Middleware>], action: Arc<dyn CommandAction>) -> Box<dyn Invoke> {
    stages
        .iter()
        .rev()
        .fold(Box::new(Execute(action)) as Box<dyn Invoke>, |next, stage| {
            Box::new(Using::new(stage.clone(), next))
        })
}

/// An async closure used as middleware.
pub struct MiddlewareFn<F>(pub F);

#[async_trait]
impl<F, Fut> Middleware for MiddlewareFn<F>
where
    F: Fn(CommandCtxt, Message, Vec<Argument>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<MiddlewareOutcome>> + Send + 'static,
{
    async fn run(
        &self,
        ctxt: &CommandCtxt,
        message: Message,
        args: Vec<Argument>,
    ) -> anyhow::Result<MiddlewareOutcome> {
        (self.0)(ctxt.clone(), message, args).await
    }
}

/// A plain function used as middleware, for transforms that never need to wait.
pub struct SyncMiddleware<F>(pub F);

#[async_trait]
impl<F> Middleware for SyncMiddleware<F>
where
    F: Fn(Message, Vec<Argument>) -> anyhow::Result<MiddlewareOutcome> + Send + Sync + 'static,
{
    async fn run(
        &self,
        _ctxt: &CommandCtxt,
        message: Message,
        args: Vec<Argument>,
    ) -> anyhow::Result<MiddlewareOutcome> {
        (self.0)(message, args)
    }
}

/// An async closure used as a command action.
pub struct ActionFn<F>(pub F);

#[async_trait]
impl<F, Fut> CommandAction for ActionFn<F>
where
    F: Fn(CommandCtxt, Message, Vec<Argument>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn execute(&self, ctxt: &CommandCtxt, message: Message, args: Vec<Argument>) -> anyhow::Result<()> {
        (self.0)(ctxt.clone(), message, args).await
    }
}
