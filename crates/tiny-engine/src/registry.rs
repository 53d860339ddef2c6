use crate::error::EngineError;
use crate::exec_ctx::ExecCtx;
use crate::node::CommandNode;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// The result of running one command: an optional value, a control signal,
/// or an error.
pub type CommandResult = Result<Option<Value>, EngineError>;

/// A command handler: `(node, ctx, depth) -> result`.
///
/// Handlers reach the variable store and the rest of the engine through
/// `ctx`; recursion into nested scripts goes through [`ExecCtx::execute`].
pub type HandlerFn = dyn Fn(&CommandNode<'_>, &mut ExecCtx<'_>, usize) -> CommandResult + Send + Sync;

pub type Handler = Arc<HandlerFn>;

/// Command name -> handler.
///
/// The only extension point for new commands. A later registration under an
/// existing name replaces the earlier one.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Handler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        CommandRegistry::default()
    }

    /// Registers a handler. An empty name is silently ignored.
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&CommandNode<'_>, &mut ExecCtx<'_>, usize) -> CommandResult + Send + Sync + 'static,
    {
        self.register_handler(name, Arc::new(handler));
    }

    pub fn register_handler(&mut self, name: &str, handler: Handler) {
        if name.is_empty() {
            tracing::debug!("ignoring command registration with an empty name");
            return;
        }
        tracing::debug!(command = name, "registering command");
        self.handlers.insert(name.to_string(), handler);
    }

    /// Bulk form of [`register_handler`](Self::register_handler), same rule per entry.
    pub fn register_many<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, Handler)>,
        S: AsRef<str>,
    {
        for (name, handler) in entries {
            self.register_handler(name.as_ref(), handler);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
