use crate::error::EngineError;
use crate::predicates::PredicateRegistry;
use crate::registry::{CommandRegistry, CommandResult};
use crate::settings::Settings;
use crate::sink::Sink;
use crate::vars::Vars;
use serde_json::Value;
use std::sync::Arc;

/// Zero-argument host hook invoked by the `callback` command.
pub type Callback = dyn Fn() + Send + Sync;

/// The execution context passed to every command handler.
pub struct ExecCtx<'a> {
    pub vars: &'a mut Vars,
    /// Used for recursive dispatch.
    pub commands: Arc<CommandRegistry>,
    pub predicates: Arc<PredicateRegistry>,
    pub settings: &'a Settings,
    pub callback: Option<&'a Callback>,
    pub sink: &'a dyn Sink,
}

impl<'a> ExecCtx<'a> {
    /// Executes `node` with this context.
    pub fn execute(&mut self, node: &Value, depth: usize) -> CommandResult {
        crate::execute::execute(node, self, depth)
    }

    /// Expands template tokens in `text` with the configured delimiters.
    pub fn substitute(&self, text: &str) -> Result<String, EngineError> {
        self.vars.substitute(text, &self.settings.delimiters)
    }
}
