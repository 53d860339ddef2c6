//! The recursive evaluator.

use crate::error::EngineError;
use crate::exec_ctx::ExecCtx;
use crate::node::Node;
use crate::registry::CommandResult;
use crate::settings::BreakMode;
use crate::signal::Signal;
use serde_json::Value;

/// Executes one script node.
///
/// - Anything that is not a non-empty list does nothing.
/// - `[name, args?, sub?]` dispatches to the handler registered under
///   `name`. Unregistered names do nothing unless the engine is strict.
/// - Any other list is a group: each element runs in order at `depth + 1`.
///   A `rerun` restarts the group from its first element; a `break` is
///   caught here only under [`BreakMode::Block`].
pub fn execute(node: &Value, ctx: &mut ExecCtx<'_>, depth: usize) -> CommandResult {
    match Node::classify(node) {
        Node::Inert => Ok(None),
        Node::Command(cmd) => {
            let handler = ctx.commands.get(cmd.name()).cloned();
            match handler {
                Some(handler) => {
                    tracing::debug!(command = cmd.name(), depth, "running command");
                    handler(&cmd, ctx, depth)
                }
                None if ctx.settings.strict => Err(EngineError::UnknownCommand(cmd.name().to_string())),
                None => {
                    tracing::debug!(command = cmd.name(), depth, "skipping unregistered command");
                    Ok(None)
                }
            }
        }
        Node::Group(items) => {
            run_group(items, ctx, depth)?;
            Ok(None)
        }
    }
}

fn run_group(items: &[Value], ctx: &mut ExecCtx<'_>, depth: usize) -> Result<(), EngineError> {
    tracing::debug!(depth, len = items.len(), "running group");
    loop {
        let pass = items
            .iter()
            .try_for_each(|child| execute(child, ctx, depth + 1).map(|_| ()));
        match pass {
            Ok(()) => return Ok(()),
            Err(EngineError::Signal(Signal::Rerun)) => {
                tracing::debug!(depth, "rerun requested, restarting group");
            }
            Err(EngineError::Signal(Signal::Break)) if ctx.settings.break_mode == BreakMode::Block => {
                tracing::debug!(depth, "break requested, leaving group");
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}
