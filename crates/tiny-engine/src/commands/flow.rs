//! Control flow: `rerun`, `break`, `call` and `callback`.

use crate::exec_ctx::ExecCtx;
use crate::node::CommandNode;
use crate::registry::{CommandResult, Handler};
use crate::signal::Signal;
use serde_json::Value;
use std::sync::Arc;

fn rerun_cmd(_node: &CommandNode<'_>, _ctx: &mut ExecCtx<'_>, depth: usize) -> CommandResult {
    tracing::debug!(depth, "rerun requested");
    Err(Signal::Rerun.into())
}

fn break_cmd(_node: &CommandNode<'_>, _ctx: &mut ExecCtx<'_>, depth: usize) -> CommandResult {
    tracing::debug!(depth, "break requested");
    Err(Signal::Break.into())
}

/// `["call", "name"]` or `["call", ["a", "b"]]` runs stored scripts in order.
/// Names holding anything but a list are skipped.
fn call_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, depth: usize) -> CommandResult {
    for name in node.names() {
        let script = match ctx.vars.get(name) {
            Some(script @ Value::Array(_)) => script.clone(),
            _ => {
                tracing::debug!(name, "call target is not a script");
                continue;
            }
        };
        ctx.execute(&script, depth + 1)?;
    }
    Ok(None)
}

fn callback_cmd(_node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, _depth: usize) -> CommandResult {
    if let Some(callback) = ctx.callback {
        tracing::debug!("callback requested");
        callback();
    }
    Ok(None)
}

pub fn commands() -> Vec<(&'static str, Handler)> {
    vec![
        (super::CMD_RERUN, Arc::new(rerun_cmd) as Handler),
        (super::CMD_BREAK, Arc::new(break_cmd) as Handler),
        (super::CMD_CALL, Arc::new(call_cmd) as Handler),
        (super::CMD_CALLBACK, Arc::new(callback_cmd) as Handler),
    ]
}
