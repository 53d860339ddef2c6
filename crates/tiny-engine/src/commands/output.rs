//! `print` and `msg`.

use crate::exec_ctx::ExecCtx;
use crate::node::CommandNode;
use crate::registry::{CommandResult, Handler};
use serde_json::Value;
use std::sync::Arc;

fn print_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, _depth: usize) -> CommandResult {
    for name in node.names() {
        ctx.sink.variable(name, ctx.vars.get(name));
    }
    Ok(None)
}

fn msg_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, _depth: usize) -> CommandResult {
    ctx.sink.message(node.args().unwrap_or(&Value::Null));
    Ok(None)
}

pub fn commands() -> Vec<(&'static str, Handler)> {
    vec![
        (super::CMD_PRINT, Arc::new(print_cmd) as Handler),
        (super::CMD_MSG, Arc::new(msg_cmd) as Handler),
    ]
}
