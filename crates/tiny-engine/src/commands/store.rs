//! Commands that write the variable store directly.

use crate::exec_ctx::ExecCtx;
use crate::node::CommandNode;
use crate::registry::{CommandResult, Handler};
use std::sync::Arc;

/// `["vars", {name: value, ...}]` merges the object into the store.
fn vars_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, _depth: usize) -> CommandResult {
    if let Some(entries) = node.object() {
        ctx.vars.set_all(entries.clone());
        tracing::debug!(count = entries.len(), "vars updated");
    }
    Ok(None)
}

/// `["assign", {dest: "source", ...}]` copies `source` to `dest`.
///
/// A missing source is logged and skipped. Entries before it stay applied.
fn assign_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, _depth: usize) -> CommandResult {
    let Some(entries) = node.object() else {
        return Ok(None);
    };
    for (dest, source) in entries {
        let Some(source) = source.as_str() else {
            tracing::warn!(dest = %dest, "assign source name must be a string");
            continue;
        };
        match ctx.vars.get(source).cloned() {
            Some(value) => ctx.vars.set(dest.clone(), value),
            None => tracing::warn!(dest = %dest, source, "assign source is not defined"),
        }
    }
    Ok(None)
}

pub fn commands() -> Vec<(&'static str, Handler)> {
    vec![
        (super::CMD_VARS, Arc::new(vars_cmd) as Handler),
        (super::CMD_ASSIGN, Arc::new(assign_cmd) as Handler),
    ]
}
