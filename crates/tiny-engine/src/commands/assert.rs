//! `assert`: test variables, then run an optional sub-script.
//!
//! Accepted args:
//!
//! - `"name"`: truthiness of one variable.
//! - `["a", "b"]`: every variable must be truthy.
//! - `{"var": "a" | ["a", "b"], "<predicate>": pattern}`: every variable must
//!   satisfy the selected predicate. Without a predicate key this falls back
//!   to truthiness.
//!
//! The sub-script (third node element) runs only when the outcome is true.
//! The handler returns the outcome as a boolean.

use crate::error::EngineError;
use crate::exec_ctx::ExecCtx;
use crate::node::CommandNode;
use crate::registry::{CommandResult, Handler};
use crate::util::is_truthy;
use serde_json::Value;
use std::sync::Arc;

pub const ARG_VAR: &str = "var";

fn lookup<'v>(ctx: &'v ExecCtx<'_>, names: &'v [Value]) -> Vec<Option<&'v Value>> {
    names
        .iter()
        .map(|n| n.as_str().and_then(|name| ctx.vars.get(name)))
        .collect()
}

fn outcome(node: &CommandNode<'_>, ctx: &ExecCtx<'_>) -> Result<bool, EngineError> {
    let single;
    let (names, predicate) = match node.args() {
        Some(Value::Object(args)) => {
            let names = match args.get(ARG_VAR) {
                Some(var @ Value::String(_)) => {
                    single = [var.clone()];
                    &single[..]
                }
                Some(Value::Array(items)) => &items[..],
                Some(_) => return Err(EngineError::config("'var' is not valid!")),
                None => return Err(EngineError::config("'var' is required by assert")),
            };
            let predicate = ctx.predicates.select(args).map(|(name, f)| (name, f, &args[name]));
            if predicate.is_none() {
                tracing::debug!("no predicate given, testing truthiness");
            }
            (names, predicate)
        }
        Some(Value::Array(items)) => (&items[..], None),
        Some(var @ Value::String(_)) => {
            single = [var.clone()];
            (&single[..], None)
        }
        _ => {
            return Err(EngineError::config(
                "assert expects a variable name, a list of names or an object",
            ))
        }
    };

    let values = lookup(ctx, names);
    match predicate {
        Some((name, f, pattern)) => {
            tracing::debug!(predicate = name, "asserting");
            for value in values {
                if !f(value, pattern)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        None => Ok(values.into_iter().all(is_truthy)),
    }
}

fn assert_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, depth: usize) -> CommandResult {
    let passed = outcome(node, ctx)?;
    if passed {
        if let Some(sub) = node.sub() {
            tracing::debug!(depth, "assert passed, running sub-script");
            ctx.execute(sub, depth + 1)?;
        }
    }
    Ok(Some(Value::Bool(passed)))
}

pub fn commands() -> Vec<(&'static str, Handler)> {
    vec![(super::CMD_ASSERT, Arc::new(assert_cmd) as Handler)]
}
