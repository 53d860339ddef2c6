//! `read`, `write` and `append`.
//!
//! All three take `{"file_name": ..., "var": ..., "encoding"?: ...}`. Template
//! tokens in `file_name` are expanded before the file is opened.

use crate::encoding::Encoding;
use crate::error::EngineError;
use crate::exec_ctx::ExecCtx;
use crate::node::CommandNode;
use crate::registry::{CommandResult, Handler};
use crate::util::str_val;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::Arc;

pub const ARG_FILE_NAME: &str = "file_name";
pub const ARG_VAR: &str = "var";
pub const ARG_ENCODING: &str = "encoding";

struct FileArgs<'a> {
    file_name: String,
    var: &'a str,
    encoding: Encoding,
}

fn file_args<'a>(node: &CommandNode<'a>, ctx: &ExecCtx<'_>) -> Result<FileArgs<'a>, EngineError> {
    let args = node
        .object()
        .ok_or_else(|| EngineError::config(format!("`{}` expects an object argument", node.name())))?;
    let file_name = args
        .get(ARG_FILE_NAME)
        .and_then(Value::as_str)
        .ok_or_else(|| EngineError::config(format!("'{ARG_FILE_NAME}' is required by `{}`", node.name())))?;
    let var = args
        .get(ARG_VAR)
        .and_then(Value::as_str)
        .ok_or_else(|| EngineError::config(format!("'{ARG_VAR}' is required by `{}`", node.name())))?;
    let label = args
        .get(ARG_ENCODING)
        .and_then(Value::as_str)
        .unwrap_or(ctx.settings.data_encoding.as_str());
    Ok(FileArgs {
        file_name: ctx.substitute(file_name)?,
        var,
        encoding: Encoding::from_label(label)?,
    })
}

fn read_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, _depth: usize) -> CommandResult {
    let FileArgs { file_name, var, encoding } = file_args(node, ctx)?;
    let text = encoding.decode(fs::read(&file_name)?)?;
    tracing::debug!(file = %file_name, var, bytes = text.len(), "file read");
    ctx.vars.set(var, Value::String(text));
    Ok(None)
}

fn store_file(node: &CommandNode<'_>, ctx: &ExecCtx<'_>, append: bool) -> CommandResult {
    let FileArgs { file_name, var, encoding } = file_args(node, ctx)?;
    let value = ctx
        .vars
        .get(var)
        .ok_or_else(|| EngineError::config(format!("variable `{var}` is not defined")))?;
    let text = str_val(value);
    let bytes = encoding.encode(&text)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(&file_name)?;
    file.write_all(bytes)?;
    tracing::debug!(file = %file_name, var, append, bytes = bytes.len(), "file written");
    Ok(None)
}

fn write_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, _depth: usize) -> CommandResult {
    store_file(node, ctx, false)
}

fn append_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, _depth: usize) -> CommandResult {
    store_file(node, ctx, true)
}

pub fn commands() -> Vec<(&'static str, Handler)> {
    vec![
        (super::CMD_READ, Arc::new(read_cmd) as Handler),
        (super::CMD_WRITE, Arc::new(write_cmd) as Handler),
        (super::CMD_APPEND, Arc::new(append_cmd) as Handler),
    ]
}
