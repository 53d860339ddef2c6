//! Built-in commands.

pub mod assert;
pub mod extract;
pub mod file;
pub mod flow;
pub mod output;
pub mod store;

use crate::registry::{CommandRegistry, Handler};

pub const CMD_VARS: &str = "vars";
pub const CMD_ASSIGN: &str = "assign";
pub const CMD_PRINT: &str = "print";
pub const CMD_MSG: &str = "msg";
pub const CMD_CALL: &str = "call";
pub const CMD_RERUN: &str = "rerun";
pub const CMD_BREAK: &str = "break";
pub const CMD_CALLBACK: &str = "callback";
pub const CMD_ASSERT: &str = "assert";
pub const CMD_JPATH: &str = "jpath";
pub const CMD_XPATH: &str = "xpath";
pub const CMD_READ: &str = "read";
pub const CMD_WRITE: &str = "write";
pub const CMD_APPEND: &str = "append";

/// Every built-in command with its handler.
pub fn all_commands() -> Vec<(&'static str, Handler)> {
    let mut cmds = Vec::new();
    cmds.extend(store::commands());
    cmds.extend(output::commands());
    cmds.extend(flow::commands());
    cmds.extend(assert::commands());
    cmds.extend(extract::commands());
    cmds.extend(file::commands());
    cmds
}

/// A registry pre-populated with the built-in commands.
pub fn builtin_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register_many(all_commands());
    registry
}
