//! Typed view over a script node.
//!
//! Scripts stay plain `serde_json::Value`s; this module only classifies them.

use crate::util;
use serde_json::{Map, Value};

/// What a value means when it is executed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// `[command, args?, sub?]` with a string command.
    Command(CommandNode<'a>),
    /// A list whose first element is not a string. Every element is a child.
    Group(&'a [Value]),
    /// Anything that is not a non-empty list. Executes to nothing.
    Inert,
}

impl<'a> Node<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => match items.first() {
                None => Node::Inert,
                Some(Value::String(name)) => Node::Command(CommandNode { name, items }),
                Some(_) => Node::Group(items),
            },
            _ => Node::Inert,
        }
    }
}

/// A command node: the name plus accessors for the optional payloads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandNode<'a> {
    name: &'a str,
    items: &'a [Value],
}

impl<'a> CommandNode<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The raw node, including the command name at index 0.
    pub fn items(&self) -> &'a [Value] {
        self.items
    }

    pub fn args(&self) -> Option<&'a Value> {
        self.items.get(1)
    }

    pub fn sub(&self) -> Option<&'a Value> {
        self.items.get(2)
    }

    /// `args` as a list of names: a single string or an array of strings.
    pub fn names(&self) -> Vec<&'a str> {
        util::names(self.args())
    }

    pub fn object(&self) -> Option<&'a Map<String, Value>> {
        self.args().and_then(Value::as_object)
    }

    pub fn array(&self) -> Option<&'a [Value]> {
        self.args().and_then(Value::as_array).map(Vec::as_slice)
    }
}
