//! Named comparison functions usable by `assert`.
//!
//! An `assert` args object may carry several predicate keys. The registry's
//! preference order decides which one applies: the first name in that order
//! that appears as a key wins, the rest are ignored.

use crate::error::EngineError;
use crate::util::{cached_regex, loose_eq, str_val};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub const PREDICATE_RE: &str = "re";
pub const PREDICATE_IN: &str = "in";

/// `(value, pattern) -> bool`. The value is `None` when the variable is undefined.
pub type PredicateFn = dyn Fn(Option<&Value>, &Value) -> Result<bool, EngineError> + Send + Sync;

#[derive(Clone)]
pub struct PredicateRegistry {
    map: HashMap<String, Arc<PredicateFn>>,
    prefer: Vec<String>,
}

impl PredicateRegistry {
    /// A registry with no predicates at all.
    pub fn empty() -> Self {
        PredicateRegistry {
            map: HashMap::new(),
            prefer: Vec::new(),
        }
    }

    /// Registers `f` under `name`. A new name is appended to the preference
    /// order; re-registering an existing name keeps its position.
    pub fn register<F>(&mut self, name: &str, f: F)
    where
        F: Fn(Option<&Value>, &Value) -> Result<bool, EngineError> + Send + Sync + 'static,
    {
        if name.is_empty() {
            return;
        }
        if !self.map.contains_key(name) {
            self.prefer.push(name.to_string());
        }
        self.map.insert(name.to_string(), Arc::new(f));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<PredicateFn>> {
        self.map.get(name)
    }

    pub fn preference(&self) -> &[String] {
        &self.prefer
    }

    /// Picks the predicate for an `assert` args object.
    pub fn select<'a>(&'a self, args: &Map<String, Value>) -> Option<(&'a str, &'a Arc<PredicateFn>)> {
        self.prefer
            .iter()
            .filter(|name| args.contains_key(name.as_str()))
            .find_map(|name| self.map.get(name).map(|f| (name.as_str(), f)))
    }
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        let mut registry = PredicateRegistry::empty();
        registry.register(PREDICATE_RE, re_search);
        registry.register(PREDICATE_IN, contained_in);
        registry
    }
}

/// Regex search anywhere in the value's string form.
pub fn re_search(value: Option<&Value>, pattern: &Value) -> Result<bool, EngineError> {
    let pattern = pattern
        .as_str()
        .ok_or_else(|| EngineError::config("'re' pattern must be a string"))?;
    let subject = match value {
        None | Some(Value::Null) => return Ok(false),
        Some(v) => str_val(v),
    };
    Ok(cached_regex(pattern)?.is_match(&subject))
}

/// Membership of the value in the pattern.
///
/// Substring for string patterns, element equality for arrays (numbers
/// compare by value), key lookup for objects.
pub fn contained_in(value: Option<&Value>, pattern: &Value) -> Result<bool, EngineError> {
    let Some(value) = value else {
        return Ok(false);
    };
    Ok(match (pattern, value) {
        (Value::String(hay), Value::String(needle)) => hay.contains(needle.as_str()),
        (Value::Array(items), v) => items.iter().any(|item| loose_eq(item, v)),
        (Value::Object(map), Value::String(key)) => map.contains_key(key),
        _ => false,
    })
}
