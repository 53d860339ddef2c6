use crate::error::EngineError;
use crate::settings::Delimiters;
use crate::util::{cached_regex, str_val};
use regex::Captures;
use serde_json::{Map, Value};

/// Variable store.
///
/// Maps names to arbitrary JSON values. Last write wins. Values may be
/// scripts themselves (see the `call` command) or documents that the
/// extraction commands query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vars {
    vars: Map<String, Value>,
}

impl Vars {
    pub fn new() -> Self {
        Vars::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn has(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn del(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    /// Merges `entries` into the store, overwriting existing keys.
    pub fn set_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.vars.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }

    /// The whole store as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.vars.clone())
    }

    /// Replaces `prefix + name + suffix` tokens with the string form of the
    /// named variable.
    ///
    /// Tokens naming an absent or `null` variable are left verbatim. The
    /// input is scanned once, so text produced by a replacement is never
    /// expanded again. The token pattern is compiled once per delimiter pair.
    pub fn substitute(&self, text: &str, delimiters: &Delimiters) -> Result<String, EngineError> {
        if delimiters.prefix.is_empty() || delimiters.suffix.is_empty() {
            return Err(EngineError::config("template delimiters must not be empty"));
        }
        let pattern = format!(
            "{}(.+?){}",
            regex::escape(&delimiters.prefix),
            regex::escape(&delimiters.suffix)
        );
        let re = cached_regex(&pattern)?;
        let out = re.replace_all(text, |caps: &Captures<'_>| match self.get(&caps[1]) {
            Some(Value::Null) | None => caps[0].to_string(),
            Some(v) => str_val(v),
        });
        Ok(out.into_owned())
    }
}

impl From<Map<String, Value>> for Vars {
    fn from(vars: Map<String, Value>) -> Self {
        Vars { vars }
    }
}

impl FromIterator<(String, Value)> for Vars {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Vars {
            vars: iter.into_iter().collect(),
        }
    }
}
