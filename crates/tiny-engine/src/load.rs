//! Script loading: JSON5 first, strict JSON as a fallback.

use crate::encoding::{Encoding, DEFAULT_ENCODING};
use crate::error::EngineError;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parses script text into a node tree.
///
/// When neither parser accepts the text, the error carries both messages.
pub fn parse_script(text: &str) -> Result<Value, EngineError> {
    match json5::from_str::<Value>(text) {
        Ok(script) => Ok(script),
        Err(json5_err) => serde_json::from_str::<Value>(text).map_err(|json_err| EngineError::Load {
            json5: json5_err.to_string(),
            json: json_err.to_string(),
        }),
    }
}

/// Reads and parses a script file. `encoding` defaults to UTF-8.
pub fn read_script(path: &Path, encoding: Option<&str>) -> Result<Value, EngineError> {
    let encoding = Encoding::from_label(encoding.unwrap_or(DEFAULT_ENCODING))?;
    let text = encoding.decode(fs::read(path)?)?;
    parse_script(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_json5() {
        let script = parse_script("[['vars', { a: 1, b: 'x', }], // comment\n ['print', 'a']]").unwrap();
        assert_eq!(script, json!([["vars", {"a": 1, "b": "x"}], ["print", "a"]]));
    }

    #[test]
    fn parses_strict_json() {
        let script = parse_script(r#"[["msg", "hi"]]"#).unwrap();
        assert_eq!(script, json!([["msg", "hi"]]));
    }

    #[test]
    fn reports_both_parsers() {
        let err = parse_script("[['msg',").unwrap_err();
        let EngineError::Load { json5, json } = &err else {
            panic!("expected load error, got {err:?}");
        };
        assert!(!json5.is_empty());
        assert!(!json.is_empty());
        assert_eq!(err.to_string(), format!("{json5} | {json}"));
    }
}
