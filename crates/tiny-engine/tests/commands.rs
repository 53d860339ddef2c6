//! Built-in command behaviour.

use serde_json::{json, Value};
use std::io;
use std::sync::{Arc, Mutex};
use tiny_engine::{Engine, EngineError, MemorySink};

fn check(script: Value) -> (Engine, Vec<String>) {
    let sink = Arc::new(MemorySink::new());
    let mut engine = Engine::from_value(script).with_sink(sink.clone());
    engine
        .run()
        .unwrap_or_else(|e| panic!("run failed: {e}"));
    let lines = sink.lines();
    (engine, lines)
}

fn check_err(script: Value) -> EngineError {
    let mut engine = Engine::from_value(script).with_sink(Arc::new(MemorySink::new()));
    engine.run().err().unwrap_or_else(|| panic!("expected an error"))
}

/// Log output captured by a scoped `tracing` subscriber.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn check_logged(script: Value) -> (Engine, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let (engine, _) = tracing::subscriber::with_default(subscriber, || check(script));
    (engine, buffer.contents())
}

// ----------------------------------------------------------------- vars / assign

#[test]
fn vars_merge_in_node_order() {
    let (e, _) = check(json!([
        ["vars", {"a": 1, "b": 1}],
        ["vars", {"b": 2, "c": [1, 2]}],
        ["vars", "ignored"]
    ]));
    assert_eq!(e.vars().to_value(), json!({"a": 1, "b": 2, "c": [1, 2]}));
}

#[test]
fn assign_copies_existing_values() {
    let (e, _) = check(json!([["vars", {"d": {"k": "v"}}], ["assign", {"e": "d"}]]));
    assert_eq!(e.vars().get("e"), Some(&json!({"k": "v"})));
}

#[test]
fn assign_with_missing_source_leaves_dest_alone() {
    let (e, logs) = check_logged(json!([["vars", {"e": "old"}], ["assign", {"e": "d"}]]));
    assert_eq!(e.vars().get("e"), Some(&json!("old")));
    assert!(logs.contains("WARN"), "no warning in {logs:?}");
    assert!(logs.contains("assign source is not defined"), "unexpected log {logs:?}");
    assert!(logs.contains("source=\"d\""), "unexpected log {logs:?}");
}

#[test]
fn assign_applies_entries_independently() {
    let (e, _) = check(json!([
        ["vars", {"a": 1}],
        ["assign", {"x": "a", "y": "missing", "z": "a", "w": 5}]
    ]));
    assert_eq!(e.vars().get("x"), Some(&json!(1)));
    assert_eq!(e.vars().get("z"), Some(&json!(1)));
    assert!(!e.vars().has("y"));
    assert!(!e.vars().has("w"));
}

// ----------------------------------------------------------------- print / msg

#[test]
fn print_emits_name_value_lines() {
    let (_, lines) = check(json!([
        ["vars", {"a": 1, "b": "two"}],
        ["print", "a"],
        ["print", ["b", "nope"]]
    ]));
    assert_eq!(lines, vec!["a -> 1", "b -> \"two\"", "nope -> undefined"]);
}

#[test]
fn msg_emits_literal_values() {
    let (_, lines) = check(json!([
        ["msg", "part 1"],
        ["msg", "$%a%$"],
        ["msg", {"k": 1}],
        ["msg"]
    ]));
    assert_eq!(lines, vec!["part 1", "$%a%$", r#"{"k":1}"#, "null"]);
}

// ----------------------------------------------------------------- assert

#[test]
fn assert_single_and_list_forms() {
    let (_, lines) = check(json!([
        ["vars", {"a": 1, "b": 2, "c": "hello world!", "z": ""}],
        ["assert", "a", ["msg", "a"]],
        ["assert", ["a", "b", "c"], ["msg", "abc"]],
        ["assert", ["a", "z"], ["msg", "az"]],
        ["assert", [], ["msg", "vacuous"]],
        ["assert", "missing", ["msg", "missing"]]
    ]));
    assert_eq!(lines, vec!["a", "abc", "vacuous"]);
}

#[test]
fn assert_sub_can_be_a_group() {
    let (_, lines) = check(json!([
        ["vars", {"c": "x"}],
        ["assert", "c", [["msg", 1], ["msg", 2]]]
    ]));
    assert_eq!(lines, vec!["1", "2"]);
}

#[test]
fn assert_falsy_values() {
    let (_, lines) = check(json!([
        ["vars", {"n": null, "f": false, "z": 0, "s": "", "a": [], "o": {}}],
        ["assert", "n", ["msg", "n"]],
        ["assert", "f", ["msg", "f"]],
        ["assert", "z", ["msg", "z"]],
        ["assert", "s", ["msg", "s"]],
        ["assert", "a", ["msg", "a"]],
        ["assert", "o", ["msg", "o"]]
    ]));
    assert!(lines.is_empty(), "got {lines:?}");
}

#[test]
fn assert_with_re_predicate() {
    let (_, lines) = check(json!([
        ["vars", {"c": "hello world!", "d": "bye"}],
        ["assert", {"var": "c", "re": "hello"}, ["msg", "c"]],
        ["assert", {"var": ["c", "d"], "re": "hello"}, ["msg", "cd"]],
        ["assert", {"var": ["c", "d"], "re": "l|y"}, ["msg", "both"]]
    ]));
    assert_eq!(lines, vec!["c", "both"]);
}

#[test]
fn assert_with_in_predicate() {
    let (_, lines) = check(json!([
        ["vars", {"status": "ok", "code": 200}],
        ["assert", {"var": "status", "in": ["ok", "done"]}, ["msg", "status"]],
        ["assert", {"var": "code", "in": [301, 302]}, ["msg", "redirect"]],
        ["assert", {"var": "status", "in": "looks ok"}, ["msg", "substring"]]
    ]));
    assert_eq!(lines, vec!["status", "substring"]);
}

#[test]
fn assert_in_matches_integers_against_floats() {
    let (_, lines) = check(json!([
        ["vars", {"n": 1, "f": 2.0}],
        ["assert", {"var": "n", "in": [1.0, 2.0]}, ["msg", "int in floats"]],
        ["assert", {"var": "f", "in": [1, 2]}, ["msg", "float in ints"]],
        ["assert", {"var": "n", "in": [1.5]}, ["msg", "never"]]
    ]));
    assert_eq!(lines, vec!["int in floats", "float in ints"]);
}

#[test]
fn assert_prefers_re_over_in() {
    let (_, lines) = check(json!([
        ["vars", {"c": "yes"}],
        ["assert", {"var": "c", "in": "x", "re": "y"}, ["msg", "re chosen"]]
    ]));
    assert_eq!(lines, vec!["re chosen"]);
}

#[test]
fn assert_object_without_predicate_tests_truthiness() {
    let (_, lines) = check(json!([
        ["vars", {"a": 1, "b": 0}],
        ["assert", {"var": "a", "other": 1}, ["msg", "a"]],
        ["assert", {"var": ["a", "b"]}, ["msg", "ab"]]
    ]));
    assert_eq!(lines, vec!["a"]);
}

#[test]
fn assert_is_idempotent() {
    let mut e = Engine::from_value(json!(null)).with_sink(Arc::new(MemorySink::new()));
    e.run_node(&json!(["vars", {"c": "abc"}])).unwrap();
    let node = json!(["assert", {"var": "c", "re": "b"}]);
    let first = e.run_node(&node).unwrap();
    let second = e.run_node(&node).unwrap();
    assert_eq!(first, Some(json!(true)));
    assert_eq!(first, second);
    assert_eq!(e.vars().to_value(), json!({"c": "abc"}));
}

#[test]
fn assert_rejects_bad_var() {
    assert!(matches!(check_err(json!(["assert", {"var": 1}])), EngineError::Config(_)));
    assert!(matches!(check_err(json!(["assert", {"in": [1]}])), EngineError::Config(_)));
    assert!(matches!(check_err(json!(["assert"])), EngineError::Config(_)));
}

#[test]
fn assert_bad_regex_propagates() {
    let err = check_err(json!([["vars", {"a": "x"}], ["assert", {"var": "a", "re": "("}]]));
    assert!(matches!(err, EngineError::Regex(_)), "got {err:?}");
}

#[test]
fn custom_predicate_is_used_when_preferred_ones_are_absent() {
    let sink = Arc::new(MemorySink::new());
    let mut e = Engine::from_value(json!([
        ["vars", {"n": 5}],
        ["assert", {"var": "n", "eq": 5}, ["msg", "eq"]],
        ["assert", {"var": "n", "eq": 5, "in": [1]}, ["msg", "in chosen and fails"]]
    ]))
    .with_sink(sink.clone());
    e.register_predicate("eq", |value, pattern| Ok(value == Some(pattern)));
    e.run().unwrap();
    assert_eq!(sink.lines(), vec!["eq"]);
}

// ----------------------------------------------------------------- jpath / xpath

#[test]
fn jpath_extracts_into_dest() {
    let (e, _) = check(json!([
        ["vars", {"doc": {"items": [{"id": 1}, {"id": 2}, {"name": "x"}]}}],
        ["jpath", ["doc", "$.items[*].id", "ids"]]
    ]));
    assert_eq!(e.vars().get("ids"), Some(&json!([1, 2])));
    assert!(e.vars().get("doc").unwrap().is_object());
}

#[test]
fn jpath_defaults_dest_to_source() {
    let (e, _) = check(json!([
        ["vars", {"doc": {"a": {"b": "deep"}}}],
        ["jpath", ["doc", "$..b"]]
    ]));
    assert_eq!(e.vars().get("doc"), Some(&json!(["deep"])));
}

#[test]
fn jpath_parses_json_text_sources() {
    let (e, _) = check(json!([
        ["vars", {"body": "{\"token\": \"abc\"}"}],
        ["jpath", ["body", "$.token", "token"]],
        ["jpath", ["missing", "$.x", "none"]]
    ]));
    assert_eq!(e.vars().get("token"), Some(&json!(["abc"])));
    assert_eq!(e.vars().get("none"), Some(&json!([])));
}

#[test]
fn jpath_argument_and_query_errors() {
    assert!(matches!(check_err(json!(["jpath", "doc"])), EngineError::Config(_)));
    assert!(matches!(check_err(json!(["jpath", ["doc"]])), EngineError::Config(_)));
    assert!(matches!(check_err(json!(["jpath", ["doc", 1]])), EngineError::Config(_)));
    assert!(matches!(check_err(json!(["jpath", ["doc", "$.a", "b", "c"]])), EngineError::Config(_)));
    assert!(matches!(check_err(json!(["jpath", ["doc", "not a path"]])), EngineError::JsonPath(_)));
}

#[test]
fn xpath_extracts_markup() {
    let page = r#"<html><body><a href="/x">X</a><p>text</p><a href="/y">Y</a></body></html>"#;
    let (e, _) = check(json!([
        ["vars", {"page": page}],
        ["xpath", ["page", "//a/@href", "links"]],
        ["xpath", ["page", "//a", "labels"]],
        ["xpath", ["page", "count(//a)", "count"]]
    ]));
    assert_eq!(e.vars().get("links"), Some(&json!(["/x", "/y"])));
    assert_eq!(e.vars().get("labels"), Some(&json!(["X", "Y"])));
    assert_eq!(e.vars().get("count"), Some(&json!([2.0])));
}

#[test]
fn xpath_reads_tag_soup_html() {
    let page = "<html><body><p>one<br><p>two<a href=/next>more</body></html>";
    let (e, _) = check(json!([
        ["vars", {"page": page}],
        ["xpath", ["page", "//p", "paras"]],
        ["xpath", ["page", "//a/@href", "links"]],
        ["xpath", ["page", "count(//br)", "breaks"]]
    ]));
    assert_eq!(e.vars().get("paras"), Some(&json!(["one", "twomore"])));
    assert_eq!(e.vars().get("links"), Some(&json!(["/next"])));
    assert_eq!(e.vars().get("breaks"), Some(&json!([1.0])));
}

#[test]
fn xpath_source_errors() {
    assert!(matches!(check_err(json!(["xpath", ["missing", "//a"]])), EngineError::Config(_)));
    assert!(matches!(
        check_err(json!([["vars", {"n": 1}], ["xpath", ["n", "//a"]]])),
        EngineError::Config(_)
    ));
    assert!(matches!(
        check_err(json!([["vars", {"m": "<open>"}], ["xpath", ["m", "//["]]])),
        EngineError::XPath(_)
    ));
}
