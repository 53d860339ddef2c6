//! `jpath` and `xpath`: query a stored document and store the matches.
//!
//! Both take `[source, expression]` or `[source, expression, dest]`. The
//! matches are stored as an array under `dest`, or back under `source` when
//! no destination is named.

use crate::error::EngineError;
use crate::exec_ctx::ExecCtx;
use crate::node::CommandNode;
use crate::registry::{CommandResult, Handler};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, Attribute};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use serde_json::{Number, Value};
use serde_json_path::JsonPath;
use std::sync::Arc;
use sxd_document::dom::{Document, Element};
use sxd_document::Package;

struct Extraction<'a> {
    source: &'a str,
    expr: &'a str,
    dest: &'a str,
}

fn extraction<'a>(node: &CommandNode<'a>) -> Result<Extraction<'a>, EngineError> {
    let usage = || EngineError::config(format!("`{}` expects [source, expression, dest?]", node.name()));
    let items = node.array().ok_or_else(usage)?;
    if !(2..=3).contains(&items.len()) {
        return Err(usage());
    }
    let mut strs = items.iter().map(Value::as_str);
    let source = strs.next().flatten().ok_or_else(usage)?;
    let expr = strs.next().flatten().ok_or_else(usage)?;
    let dest = match strs.next() {
        Some(dest) => dest.ok_or_else(usage)?,
        None => source,
    };
    Ok(Extraction { source, expr, dest })
}

/// Runs a JSONPath query. A string document is parsed as JSON first when it
/// holds valid JSON text.
pub fn select_json(doc: &Value, expr: &str) -> Result<Vec<Value>, EngineError> {
    let path = JsonPath::parse(expr).map_err(|e| EngineError::JsonPath(e.to_string()))?;
    let parsed;
    let doc = match doc {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(v) => {
                parsed = v;
                &parsed
            }
            Err(_) => doc,
        },
        other => other,
    };
    Ok(path.query(doc).all().into_iter().cloned().collect())
}

/// Runs an XPath query over XML or HTML markup.
///
/// Well-formed XML is queried as is. Anything else goes through an HTML5
/// parser first, which repairs unclosed and implied tags the way a browser
/// does. Node sets yield the string value of each node in document order;
/// scalar results yield a single element.
pub fn select_markup(markup: &str, expr: &str) -> Result<Vec<Value>, EngineError> {
    let package = match sxd_document::parser::parse(markup) {
        Ok(package) => package,
        Err(e) => {
            tracing::debug!(error = ?e, "not well-formed XML, parsing as HTML");
            html_package(markup)
        }
    };
    let document = package.as_document();
    let value = sxd_xpath::evaluate_xpath(&document, expr).map_err(|e| EngineError::XPath(format!("{e:?}")))?;
    Ok(match value {
        sxd_xpath::Value::Nodeset(nodes) => nodes
            .document_order()
            .into_iter()
            .map(|n| Value::String(n.string_value()))
            .collect(),
        sxd_xpath::Value::Boolean(b) => vec![Value::Bool(b)],
        sxd_xpath::Value::Number(n) => vec![Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)],
        sxd_xpath::Value::String(s) => vec![Value::String(s)],
    })
}

/// Parses HTML and rebuilds the tree as an XPath-queryable document.
///
/// Elements and attributes keep their local names without a namespace, so
/// `//p` matches HTML paragraphs. Doctypes are dropped.
fn html_package(markup: &str) -> Package {
    let dom = parse_document(RcDom::default(), Default::default()).one(markup);
    let package = Package::new();
    {
        let document = package.as_document();
        for child in dom.document.children.borrow().iter() {
            match &child.data {
                NodeData::Element { name, attrs, .. } => {
                    let element = html_element(&document, &name.local, &attrs.borrow());
                    document.root().append_child(element);
                    graft(&document, element, child);
                }
                NodeData::Comment { contents } => {
                    document.root().append_child(document.create_comment(contents));
                }
                _ => {}
            }
        }
    }
    package
}

fn html_element<'d>(document: &Document<'d>, name: &str, attrs: &[Attribute]) -> Element<'d> {
    let element = document.create_element(name);
    for attr in attrs {
        element.set_attribute_value(&*attr.name.local, &attr.value);
    }
    element
}

fn graft<'d>(document: &Document<'d>, parent: Element<'d>, handle: &Handle) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Element { name, attrs, .. } => {
                let element = html_element(document, &name.local, &attrs.borrow());
                parent.append_child(element);
                graft(document, element, child);
            }
            NodeData::Text { contents } => parent.append_child(document.create_text(&contents.borrow())),
            NodeData::Comment { contents } => parent.append_child(document.create_comment(contents)),
            _ => {}
        }
    }
}

fn jpath_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, _depth: usize) -> CommandResult {
    let Extraction { source, expr, dest } = extraction(node)?;
    let matches = select_json(ctx.vars.get(source).unwrap_or(&Value::Null), expr)?;
    tracing::debug!(source, dest, count = matches.len(), "jpath extracted");
    ctx.vars.set(dest, Value::Array(matches));
    Ok(None)
}

fn xpath_cmd(node: &CommandNode<'_>, ctx: &mut ExecCtx<'_>, _depth: usize) -> CommandResult {
    let Extraction { source, expr, dest } = extraction(node)?;
    let matches = match ctx.vars.get(source) {
        Some(Value::String(markup)) => select_markup(markup, expr)?,
        Some(_) => return Err(EngineError::config(format!("xpath source `{source}` is not a string"))),
        None => return Err(EngineError::config(format!("xpath source `{source}` is not defined"))),
    };
    tracing::debug!(source, dest, count = matches.len(), "xpath extracted");
    ctx.vars.set(dest, Value::Array(matches));
    Ok(None)
}

pub fn commands() -> Vec<(&'static str, Handler)> {
    vec![
        (super::CMD_JPATH, Arc::new(jpath_cmd) as Handler),
        (super::CMD_XPATH, Arc::new(xpath_cmd) as Handler),
    ]
}
