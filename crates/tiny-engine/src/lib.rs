//! A small embeddable scripting engine whose scripts are JSON/JSON5 data.
//!
//! # Overview
//!
//! A script is a JSON array of nodes. A node `[command, args?, sub?]` with a
//! string command is dispatched to the handler registered under that name; a
//! node whose first element is not a string is a group whose elements run in
//! order. Handlers read and write a shared variable store, produce output,
//! touch files, or raise the `rerun`/`break` control signals.
//!
//! # Example
//!
//! ```
//! use tiny_engine::{Engine, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let mut engine: Engine = r#"[
//!     ['vars', { a: 1, name: 'world' }],
//!     ['assert', 'a', ['msg', 'ok']],
//!     ['print', 'name'],
//! ]"#
//! .parse()
//! .unwrap();
//! engine = engine.with_sink(sink.clone());
//! engine.run().unwrap();
//!
//! assert_eq!(sink.lines(), vec!["ok", "name -> \"world\""]);
//! ```

pub mod commands;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod exec_ctx;
pub mod execute;
pub mod load;
pub mod node;
pub mod predicates;
pub mod registry;
pub mod settings;
pub mod signal;
pub mod sink;
pub mod util;
pub mod vars;

pub use commands::builtin_registry;
pub use encoding::Encoding;
pub use engine::{Engine, EngineOptions, ScriptSource};
pub use error::EngineError;
pub use exec_ctx::{Callback, ExecCtx};
pub use execute::execute;
pub use load::parse_script;
pub use node::{CommandNode, Node};
pub use predicates::{PredicateFn, PredicateRegistry};
pub use registry::{CommandRegistry, CommandResult, Handler, HandlerFn};
pub use settings::{BreakMode, Delimiters, Settings};
pub use signal::Signal;
pub use sink::{MemorySink, Sink, TracingSink};
pub use vars::Vars;
