use crate::commands::builtin_registry;
use crate::error::EngineError;
use crate::exec_ctx::{Callback, ExecCtx};
use crate::load::{parse_script, read_script};
use crate::node::CommandNode;
use crate::predicates::PredicateRegistry;
use crate::registry::{CommandRegistry, CommandResult, Handler};
use crate::settings::Settings;
use crate::sink::{Sink, TracingSink};
use crate::vars::Vars;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Where the script comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptSource {
    /// A JSON5/JSON file read with `encoding` (UTF-8 when `None`).
    File { path: PathBuf, encoding: Option<String> },
    /// Inline JSON5/JSON text.
    Text(String),
    /// An already parsed node tree.
    Value(Value),
}

/// Construction-time options for [`Engine`].
pub struct EngineOptions {
    pub source: ScriptSource,
    pub settings: Settings,
    pub callback: Option<Arc<Callback>>,
    /// Pre-populated store. A fresh empty store is used when `None`.
    pub vars: Option<Vars>,
    /// Output for `msg`/`print`. Defaults to [`TracingSink`].
    pub sink: Option<Arc<dyn Sink>>,
}

impl EngineOptions {
    pub fn new(source: ScriptSource) -> Self {
        EngineOptions {
            source,
            settings: Settings::default(),
            callback: None,
            vars: None,
            sink: None,
        }
    }
}

/// A loaded script together with everything needed to run it.
///
/// The variable store lives as long as the engine; repeated runs see the
/// state left behind by earlier ones.
pub struct Engine {
    script: Value,
    vars: Vars,
    commands: Arc<CommandRegistry>,
    predicates: Arc<PredicateRegistry>,
    settings: Settings,
    callback: Option<Arc<Callback>>,
    sink: Arc<dyn Sink>,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Result<Self, EngineError> {
        let EngineOptions {
            source,
            settings,
            callback,
            vars,
            sink,
        } = options;
        let script = match source {
            ScriptSource::File { path, encoding } => read_script(&path, encoding.as_deref())?,
            ScriptSource::Text(text) => parse_script(&text)?,
            ScriptSource::Value(script) => script,
        };
        Ok(Engine::assemble(script, settings, callback, vars, sink))
    }

    pub fn from_file(path: impl AsRef<Path>, encoding: Option<&str>) -> Result<Self, EngineError> {
        Engine::new(EngineOptions::new(ScriptSource::File {
            path: path.as_ref().to_path_buf(),
            encoding: encoding.map(str::to_string),
        }))
    }

    /// Wraps an already parsed script with the [`EngineOptions`] defaults.
    pub fn from_value(script: Value) -> Self {
        let defaults = EngineOptions::new(ScriptSource::Value(Value::Null));
        Engine::assemble(script, defaults.settings, defaults.callback, defaults.vars, defaults.sink)
    }

    fn assemble(
        script: Value,
        settings: Settings,
        callback: Option<Arc<Callback>>,
        vars: Option<Vars>,
        sink: Option<Arc<dyn Sink>>,
    ) -> Self {
        let commands = builtin_registry();
        tracing::debug!(commands = commands.len(), "engine loaded");
        Engine {
            script,
            vars: vars.unwrap_or_default(),
            commands: Arc::new(commands),
            predicates: Arc::new(PredicateRegistry::default()),
            settings,
            callback,
            sink: sink.unwrap_or_else(|| Arc::new(TracingSink)),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub fn with_vars(mut self, vars: Vars) -> Self {
        self.vars = vars;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    /// Adds or replaces a command.
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&CommandNode<'_>, &mut ExecCtx<'_>, usize) -> CommandResult + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.commands).register(name, handler);
    }

    pub fn register_many<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, Handler)>,
        S: AsRef<str>,
    {
        Arc::make_mut(&mut self.commands).register_many(entries);
    }

    /// Adds or replaces an `assert` predicate. New names go last in the
    /// preference order.
    pub fn register_predicate<F>(&mut self, name: &str, predicate: F)
    where
        F: Fn(Option<&Value>, &Value) -> Result<bool, EngineError> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.predicates).register(name, predicate);
    }

    /// Runs the loaded script from the top.
    pub fn run(&mut self) -> CommandResult {
        let script = std::mem::take(&mut self.script);
        let result = self.run_node(&script);
        self.script = script;
        result
    }

    /// Runs an arbitrary node at depth 0 against this engine's store.
    pub fn run_node(&mut self, node: &Value) -> CommandResult {
        let mut ctx = ExecCtx {
            vars: &mut self.vars,
            commands: Arc::clone(&self.commands),
            predicates: Arc::clone(&self.predicates),
            settings: &self.settings,
            callback: self.callback.as_deref(),
            sink: &*self.sink,
        };
        ctx.execute(node, 0)
    }

    pub fn script(&self) -> &Value {
        &self.script
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut Vars {
        &mut self.vars
    }

    pub fn into_vars(self) -> Vars {
        self.vars
    }
}

impl FromStr for Engine {
    type Err = EngineError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Engine::new(EngineOptions::new(ScriptSource::Text(text.to_string())))
    }
}
