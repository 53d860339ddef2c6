//! `tiny-engine`: run a script file.
//!
//! Usage:
//!   tiny-engine <script> ['<vars>']
//!
//! `<vars>` is an optional JSON5/JSON object seeding the variable store. The
//! final store is printed as JSON on stdout. Set `RUST_LOG=info` to see
//! `msg`/`print` output.

use std::io::{self, Write};
use std::process::ExitCode;
use tiny_engine::{parse_script, Engine, EngineError, Vars};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn run(args: &[String]) -> Result<String, EngineError> {
    let path = args
        .get(1)
        .ok_or_else(|| EngineError::config("First argument must be a script file."))?;
    let mut engine = Engine::from_file(path, None)?;
    if let Some(seed) = args.get(2) {
        let serde_json::Value::Object(seed) = parse_script(seed)? else {
            return Err(EngineError::config("Second argument must be a JSON object."));
        };
        engine = engine.with_vars(Vars::from(seed));
    }
    engine.run()?;
    Ok(engine.vars().to_value().to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(out) => {
            let mut stdout = io::stdout();
            if writeln!(stdout, "{out}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
