use crate::signal::Signal;
use thiserror::Error;

/// Everything a script run can fail with.
///
/// Control signals share this channel; groups intercept [`EngineError::Signal`].
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{json5} | {json}")]
    Load { json5: String, json: String },

    #[error("{0}")]
    Config(String),

    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{0} requested")]
    Signal(Signal),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error("jsonpath: {0}")]
    JsonPath(String),

    #[error("xpath: {0}")]
    XPath(String),

    #[error("decode: {0}")]
    Decode(String),
}

impl EngineError {
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::Config(msg.into())
    }

    /// Returns the control signal carried by this error, if any.
    pub fn signal(&self) -> Option<Signal> {
        match self {
            EngineError::Signal(s) => Some(*s),
            _ => None,
        }
    }

    pub fn is_rerun(&self) -> bool {
        self.signal() == Some(Signal::Rerun)
    }

    pub fn is_break(&self) -> bool {
        self.signal() == Some(Signal::Break)
    }
}

impl From<Signal> for EngineError {
    fn from(s: Signal) -> Self {
        EngineError::Signal(s)
    }
}
