//! Engine-level settings.
//!
//! Every field has a default, so a partial document (or none at all) is a
//! valid configuration. Per-command arguments such as a `read` node's
//! `encoding` take precedence over these defaults.

use crate::encoding::DEFAULT_ENCODING;
use serde::{Deserialize, Serialize};

/// What a `break` does once raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakMode {
    /// Not caught by any group: the whole run stops and `run()` returns the
    /// signal as an error.
    #[default]
    Propagate,
    /// Caught by the nearest enclosing group, which stops iterating.
    Block,
}

/// Template delimiters used by [`Vars::substitute`](crate::vars::Vars::substitute).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delimiters {
    pub prefix: String,
    pub suffix: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters {
            prefix: "$%".to_string(),
            suffix: "%$".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Encoding used by `read`/`write`/`append` when a node does not name one.
    pub data_encoding: String,
    pub break_mode: BreakMode,
    /// Report unregistered commands instead of skipping them.
    pub strict: bool,
    pub delimiters: Delimiters,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_encoding: DEFAULT_ENCODING.to_string(),
            break_mode: BreakMode::default(),
            strict: false,
            delimiters: Delimiters::default(),
        }
    }
}
