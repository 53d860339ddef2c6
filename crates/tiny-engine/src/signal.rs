//! Non-local exits raised by the `rerun` and `break` commands.

use std::fmt;

/// A control signal. Carries no value.
///
/// `Rerun` is always caught by the nearest enclosing group, which restarts
/// from its first element. `Break` is only caught when
/// [`BreakMode::Block`](crate::settings::BreakMode) is configured; otherwise
/// it unwinds to the caller of `run()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Rerun,
    Break,
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Rerun => "rerun",
            Signal::Break => "break",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
