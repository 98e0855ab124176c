//! Diagnostic severity.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Prevents compilation from succeeding.
    Error,
    /// Does not prevent compilation. Unused today — spec.md §7 only
    /// calls for fatal errors — but kept so a future warning (e.g. an
    /// unreachable `else` branch) has somewhere to live without a
    /// breaking change to this enum.
    Warning,
    /// A suggestion attached to a primary diagnostic.
    Help,
}

impl Level {
    pub fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Help => write!(f, "help"),
        }
    }
}
