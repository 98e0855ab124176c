//! Diagnostic reporting infrastructure shared by the lexer, parser, and
//! emitter. Per spec.md §7, there is never more than one fatal
//! diagnostic in a compilation: the [`Handler`] exists so callers have
//! one place to *render* that diagnostic against the source map, not
//! to accumulate a list of them.

mod builder;
mod level;

pub use builder::{render, DiagnosticBuilder};
pub use level::Level;

use crate::Span;

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self { level: Level::Error, message: message.into(), span: Some(span), help: None }
    }
}

/// Collects at most one diagnostic during a compilation phase.
///
/// Lexing and parsing stop at the first error (spec.md §7: "no
/// recovery after a parse error"), so `Handler` only ever needs to
/// remember that single diagnostic long enough for the CLI to render
/// it against the source map.
#[derive(Default)]
pub struct Handler {
    first_error: Option<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self { first_error: None }
    }

    pub fn record(&mut self, diag: Diagnostic) {
        if self.first_error.is_none() {
            self.first_error = Some(diag);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.first_error.is_some()
    }

    pub fn take_first(&mut self) -> Option<Diagnostic> {
        self.first_error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_keeps_only_the_first_diagnostic() {
        let mut handler = Handler::new();
        handler.record(Diagnostic::error("first", Span::DUMMY));
        handler.record(Diagnostic::error("second", Span::DUMMY));
        let first = handler.take_first().unwrap();
        assert_eq!(first.message, "first");
        assert!(!handler.has_errors());
    }
}
