//! Fluent construction of [`Diagnostic`]s, including a rendered source
//! snippet so a fatal error prints with the offending line highlighted
//! instead of a bare message.

use super::{Diagnostic, Level};
use crate::{SourceMap, Span};

pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Option<Span>,
    help: Option<String>,
}

impl DiagnosticBuilder {
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: Level::Error, message: message.into(), span: None, help: None }
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic { level: self.level, message: self.message, span: self.span, help: self.help }
    }

    /// Builds the diagnostic and immediately records it on `handler`.
    pub fn emit(self, handler: &mut super::Handler) {
        handler.record(self.build());
    }
}

/// Renders a diagnostic's message plus a one-line source snippet with a
/// `^` caret under the offending span, in the style most compiler CLIs
/// use for a single fatal error.
pub fn render(diag: &Diagnostic, sources: &SourceMap) -> String {
    let mut out = format!("{}: {}", diag.level, diag.message);

    if let Some(span) = diag.span {
        if let Some(file) = sources.get(span.file_id) {
            if let Some(line_text) = file.line_text(span.line) {
                out.push_str(&format!("\n  --> {}:{}:{}\n", file.name(), span.line, span.col));
                out.push_str(&format!("   |\n{:>3}| {}\n   |", span.line, line_text));
                out.push_str(&" ".repeat(span.col as usize + 1));
                let width = span.len().max(1);
                out.push_str(&"^".repeat(width));
            }
        }
    }

    if let Some(help) = &diag.help {
        out.push_str(&format!("\nhelp: {}", help));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_message_and_caret() {
        let mut sources = SourceMap::new();
        let file_id = sources.add_file("t.gengar", "main() { x }");
        let span = Span::with_file(9, 10, file_id, 1, 9);
        let diag = DiagnosticBuilder::error("unexpected identifier").span(span).build();
        let rendered = render(&diag, &sources);
        assert!(rendered.contains("unexpected identifier"));
        assert!(rendered.contains("^"));
    }
}
