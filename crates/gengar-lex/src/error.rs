//! The lexer's half of the error taxonomy in spec.md §7.

use gengar_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no token pattern matches at {line}:{col} (near {preview:?})")]
pub struct LexError {
    pub position: usize,
    pub line: u32,
    pub col: u32,
    pub preview: String,
}

impl LexError {
    pub fn at(position: usize, line: u32, col: u32, preview: impl Into<String>) -> Self {
        Self { position, line, col, preview: preview.into() }
    }

    pub fn span(&self) -> Span {
        Span::point(self.position, self.line, self.col)
    }
}
