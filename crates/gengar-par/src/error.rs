//! The parser's half of the error taxonomy in spec.md §7.

use gengar_lex::LexError;
use gengar_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {actual:?} at {line}:{col}")]
    UnexpectedToken { expected: String, actual: String, span: Span, line: u32, col: u32 },

    #[error("{message} at {line}:{col}")]
    Structural { message: String, span: Span, line: u32, col: u32 },
}

impl ParseError {
    pub fn unexpected(expected: impl Into<String>, actual: impl Into<String>, span: Span) -> Self {
        Self::UnexpectedToken { expected: expected.into(), actual: actual.into(), line: span.line, col: span.col, span }
    }

    pub fn structural(message: impl Into<String>, span: Span) -> Self {
        Self::Structural { message: message.into(), line: span.line, col: span.col, span }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span(),
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::Structural { span, .. } => *span,
        }
    }
}
