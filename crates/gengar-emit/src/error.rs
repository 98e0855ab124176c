//! The emitter's half of the error taxonomy in spec.md §7: AST
//! invariants that held at parse time but must be rechecked before
//! emission, since `BinaryExpression::left` and
//! `ConditionalExpression::test` are `Option` slots the parser
//! back-patches rather than always-initialized fields.

use gengar_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("binary expression at {span:?} has no left operand")]
    MissingBinaryLeft { span: Span },

    #[error("conditional expression at {span:?} has no test")]
    MissingConditionalTest { span: Span },
}

impl EmitError {
    pub fn span(&self) -> Span {
        match self {
            EmitError::MissingBinaryLeft { span } => *span,
            EmitError::MissingConditionalTest { span } => *span,
        }
    }
}
