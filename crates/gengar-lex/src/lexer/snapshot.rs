//! The single-slot snapshot backing [`super::Lexer::save`] /
//! [`super::Lexer::backtrack`].
//!
//! spec.md §4.2 is explicit that this is a *single* slot: "a second
//! `Save` overwrites", and `BackTracking` without a prior `Save` is an
//! error. Modeling the snapshot as an owned, immutable value returned
//! by `save` (rather than a mutable field buried in the lexer) keeps
//! that single-slot rule visible at the call site instead of hidden
//! inside the lexer, per the re-architecture note in spec.md §9.

use crate::cursor::CursorSnapshot;
use crate::token::Token;

#[derive(Clone, Debug)]
pub struct LexerSnapshot {
    pub(super) cursor: CursorSnapshot,
    pub(super) current: Option<Token>,
}
