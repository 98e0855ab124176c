//! gengar-lex - The gengar lexer: turns source text into a stream of
//! [`Token`]s with line/column tracking and single-slot backtracking.
//!
//! See [`Lexer`] for the public surface callers use; `gengar-par`
//! drives this crate directly and never reaches into `cursor` or
//! `lexer::matcher`.

mod cursor;
pub mod error;
mod lexer;
mod token;

pub use cursor::{Cursor, CursorSnapshot};
pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
