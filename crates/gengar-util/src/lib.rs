//! gengar-util - Shared foundation types for the gengar compiler.
//!
//! Every other crate in this workspace (`gengar-lex`, `gengar-par`,
//! `gengar-emit`, `gengar-drv`) depends on this crate for source
//! position tracking (`span`), identifier interning (`symbol`), and
//! diagnostic reporting (`diagnostic`). None of these types are tied to
//! a specific compiler phase, which is why they live here instead of
//! in the crate that happens to use them first.

pub mod diagnostic;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;
