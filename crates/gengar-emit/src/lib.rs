//! gengar-emit - Walks a [`gengar_par::ast::Program`] and produces
//! target-language source text plus a Source Map v3 document.
//!
//! [`node::Emit`] carries the per-node text-emission rules; [`fragment`]
//! is the tree the emitters build into; [`sourcemap_adapter`] turns a
//! flattened [`fragment::Fragment`] into a real source map via the
//! `sourcemap` crate.

mod error;
mod fragment;
mod node;
mod sourcemap_adapter;

pub use error::EmitError;
pub use fragment::{Fragment, Origin};
pub use node::Emit;
pub use sourcemap_adapter::{emit_program, EmitOutput};
