mod core;
mod matcher;
mod snapshot;

pub use self::core::Lexer;
pub use matcher::{next_match, Match};
