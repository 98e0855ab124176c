//! String interning for identifiers, keywords, and type-annotation names.
//!
//! A [`Symbol`] is a 4-byte handle into a global, thread-safe string
//! table. Tokens and AST nodes carry a `Symbol` instead of an owned
//! `String`, so comparing two identifiers is an integer comparison
//! rather than a byte-by-byte one.

mod interner;

/// A compact, interned string handle.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Self {
        interner::intern(s)
    }

    pub fn as_str(&self) -> &'static str {
        interner::resolve(*self)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}
