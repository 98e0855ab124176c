//! Global string interner backing [`super::Symbol`].
//!
//! Identifiers and keywords are interned once and compared by index
//! from then on, the same tradeoff the rest of the pipeline makes for
//! any value that is created once during lexing and then compared many
//! times during parsing and emission.

use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use once_cell::sync::Lazy;

use super::Symbol;

struct Interner {
    // Maps an interned string to its symbol index.
    index: DashMap<&'static str, u32>,
    // Reverse lookup: symbol index -> interned string. Indices are only
    // ever appended to, so existing entries never move.
    strings: DashMap<u32, &'static str>,
    next: AtomicU32,
}

impl Interner {
    fn new() -> Self {
        Self {
            index: DashMap::new(),
            strings: DashMap::new(),
            next: AtomicU32::new(0),
        }
    }

    fn intern(&self, s: &str) -> Symbol {
        if let Some(existing) = self.index.get(s) {
            return Symbol(*existing);
        }

        // Leak once per unique string; the interner lives for the whole
        // process so this is bounded by the number of distinct
        // identifiers/keywords in the source file.
        let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        self.index.insert(leaked, id);
        self.strings.insert(id, leaked);
        Symbol(id)
    }

    fn resolve(&self, sym: Symbol) -> &'static str {
        *self
            .strings
            .get(&sym.0)
            .expect("Symbol was not produced by this interner")
    }
}

pub(super) static STRING_TABLE: Lazy<Interner> = Lazy::new(Interner::new);

pub(super) fn intern(s: &str) -> Symbol {
    STRING_TABLE.intern(s)
}

pub(super) fn resolve(sym: Symbol) -> &'static str {
    STRING_TABLE.resolve(sym)
}

#[cfg(test)]
mod tests {
    use super::super::Symbol;

    #[test]
    fn same_string_interns_to_same_symbol() {
        let a = Symbol::intern("gengar_test_same");
        let b = Symbol::intern("gengar_test_same");
        assert_eq!(a, b);
    }

    #[test]
    fn different_strings_intern_differently() {
        let a = Symbol::intern("gengar_test_diff_a");
        let b = Symbol::intern("gengar_test_diff_b");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_roundtrips() {
        let sym = Symbol::intern("gengar_test_roundtrip");
        assert_eq!(sym.as_str(), "gengar_test_roundtrip");
    }
}
