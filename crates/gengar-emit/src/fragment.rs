//! [`Fragment`]: the ordered tree of text chunks spec.md §4.5 and §6
//! use as the currency of emission. Every leaf carries the source
//! position it came from (or none, for synthetic text like the prelude
//! or punctuation the parser never saw as its own token); flattening
//! the tree in order yields both the emitted code and the data the
//! `sourcemap` adapter needs to build a source map.

use gengar_util::Span;

/// The `(line, col)` half of a fragment's origin. `file` lives at the
/// `gengar-drv` level, where a single [`gengar_util::SourceMap`]
/// already knows which file is being compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub line: u32,
    pub col: u32,
}

impl From<Span> for Origin {
    fn from(span: Span) -> Self {
        Origin { line: span.line, col: span.col }
    }
}

#[derive(Debug, Clone)]
enum Chunk {
    Text { text: String, origin: Option<Origin> },
    Child(Fragment),
}

#[derive(Debug, Clone, Default)]
pub struct Fragment {
    chunks: Vec<Chunk>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text with no source origin — prelude boilerplate, punctuation
    /// the grammar inserts rather than copies from a token.
    pub fn synthetic(text: impl Into<String>) -> Self {
        Self { chunks: vec![Chunk::Text { text: text.into(), origin: None }] }
    }

    /// Text attributed to the given span's start position.
    pub fn at(span: Span, text: impl Into<String>) -> Self {
        Self { chunks: vec![Chunk::Text { text: text.into(), origin: Some(Origin::from(span)) } ] }
    }

    pub fn push(&mut self, child: Fragment) -> &mut Self {
        self.chunks.push(Chunk::Child(child));
        self
    }

    pub fn push_synthetic(&mut self, text: impl Into<String>) -> &mut Self {
        self.chunks.push(Chunk::Text { text: text.into(), origin: None });
        self
    }

    pub fn concat(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let mut out = Fragment::new();
        for fragment in fragments {
            out.push(fragment);
        }
        out
    }

    /// Depth-first, left-to-right `(origin, text)` pairs.
    pub fn flatten(&self) -> Vec<(Option<Origin>, &str)> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<(Option<Origin>, &'a str)>) {
        for chunk in &self.chunks {
            match chunk {
                Chunk::Text { text, origin } => out.push((*origin, text.as_str())),
                Chunk::Child(fragment) => fragment.flatten_into(out),
            }
        }
    }

    pub fn to_code(&self) -> String {
        self.flatten().into_iter().map(|(_, text)| text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_preserves_order() {
        let f = Fragment::concat([Fragment::synthetic("a"), Fragment::synthetic("b"), Fragment::synthetic("c")]);
        assert_eq!(f.to_code(), "abc");
    }

    #[test]
    fn nested_fragments_flatten_depth_first() {
        let mut outer = Fragment::new();
        outer.push(Fragment::synthetic("{"));
        let mut inner = Fragment::new();
        inner.push(Fragment::synthetic("x"));
        inner.push(Fragment::synthetic("y"));
        outer.push(inner);
        outer.push(Fragment::synthetic("}"));
        assert_eq!(outer.to_code(), "{xy}");
    }

    #[test]
    fn synthetic_text_has_no_origin() {
        let f = Fragment::synthetic("abc");
        let pieces = f.flatten();
        assert_eq!(pieces.len(), 1);
        assert!(pieces[0].0.is_none());
    }

    #[test]
    fn at_attributes_origin_from_span() {
        let span = Span::new(0, 3, 4, 2);
        let f = Fragment::at(span, "foo");
        let pieces = f.flatten();
        assert_eq!(pieces[0].0, Some(Origin { line: 4, col: 2 }));
    }
}
