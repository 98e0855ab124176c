//! A [`SourceMap`] owns the text of every file involved in a
//! compilation and can translate a byte offset back into a
//! line/column pair, independent of the lexer that originally produced
//! the offset. The CLI driver only ever loads a single file today, but
//! keeping this keyed by [`FileId`] means a future multi-file driver
//! does not need to touch `gengar-lex` or `gengar-par`.

use std::sync::Arc;

use super::FileId;

/// The content of one source file, plus precomputed line-start offsets
/// so that byte-offset-to-line/column lookups are `O(log n)` instead of
/// rescanning the file on every diagnostic.
#[derive(Clone)]
pub struct SourceFile {
    id: FileId,
    name: Arc<str>,
    content: Arc<str>,
    line_starts: Arc<[usize]>,
}

impl SourceFile {
    pub fn new(id: FileId, name: impl Into<Arc<str>>, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = Self::compute_line_starts(&content);
        Self { id, name: name.into(), content, line_starts }
    }

    fn compute_line_starts(content: &str) -> Arc<[usize]> {
        let mut starts = vec![0];
        starts.extend(content.match_indices('\n').map(|(i, _)| i + 1));
        starts.into()
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Converts a byte offset into a 1-based line and 0-based column,
    /// matching the position convention spec.md uses for the lexer.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let col = self.content[line_start..offset.min(self.content.len())]
            .chars()
            .count();
        (line_idx as u32 + 1, col as u32)
    }

    /// Returns the text of a single line (without its trailing newline),
    /// used when rendering a source snippet in a diagnostic.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let idx = (line.checked_sub(1))? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(self.content.len());
        Some(&self.content[start..end])
    }
}

/// Owns every [`SourceFile`] loaded during a compilation.
#[derive(Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    pub fn add_file(&mut self, name: impl Into<Arc<str>>, content: impl Into<Arc<str>>) -> FileId {
        let id = FileId(self.files.len());
        self.files.push(SourceFile::new(id, name, content));
        id
    }

    pub fn get(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_first_line() {
        let file = SourceFile::new(FileId(0), "t.gengar", "main() {\n}\n");
        assert_eq!(file.line_col(0), (1, 0));
        assert_eq!(file.line_col(5), (1, 5));
    }

    #[test]
    fn line_col_second_line() {
        let file = SourceFile::new(FileId(0), "t.gengar", "main() {\n  return 1;\n}\n");
        let (line, col) = file.line_col(11);
        assert_eq!(line, 2);
        assert_eq!(col, 2);
    }

    #[test]
    fn line_text_roundtrip() {
        let file = SourceFile::new(FileId(0), "t.gengar", "a\nbb\nccc");
        assert_eq!(file.line_text(1), Some("a"));
        assert_eq!(file.line_text(2), Some("bb"));
        assert_eq!(file.line_text(3), Some("ccc"));
        assert_eq!(file.line_text(4), None);
    }

    #[test]
    fn add_file_assigns_sequential_ids() {
        let mut sm = SourceMap::new();
        let a = sm.add_file("a.gengar", "main() {}");
        let b = sm.add_file("b.gengar", "fn f() {}");
        assert_eq!(a, FileId(0));
        assert_eq!(b, FileId(1));
        assert_eq!(sm.get(a).unwrap().name(), "a.gengar");
    }
}
