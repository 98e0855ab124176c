//! Bridges [`fragment::Fragment`] to the `sourcemap` crate. Flattening a
//! fragment tree gives an ordered sequence of `(origin, text)` pairs;
//! this module walks that sequence character by character, tracking the
//! destination line/col as it goes, and adds a token everywhere a chunk
//! carries a source origin.

use sourcemap::SourceMapBuilder;

use crate::fragment::Fragment;

/// The two artifacts a compilation produces: the emitted code and its
/// Source Map v3 document, serialized as JSON text.
pub struct EmitOutput {
    pub code: String,
    pub source_map_json: String,
}

/// Flattens `fragment`, builds the output string, and maps every
/// origin-carrying chunk back to its source position in `source_name`.
pub fn emit_program(fragment: &Fragment, source_name: &str) -> EmitOutput {
    tracing::debug!(source = source_name, "emission started");
    let mut builder = SourceMapBuilder::new(None);
    let src_id = builder.add_source(source_name);

    let mut code = String::new();
    let mut dst_line: u32 = 0;
    let mut dst_col: u32 = 0;
    let mut tokens_added: u32 = 0;

    for (origin, text) in fragment.flatten() {
        if let Some(origin) = origin {
            builder.add(dst_line, dst_col, origin.line.saturating_sub(1), origin.col, Some(source_name), None, false);
            tokens_added += 1;
        }
        tracing::trace!(chunk_len = text.len(), has_origin = origin.is_some(), "emitted chunk");
        for ch in text.chars() {
            code.push(ch);
            if ch == '\n' {
                dst_line += 1;
                dst_col = 0;
            } else {
                dst_col += 1;
            }
        }
    }

    let _ = src_id;
    let map = builder.into_sourcemap();
    let mut buf = Vec::new();
    map.to_writer(&mut buf).expect("source map serializes to valid UTF-8 JSON");
    let source_map_json = String::from_utf8(buf).expect("sourcemap writer emits UTF-8");

    tracing::debug!(bytes = code.len(), mapped_tokens = tokens_added, "emission finished");
    EmitOutput { code, source_map_json }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Fragment;

    #[test]
    fn emits_code_matching_flattened_text() {
        let mut f = Fragment::new();
        f.push(Fragment::synthetic("a"));
        f.push(Fragment::synthetic("b\n"));
        f.push(Fragment::synthetic("c"));
        let out = emit_program(&f, "t.gengar");
        assert_eq!(out.code, "ab\nc");
        assert!(out.source_map_json.contains("\"version\""));
    }

    #[test]
    fn empty_fragment_yields_empty_code_and_valid_map() {
        let f = Fragment::new();
        let out = emit_program(&f, "t.gengar");
        assert_eq!(out.code, "");
        assert!(out.source_map_json.contains("\"sources\""));
    }
}
