//! gengar-drv - Compiler Driver
//!
//! The driver is the thin layer that owns a single compilation: it reads
//! source text into a [`gengar_util::SourceMap`], drives the
//! lex-via-parse pipeline (`gengar-lex` is only ever reached through
//! `gengar-par`, which owns its own `Lexer`), and hands the resulting
//! AST to `gengar-emit`. `cli` is the only crate that constructs a
//! [`Session`] from process arguments; everything here is plain library
//! code so the pipeline can also be driven from tests.
//!
//! ```text
//! source text
//!      |
//!      v
//! [gengar-par::parse_source] --> Program
//!      |
//!      v
//! [gengar-emit::emit_program] --> (code, source map)
//! ```

use std::path::{Path, PathBuf};

use gengar_emit::{EmitError, Emit};
use gengar_par::ParseError;
use gengar_util::diagnostic::{render, DiagnosticBuilder, Handler};
use gengar_util::{SourceMap, Span};
use thiserror::Error;

/// Options controlling a single compilation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the `.gengar` source file to compile.
    pub input_file: PathBuf,

    /// Where to write the emitted code. Defaults to `input_file` with
    /// its extension replaced by `.js`.
    pub output_file: Option<PathBuf>,

    /// Whether to also write a `.js.map` file alongside the output and
    /// append a `sourceMappingURL` comment to it.
    pub emit_source_map: bool,
}

impl Config {
    pub fn new(input_file: impl Into<PathBuf>) -> Self {
        Self { input_file: input_file.into(), output_file: None, emit_source_map: true }
    }

    /// The path the compiled code is written to.
    pub fn resolved_output_file(&self) -> PathBuf {
        self.output_file.clone().unwrap_or_else(|| self.input_file.with_extension("js"))
    }
}

/// Errors that can end a compilation, whichever phase they came from.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl CompileError {
    /// The span to point at when rendering this error, if the phase
    /// that raised it had one. `Io` errors (a missing or unreadable
    /// file) have no position in the source to point at.
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Io { .. } => None,
            CompileError::Parse(e) => Some(e.span()),
            CompileError::Emit(e) => Some(e.span()),
        }
    }
}

/// Renders `err` the way spec.md §7 describes the CLI's single fatal
/// diagnostic: the message, plus a source snippet with a caret under
/// the offending span when one is available. Routed through
/// [`Handler`] even though only one error is ever recorded, so the
/// rendering path matches the one `gengar-lex`/`gengar-par` would use
/// if they grew multi-error recovery later.
pub fn render_error(err: &CompileError, sources: &SourceMap) -> String {
    let mut handler = Handler::new();
    let mut builder = DiagnosticBuilder::error(err.to_string());
    if let Some(span) = err.span() {
        builder = builder.span(span);
    }
    builder.emit(&mut handler);
    let diag = handler.take_first().expect("just emitted one diagnostic");
    render(&diag, sources)
}

/// The artifacts a successful compilation produces.
#[derive(Debug)]
pub struct CompileOutput {
    pub code: String,
    pub source_map_json: Option<String>,
}

/// Owns the state of one compilation: the config, the loaded source
/// text, and the source map used to resolve spans back to line/column
/// pairs in diagnostics.
pub struct Session {
    pub config: Config,
    pub sources: SourceMap,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config, sources: SourceMap::new() }
    }

    /// Runs the full pipeline: read, parse, emit.
    pub fn compile(&mut self) -> Result<CompileOutput, CompileError> {
        tracing::debug!(file = %self.config.input_file.display(), "reading source");

        let content = std::fs::read_to_string(&self.config.input_file)
            .map_err(|e| CompileError::Io { path: self.config.input_file.clone(), source: e })?;

        let source_name = file_name_for_map(&self.config.input_file);
        let file_id = self.sources.add_file(source_name.clone(), content.clone());

        let program = gengar_par::parse_source(&content, file_id)?;
        let fragment = program.emit()?;

        if self.config.emit_source_map {
            let output = gengar_emit::emit_program(&fragment, &source_name);
            Ok(CompileOutput { code: output.code, source_map_json: Some(output.source_map_json) })
        } else {
            Ok(CompileOutput { code: fragment.to_code(), source_map_json: None })
        }
    }

    /// Runs [`Session::compile`] and writes its output to disk,
    /// appending a `sourceMappingURL` comment per spec.md §6's CLI
    /// contract. Keeping this on `Session` (rather than consuming
    /// `Config` the way [`compile_to_disk`] does) lets a caller hold
    /// onto `self.sources` to render a diagnostic if this returns `Err`.
    pub fn compile_and_write(&mut self) -> Result<PathBuf, CompileError> {
        let output_path = self.config.resolved_output_file();
        let emit_map = self.config.emit_source_map;
        let output = self.compile()?;

        let mut code = output.code;
        if let Some(map_json) = output.source_map_json.filter(|_| emit_map) {
            let map_path = output_path.with_extension("js.map");
            let map_name = file_name_for_map(&map_path);
            code.push_str(&format!("\n//# sourceMappingURL={}\n", map_name));
            std::fs::write(&map_path, map_json).map_err(|e| CompileError::Io { path: map_path, source: e })?;
        }

        std::fs::write(&output_path, code).map_err(|e| CompileError::Io { path: output_path.clone(), source: e })?;
        Ok(output_path)
    }
}

fn file_name_for_map(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| path.display().to_string())
}

/// Runs `config` end to end and writes the outputs to disk. A thin
/// convenience over [`Session::compile_and_write`] for callers (tests,
/// simple tools) that don't need the session afterward; `cli` keeps its
/// own `Session` alive instead, so it can render a diagnostic against
/// `sources` if compilation fails.
pub fn compile_to_disk(config: Config) -> Result<PathBuf, CompileError> {
    Session::new(config).compile_and_write()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_source(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn compiles_hello_world_to_js_and_map() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "hello.gengar", "main() { print(\"hi\"); }");
        let mut session = Session::new(Config::new(input));
        let output = session.compile().expect("compile succeeds");
        assert!(output.code.contains("print"));
        assert!(output.source_map_json.unwrap().contains("\"version\""));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut session = Session::new(Config::new("does/not/exist.gengar"));
        assert!(matches!(session.compile(), Err(CompileError::Io { .. })));
    }

    #[test]
    fn syntax_error_surfaces_as_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "broken.gengar", "main( { }");
        let mut session = Session::new(Config::new(input));
        assert!(matches!(session.compile(), Err(CompileError::Parse(_))));
    }

    #[test]
    fn compile_to_disk_writes_js_and_map_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "hello.gengar", "main() { print(\"hi\"); }");
        let mut config = Config::new(input);
        config.output_file = Some(dir.path().join("hello.js"));
        let output_path = compile_to_disk(config).expect("compile succeeds");
        assert!(output_path.exists());
        assert!(dir.path().join("hello.js.map").exists());
        let code = std::fs::read_to_string(&output_path).unwrap();
        assert!(code.contains("sourceMappingURL"));
    }

    #[test]
    fn render_error_includes_message_and_caret_for_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "broken.gengar", "main( { }");
        let mut session = Session::new(Config::new(input));
        let err = session.compile().unwrap_err();
        let rendered = render_error(&err, &session.sources);
        assert!(rendered.contains("error:"));
        assert!(rendered.contains('^'));
    }

    #[test]
    fn render_error_skips_snippet_for_io_errors() {
        let session = Session::new(Config::new("does/not/exist.gengar"));
        let err = CompileError::Io { path: "does/not/exist.gengar".into(), source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found") };
        let rendered = render_error(&err, &session.sources);
        assert!(rendered.contains("failed to read"));
        assert!(!rendered.contains('^'));
    }
}
