//! The [`Lexer`]: spec.md §4.2's stateful tokenizer with peek,
//! save/restore, and skip-while/until operations.

use gengar_util::Span;

use super::matcher;
use super::snapshot::LexerSnapshot;
use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    /// The last token returned by `get_token`. `peek` never mutates
    /// this, matching spec.md §3's "`current` is the last token
    /// returned by `GetToken`" invariant.
    current: Option<Token>,
    savepoint: Option<LexerSnapshot>,
    tokens_emitted: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        tracing::debug!(len = source.len(), "lexing started");
        Self { cursor: Cursor::new(source), current: None, savepoint: None, tokens_emitted: 0 }
    }

    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn col(&self) -> u32 {
        self.cursor.col()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Advances one token and updates `current`. Idempotent at EOF:
    /// calling this again after EOF keeps returning `EOF` without
    /// erroring.
    pub fn get_token(&mut self) -> Result<Token, LexError> {
        let token = self.scan_one()?;
        self.tokens_emitted += 1;
        tracing::trace!(kind = ?token.kind, value = %token.value, "scanned token");
        if token.is_eof() {
            tracing::debug!(tokens = self.tokens_emitted, "lexing finished");
        }
        self.current = Some(token.clone());
        Ok(token)
    }

    fn scan_one(&mut self) -> Result<Token, LexError> {
        if self.cursor.is_at_end() {
            return Ok(Token::eof(self.cursor.line(), self.cursor.col()));
        }

        let start_pos = self.cursor.position();
        let start_line = self.cursor.line();
        let start_col = self.cursor.col();
        let rest = self.cursor.remaining();

        let m = matcher::next_match(rest).ok_or_else(|| {
            let preview: String = rest.chars().take(16).collect();
            LexError::at(start_pos, start_line, start_col, preview)
        })?;

        let text = &rest[..m.len];
        let char_count = text.chars().count();
        self.cursor.advance_n(char_count);

        Ok(Token::new(m.kind, text, start_line, start_col))
    }

    /// Returns the next token without advancing observable state, by
    /// snapshotting, scanning once, and restoring — the approach
    /// spec.md §4.2 prescribes for `Peek`.
    pub fn peek(&mut self) -> Result<Token, LexError> {
        let snap = self.cursor.snapshot();
        let token = self.scan_one();
        self.cursor.restore(snap);
        token
    }

    /// `move=false` is a pure `peek().kind == kind` check; `move=true`
    /// advances and reports whether the consumed token matched.
    pub fn expect(&mut self, kind: TokenKind, advance: bool) -> Result<bool, LexError> {
        if advance {
            let token = self.get_token()?;
            Ok(token.kind == kind)
        } else {
            Ok(self.peek()?.kind == kind)
        }
    }

    pub fn skip(&mut self, n: usize) -> Result<(), LexError> {
        for _ in 0..n {
            self.get_token()?;
        }
        Ok(())
    }

    /// Collects tokens while the current kind is in `kinds`. Starts
    /// from `current` if `from_current` and a current token already
    /// exists; otherwise primes with a fresh `get_token`. On return,
    /// `current` is the first non-matching token.
    pub fn skip_of(&mut self, kinds: &[TokenKind], from_current: bool) -> Result<Vec<Token>, LexError> {
        let mut collected = Vec::new();
        let mut tok = if from_current {
            match self.current.clone() {
                Some(t) => t,
                None => self.get_token()?,
            }
        } else {
            self.get_token()?
        };

        while kinds.contains(&tok.kind) {
            collected.push(tok);
            tok = self.get_token()?;
        }
        Ok(collected)
    }

    /// Symmetric to `skip_of`: advances while the current kind is
    /// *not* in `kinds` and not EOF, collecting the skipped tokens.
    pub fn skip_to(&mut self, kinds: &[TokenKind]) -> Result<Vec<Token>, LexError> {
        let mut collected = Vec::new();
        loop {
            let tok = self.get_token()?;
            if tok.is_eof() || kinds.contains(&tok.kind) {
                break;
            }
            collected.push(tok);
        }
        Ok(collected)
    }

    pub fn skip_to_value_of(&mut self, kind: TokenKind, value: &str) -> Result<Vec<Token>, LexError> {
        let mut collected = Vec::new();
        loop {
            let tok = self.get_token()?;
            if tok.is_eof() || (tok.kind == kind && tok.value == value) {
                break;
            }
            collected.push(tok);
        }
        Ok(collected)
    }

    /// Overwrites the single snapshot slot. A second `save` silently
    /// discards whatever was saved before, matching spec.md §4.2.
    pub fn save(&mut self) {
        self.savepoint = Some(LexerSnapshot { cursor: self.cursor.snapshot(), current: self.current.clone() });
    }

    /// Restores the lexer to the last `save`d state.
    ///
    /// # Panics
    ///
    /// Panics if called without a prior `save` — spec.md §4.2 calls
    /// this "an error", and there is no sensible state to roll back to.
    pub fn backtrack(&mut self) {
        let snap = self.savepoint.take().expect("backtrack called without a matching save");
        self.cursor.restore(snap.cursor);
        self.current = snap.current;
    }

    pub fn span_here(&self) -> Span {
        Span::point(self.cursor.position(), self.cursor.line(), self.cursor.col())
    }
}


/// Property tests for the two invariants spec.md §8 states in terms a
/// unit test can't fully cover: peek purity and save/restore round-trip
/// hold for *any* lexer state, not just the cases above.
///
/// Arbitrary `String` inputs would mostly fail to lex at all, so each
/// case picks from a small corpus of real gengar fragments and uses the
/// `quickcheck`-generated index only to select among them.
#[cfg(test)]
mod proptests {
    use super::*;
    use quickcheck_macros::quickcheck;

    const FRAGMENTS: &[&str] = &[
        "main() { }",
        "fn add(a: number, b: number) { return a + b; }",
        "main() {\n  const x: number = 1;\n  mut y = x;\n  while (y) { y = y - 1; }\n}",
        "foo.bar.baz(1, 2, 3)",
        "if (a) { return 1; } else if (b) { return 2; } else { return 3; }",
        "  \t\n  ",
        "debugger;",
    ];

    fn pick(seed: usize) -> &'static str {
        FRAGMENTS[seed % FRAGMENTS.len()]
    }

    fn drain(lex: &mut Lexer) -> Vec<Token> {
        let mut out = Vec::new();
        loop {
            let Ok(tok) = lex.get_token() else { break };
            let is_eof = tok.is_eof();
            out.push(tok);
            if is_eof {
                break;
            }
        }
        out
    }

    #[quickcheck]
    fn peek_purity_holds_for_any_prefix(seed: usize, steps: u8) -> bool {
        let src = pick(seed);
        let mut lex = Lexer::new(src);
        for _ in 0..(steps % 6) {
            if lex.get_token().is_err() {
                return true;
            }
        }
        let Ok(peeked) = lex.peek() else { return true };
        let Ok(taken) = lex.get_token() else { return false };
        peeked == taken
    }

    #[quickcheck]
    fn save_restore_round_trip_is_byte_identical(seed: usize, save_after: u8, steps_after: u8) -> bool {
        let src = pick(seed);
        let mut lex = Lexer::new(src);
        for _ in 0..(save_after % 4) {
            if lex.get_token().is_err() {
                return true;
            }
        }
        lex.save();
        let pos_before = lex.position();
        let line_before = lex.line();
        let col_before = lex.col();

        for _ in 0..(steps_after % 6) {
            if lex.get_token().is_err() {
                break;
            }
        }
        lex.backtrack();

        lex.position() == pos_before && lex.line() == line_before && lex.col() == col_before
    }

    #[quickcheck]
    fn get_token_never_loops_forever(seed: usize) -> bool {
        let src = pick(seed);
        let mut lex = Lexer::new(src);
        // Draining to EOF terminates only if every call makes forward
        // progress; a regression here would hang the test binary rather
        // than fail an assertion, which is the point of this check.
        !drain(&mut lex).is_empty()
    }
}
