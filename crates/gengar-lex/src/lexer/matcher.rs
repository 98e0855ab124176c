//! The ordered token matcher table from spec.md §4.1.
//!
//! Each entry tries to match at the very start of `remaining`; the
//! lexer takes the first one that matches. Order encodes the
//! precedence spec.md calls out explicitly:
//!
//! - `Keywords` and `BoolLiteral` (both word-bounded reserved words)
//!   must be tried before the generic `Id` pattern, or `if`/`true`/etc.
//!   would just lex as identifiers.
//! - `TypeAssert` (`: string` / `: number` / `: boolean`) must be tried
//!   before the generic `Marks` colon, or a type annotation would lex
//!   as a bare `:` followed by an `Id`.
//! - `AssignOperator` must be tried before `BinaryOperator`, or `+=`
//!   would lex as `BinaryOperator("+")` followed by `Marks("=")`...
//!   except `=` isn't a `Marks` pattern, so it would simply fail to
//!   lex at all.
//!
//! `LeftBracket`/`RightBracket` match `{`/`}`, not `[`/`]` — the only
//! brace-like delimiters the grammar ever uses are block delimiters,
//! and the source language has no array-literal syntax that would need
//! square brackets. The token kind names follow the source spec's
//! terminology verbatim even though they read like square brackets.
//!
//! spec.md's `UnaryOperator` row reads `!+ | ~`, which cannot be taken
//! literally (a two-character `!+` token does not appear anywhere in
//! the grammar, and would shadow binary `+`). This lexer reads it as
//! `!` or `~`; prefix `+`/`-` reuse the `BinaryOperator` token and are
//! told apart from infix `+`/`-` positionally by the parser (see
//! `gengar-par`'s `NonRecursive` dispatch), since a lexer with only
//! one token of lookahead cannot otherwise tell a prefix operator from
//! an infix one. This is recorded as a resolved Open Question in
//! `DESIGN.md`.

use crate::token::TokenKind;

const KEYWORDS: &[&str] = &["if", "else", "while", "return", "debugger", "const", "mut"];

/// Number of bytes matched, so the caller can advance the cursor by
/// that many bytes without re-deriving it from the returned text.
pub struct Match {
    pub kind: TokenKind,
    pub len: usize,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn word_boundary_after(rest: &str, matched_len: usize) -> bool {
    rest[matched_len..].chars().next().map_or(true, |c| !is_ident_continue(c))
}

fn match_word(rest: &str, word: &str) -> Option<usize> {
    if rest.starts_with(word) && word_boundary_after(rest, word.len()) {
        Some(word.len())
    } else {
        None
    }
}

fn match_keyword(rest: &str) -> Option<Match> {
    KEYWORDS
        .iter()
        .find_map(|kw| match_word(rest, kw))
        .map(|len| Match { kind: TokenKind::Keywords, len })
}

fn match_bool_literal(rest: &str) -> Option<Match> {
    match_word(rest, "true")
        .or_else(|| match_word(rest, "false"))
        .map(|len| Match { kind: TokenKind::BoolLiteral, len })
}

fn match_type_assert(rest: &str) -> Option<Match> {
    let after_colon = rest.strip_prefix(':')?;
    let trimmed = after_colon.trim_start_matches([' ', '\t']);
    let ws_len = after_colon.len() - trimmed.len();
    for ty in ["string", "number", "boolean"] {
        if let Some(len) = match_word(trimmed, ty) {
            return Some(Match { kind: TokenKind::TypeAssert, len: 1 + ws_len + len });
        }
    }
    None
}

fn match_id(rest: &str) -> Option<Match> {
    let mut chars = rest.char_indices();
    let (_, first) = chars.next()?;
    if !is_ident_start(first) {
        return None;
    }
    let mut len = first.len_utf8();
    for (i, c) in chars {
        if !is_ident_continue(c) {
            break;
        }
        len = i + c.len_utf8();
    }
    Some(Match { kind: TokenKind::Id, len })
}

fn match_string_literal(rest: &str) -> Option<Match> {
    let mut chars = rest.char_indices();
    let (_, quote) = chars.next()?;
    if quote != '"' {
        return None;
    }
    for (i, c) in chars {
        if c == '"' {
            return Some(Match { kind: TokenKind::StringLiteral, len: i + 1 });
        }
    }
    None
}

fn match_number_literal(rest: &str) -> Option<Match> {
    let len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    (len > 0).then_some(Match { kind: TokenKind::NumberLiteral, len })
}

fn match_single_char(rest: &str, ch: char, kind: TokenKind) -> Option<Match> {
    rest.starts_with(ch).then_some(Match { kind, len: ch.len_utf8() })
}

fn match_whitespace(rest: &str) -> Option<Match> {
    let len = rest.chars().take_while(|&c| c == ' ' || c == '\t').count();
    (len > 0).then_some(Match { kind: TokenKind::WhiteSpace, len })
}

fn match_crlf(rest: &str) -> Option<Match> {
    // (CR? LF)+ — a lone CR with no following LF does not start a match.
    let mut len = 0;
    let mut chars = rest.chars().peekable();
    loop {
        match chars.peek() {
            Some(&'\r') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.peek() != Some(&'\n') {
                    break;
                }
                chars.next();
                len += 1;
            }
            Some(&'\n') => {
                chars.next();
                len += 1;
            }
            _ => break,
        }
    }
    (len > 0).then_some(Match { kind: TokenKind::Crlf, len })
}

fn match_assign_operator(rest: &str) -> Option<Match> {
    for op in ["+=", "-=", "*=", "/=", "="] {
        if rest.starts_with(op) {
            return Some(Match { kind: TokenKind::AssignOperator, len: op.len() });
        }
    }
    None
}

fn match_unary_operator(rest: &str) -> Option<Match> {
    rest.starts_with('!')
        .then_some(1)
        .or_else(|| rest.starts_with('~').then_some(1))
        .map(|len| Match { kind: TokenKind::UnaryOperator, len })
}

fn match_binary_operator(rest: &str) -> Option<Match> {
    for op in ['+', '-', '*', '/'] {
        if rest.starts_with(op) {
            return Some(Match { kind: TokenKind::BinaryOperator, len: op.len_utf8() });
        }
    }
    None
}

fn match_marks(rest: &str) -> Option<Match> {
    for mark in ['?', ':'] {
        if rest.starts_with(mark) {
            return Some(Match { kind: TokenKind::Marks, len: mark.len_utf8() });
        }
    }
    None
}

/// Tries every pattern in spec.md §4.1's precedence order and returns
/// the first match anchored at the start of `rest`.
pub fn next_match(rest: &str) -> Option<Match> {
    if rest.is_empty() {
        return None;
    }
    match_keyword(rest)
        .or_else(|| match_bool_literal(rest))
        .or_else(|| match_type_assert(rest))
        .or_else(|| match_id(rest))
        .or_else(|| match_string_literal(rest))
        .or_else(|| match_number_literal(rest))
        .or_else(|| match_single_char(rest, '(', TokenKind::LeftParenthesis))
        .or_else(|| match_single_char(rest, ')', TokenKind::RightParenthesis))
        .or_else(|| match_single_char(rest, '{', TokenKind::LeftBracket))
        .or_else(|| match_single_char(rest, '}', TokenKind::RightBracket))
        .or_else(|| match_single_char(rest, ';', TokenKind::Semicolon))
        .or_else(|| match_single_char(rest, ',', TokenKind::Comma))
        .or_else(|| match_single_char(rest, '.', TokenKind::Dot))
        .or_else(|| match_whitespace(rest))
        .or_else(|| match_crlf(rest))
        .or_else(|| match_assign_operator(rest))
        .or_else(|| match_unary_operator(rest))
        .or_else(|| match_binary_operator(rest))
        .or_else(|| match_marks(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_precedes_identifier() {
        let m = next_match("if(x)").unwrap();
        assert_eq!(m.kind, TokenKind::Keywords);
        assert_eq!(m.len, 2);
    }

    #[test]
    fn identifier_starting_with_keyword_prefix_is_id() {
        let m = next_match("ifdef").unwrap();
        assert_eq!(m.kind, TokenKind::Id);
        assert_eq!(m.len, 5);
    }

    #[test]
    fn bool_literal_precedes_identifier() {
        let m = next_match("true)").unwrap();
        assert_eq!(m.kind, TokenKind::BoolLiteral);
    }

    #[test]
    fn type_assert_precedes_marks_colon() {
        let m = next_match(": string = 1").unwrap();
        assert_eq!(m.kind, TokenKind::TypeAssert);
        assert_eq!(&": string"[..m.len], ": string");
    }

    #[test]
    fn bare_colon_falls_back_to_marks() {
        let m = next_match(": notatype").unwrap();
        assert_eq!(m.kind, TokenKind::Marks);
        assert_eq!(m.len, 1);
    }

    #[test]
    fn assign_operator_precedes_binary_operator() {
        let m = next_match("+=1").unwrap();
        assert_eq!(m.kind, TokenKind::AssignOperator);
        assert_eq!(m.len, 2);
    }

    #[test]
    fn plain_plus_is_binary_operator() {
        let m = next_match("+1").unwrap();
        assert_eq!(m.kind, TokenKind::BinaryOperator);
        assert_eq!(m.len, 1);
    }

    #[test]
    fn string_literal_stops_at_closing_quote() {
        let m = next_match("\"hi\" rest").unwrap();
        assert_eq!(m.kind, TokenKind::StringLiteral);
        assert_eq!(m.len, 4);
    }

    #[test]
    fn number_literal_matches_digits_only() {
        let m = next_match("123abc").unwrap();
        assert_eq!(m.kind, TokenKind::NumberLiteral);
        assert_eq!(m.len, 3);
    }

    #[test]
    fn crlf_counts_each_newline() {
        let m = next_match("\n\n\r\nrest").unwrap();
        assert_eq!(m.kind, TokenKind::Crlf);
        assert_eq!(m.len, 4);
    }

    #[test]
    fn no_match_on_unrecognized_character() {
        assert!(next_match("`").is_none());
    }

    #[test]
    fn curly_braces_are_bracket_tokens() {
        let open = next_match("{ x }").unwrap();
        assert_eq!(open.kind, TokenKind::LeftBracket);
        assert_eq!(open.len, 1);
    }
}
