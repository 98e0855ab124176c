//! Recursive-descent parser implementing the grammar from spec.md §4.3.
//!
//! The parser keeps a single token of lookahead in `current`, refilled
//! by [`Parser::bump`] from the lexer with whitespace and CRLF tokens
//! filtered out centrally. Every production the grammar describes as
//! needing `Save`/`BackTracking` (the `ID`/member/call/assign
//! disambiguation, the `if`/`else` dispatch) turns out to be decidable
//! from this single token of lookahead once trivia is filtered, so
//! `gengar-lex`'s `save`/`backtrack` API is never called here — it
//! exists for `gengar-lex`'s own contract and tests, not because this
//! parser needs it.

use gengar_lex::{Lexer, Token, TokenKind};
use gengar_util::{FileId, Span, Symbol};

use crate::ast::*;
use crate::error::ParseError;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    current_span: Span,
    file_id: FileId,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, file_id: FileId) -> Result<Self, ParseError> {
        let lexer = Lexer::new(source);
        let mut parser = Self { lexer, current: Token::eof(1, 0), current_span: Span::point(0, 1, 0), file_id };
        let (tok, span) = parser.next_significant()?;
        parser.current = tok;
        parser.current_span = span;
        Ok(parser)
    }

    /// Parses a complete source file.
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        tracing::debug!("parsing started");
        let start_span = self.current_span;
        let mut body = Vec::new();

        while self.current.kind != TokenKind::Eof {
            let before = self.lexer.position();
            match (self.current.kind, self.current.value.as_str()) {
                (TokenKind::Id, "main") => body.push(TopLevel::Main(self.parse_main()?)),
                (TokenKind::Id, "fn") => body.push(TopLevel::Function(self.parse_function()?)),
                _ => {
                    return Err(ParseError::structural(
                        format!("expected 'main' or 'fn' declaration, found {:?} {:?}", self.current.kind, self.current.value),
                        self.current_span,
                    ));
                }
            }
            tracing::trace!(kind = ?body.last(), "parsed top-level item");
            if self.lexer.position() == before {
                self.bump()?;
            }
        }

        let span = start_span.to(self.current_span);
        tracing::debug!(items = body.len(), "parsing finished");
        Ok(Program { body, span })
    }

    fn parse_main(&mut self) -> Result<MainDeclare, ParseError> {
        let (_, start_span) = self.bump()?; // 'main'
        self.expect_kind(TokenKind::LeftParenthesis, "(")?;
        self.expect_kind(TokenKind::RightParenthesis, ")")?;
        let ret_type = self.try_parse_type_annotation()?;
        let body = self.parse_block()?;
        let span = start_span.to(body.span);
        Ok(MainDeclare { ret_type, body, span })
    }

    fn parse_function(&mut self) -> Result<FunctionDeclare, ParseError> {
        let (_, start_span) = self.bump()?; // 'fn'
        let (name_tok, _) = self.expect_kind(TokenKind::Id, "function name")?;
        self.expect_kind(TokenKind::LeftParenthesis, "(")?;
        let params = self.parse_params()?;
        self.expect_kind(TokenKind::RightParenthesis, ")")?;
        let body = self.parse_block()?;
        let span = start_span.to(body.span);
        Ok(FunctionDeclare { name: Symbol::intern(&name_tok.value), params, body, span })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();
        if self.current.kind == TokenKind::RightParenthesis {
            return Ok(params);
        }
        loop {
            let (name_tok, name_span) = self.expect_kind(TokenKind::Id, "parameter name")?;
            let ty = self.try_parse_type_annotation()?;
            params.push(Param { name: Symbol::intern(&name_tok.value), ty, span: name_span });
            if self.current.kind == TokenKind::Comma {
                self.bump()?;
                continue;
            }
            break;
        }
        Ok(params)
    }

    fn try_parse_type_annotation(&mut self) -> Result<Option<TypeAnnotation>, ParseError> {
        if self.current.kind != TokenKind::TypeAssert {
            return Ok(None);
        }
        let (tok, span) = self.bump()?;
        let word = tok.value.trim_start_matches(':').trim();
        let ty = match word {
            "string" => TypeAnnotation::String,
            "number" => TypeAnnotation::Number,
            "boolean" => TypeAnnotation::Boolean,
            other => return Err(ParseError::structural(format!("unknown type annotation {other:?}"), span)),
        };
        Ok(Some(ty))
    }

    fn parse_block(&mut self) -> Result<BlockStatement, ParseError> {
        let (_, start_span) = self.expect_kind(TokenKind::LeftBracket, "{")?;
        let mut body = Vec::new();

        while self.current.kind != TokenKind::RightBracket {
            if self.current.kind == TokenKind::Eof {
                return Err(ParseError::unexpected("}", format!("{:?}", self.current.kind), self.current_span));
            }
            let before = self.lexer.position();
            body.push(self.parse_block_item()?);
            if self.lexer.position() == before {
                self.bump()?;
            }
        }

        let (_, end_span) = self.expect_kind(TokenKind::RightBracket, "}")?;
        Ok(BlockStatement { body, span: start_span.to(end_span) })
    }

    fn parse_block_item(&mut self) -> Result<Stmt, ParseError> {
        match self.current.kind {
            TokenKind::Keywords => self.parse_keyword_statement(),
            TokenKind::Id | TokenKind::StringLiteral | TokenKind::NumberLiteral | TokenKind::BoolLiteral | TokenKind::UnaryOperator => {
                self.parse_expression_statement()
            }
            TokenKind::BinaryOperator if self.current.value == "+" || self.current.value == "-" => self.parse_expression_statement(),
            other => Err(ParseError::structural(format!("unknown statement token {other:?}"), self.current_span)),
        }
    }

    fn parse_keyword_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current.value.as_str() {
            "const" | "mut" => Ok(Stmt::Var(self.parse_var_declare()?)),
            "if" => Ok(Stmt::If(self.parse_if_statement()?)),
            "while" => Ok(Stmt::While(self.parse_while_statement()?)),
            "return" => Ok(Stmt::Return(self.parse_return_statement()?)),
            "debugger" => Ok(Stmt::Debugger(self.parse_debugger_statement()?)),
            other => Err(ParseError::structural(format!("unknown statement keyword {other:?}"), self.current_span)),
        }
    }

    fn parse_var_declare(&mut self) -> Result<VarDeclare, ParseError> {
        let (kw_tok, start_span) = self.bump()?; // 'const' | 'mut'
        let kind = if kw_tok.value == "const" { DeclKind::Const } else { DeclKind::Mut };
        let (name_tok, _) = self.expect_kind(TokenKind::Id, "variable name")?;
        let ty = self.try_parse_type_annotation()?;
        let (op_tok, _) = self.expect_kind(TokenKind::AssignOperator, "assignment operator")?;
        let init = self.parse_expression()?;
        let span = start_span.to(init.span());
        if self.current.kind == TokenKind::Semicolon {
            self.bump()?;
        }
        Ok(VarDeclare { kind, name: Symbol::intern(&name_tok.value), ty, op: op_tok.value, init: Box::new(init), span })
    }

    fn parse_if_statement(&mut self) -> Result<IfStatement, ParseError> {
        let (_, start_span) = self.bump()?; // 'if'
        self.expect_kind(TokenKind::LeftParenthesis, "(")?;
        let test = self.parse_expression()?;
        self.expect_kind(TokenKind::RightParenthesis, ")")?;
        let consequent = self.parse_block()?;
        let mut span = start_span.to(consequent.span);

        let alternate = if self.current.kind == TokenKind::Keywords && self.current.value == "else" {
            self.bump()?; // 'else'
            let branch = if self.current.kind == TokenKind::Keywords && self.current.value == "if" {
                ElseBranch::If(self.parse_if_statement()?)
            } else if self.current.kind == TokenKind::LeftBracket {
                ElseBranch::Block(self.parse_block()?)
            } else {
                return Err(ParseError::structural("expected 'if' or block after 'else'", self.current_span));
            };
            let branch_span = match &branch {
                ElseBranch::If(i) => i.span,
                ElseBranch::Block(b) => b.span,
            };
            span = span.to(branch_span);
            Some(Box::new(branch))
        } else {
            None
        };

        Ok(IfStatement { test: Box::new(test), consequent, alternate, span })
    }

    fn parse_while_statement(&mut self) -> Result<WhileStatement, ParseError> {
        let (_, start_span) = self.bump()?; // 'while'
        self.expect_kind(TokenKind::LeftParenthesis, "(")?;
        let test = self.parse_expression()?;
        self.expect_kind(TokenKind::RightParenthesis, ")")?;
        let body = self.parse_block()?;
        let span = start_span.to(body.span);
        Ok(WhileStatement { test: Box::new(test), body, span })
    }

    /// Consumes `return` before parsing the argument, resolving the
    /// dispatcher-order bug spec.md §9's Open Questions calls out.
    fn parse_return_statement(&mut self) -> Result<ReturnStatement, ParseError> {
        let (_, start_span) = self.bump()?; // 'return'
        let argument = self.parse_expression()?;
        let span = start_span.to(argument.span());
        if self.current.kind == TokenKind::Semicolon {
            self.bump()?;
        }
        Ok(ReturnStatement { argument: Box::new(argument), span })
    }

    fn parse_debugger_statement(&mut self) -> Result<DebuggerStatement, ParseError> {
        let (_, span) = self.bump()?; // 'debugger'
        if self.current.kind == TokenKind::Semicolon {
            self.bump()?;
        }
        Ok(DebuggerStatement { span })
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span;
        let expr = self.parse_expression()?;
        let span = start_span.to(expr.span());
        if self.current.kind == TokenKind::Semicolon {
            self.bump()?;
        }
        Ok(Stmt::Expression(ExpressionStatement { expr: Box::new(expr), span }))
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let start_span = self.current_span;
        let atom = self.parse_non_recursive()?;
        self.parse_expression_tail(atom, start_span)
    }

    /// Left-recursion elimination for `BinaryTail` / `ConditionalTail`.
    /// The left/test side is already in hand (`atom`) at this point, so
    /// unlike a parser that builds the tail before the atom is known,
    /// `Left`/`Test` are populated immediately rather than back-patched.
    /// Chained right-hand sides recurse back into `parse_expression`,
    /// which is what produces the right-leaning tree spec.md §9
    /// documents as the source behavior to preserve.
    fn parse_expression_tail(&mut self, atom: Expr, start_span: Span) -> Result<Expr, ParseError> {
        match self.current.kind {
            TokenKind::BinaryOperator => {
                let (op_tok, _) = self.bump()?;
                let right = self.parse_expression()?;
                let span = start_span.to(right.span());
                Ok(Expr::Binary(BinaryExpression { left: Some(Box::new(atom)), op: op_tok.value, right: Box::new(right), span }))
            }
            TokenKind::Marks if self.current.value == "?" => {
                self.bump()?; // '?'
                let consequent = self.parse_expression()?;
                self.expect_marks(":")?;
                let alternate = self.parse_expression()?;
                let span = start_span.to(alternate.span());
                Ok(Expr::Conditional(ConditionalExpression {
                    test: Some(Box::new(atom)),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                    span,
                }))
            }
            _ => Ok(atom),
        }
    }

    fn parse_non_recursive(&mut self) -> Result<Expr, ParseError> {
        match self.current.kind {
            TokenKind::UnaryOperator => self.parse_unary(),
            // Prefix `+`/`-` reuse the BinaryOperator token; a binary
            // operator can never start an expression, so seeing one
            // here unambiguously means a unary prefix.
            TokenKind::BinaryOperator if self.current.value == "+" || self.current.value == "-" => self.parse_unary(),
            TokenKind::StringLiteral => {
                let (tok, span) = self.bump()?;
                let text = tok.value.trim_matches('"');
                Ok(Expr::StringLiteral(StringLiteral { value: Symbol::intern(text), span }))
            }
            TokenKind::NumberLiteral => {
                let (tok, span) = self.bump()?;
                Ok(Expr::NumberLiteral(NumberLiteral { value: Symbol::intern(&tok.value), span }))
            }
            TokenKind::BoolLiteral => {
                let (tok, span) = self.bump()?;
                Ok(Expr::BooleanLiteral(BooleanLiteral { value: tok.value == "true", span }))
            }
            TokenKind::Id => self.parse_id_led_expression(),
            other => Err(ParseError::structural(format!("unknown expression token {other:?}"), self.current_span)),
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let (op_tok, start_span) = self.bump()?;
        let argument = self.parse_expression()?;
        let span = start_span.to(argument.span());
        Ok(Expr::Unary(UnaryExpression { op: op_tok.value, argument: Box::new(argument), span }))
    }

    /// Dispatches the `ID` / member / call / assign disambiguation from
    /// spec.md §4.4 on the single lookahead token following the `ID`.
    fn parse_id_led_expression(&mut self) -> Result<Expr, ParseError> {
        let (id_tok, start_span) = self.bump()?;
        let ident = Expr::Identifier(Identifier { name: Symbol::intern(&id_tok.value), span: start_span });

        match self.current.kind {
            TokenKind::Dot => {
                let member = self.parse_member_tail(ident, start_span)?;
                if self.current.kind == TokenKind::LeftParenthesis {
                    self.parse_call_tail(member, start_span)
                } else {
                    Ok(member)
                }
            }
            TokenKind::LeftParenthesis => self.parse_call_tail(ident, start_span),
            TokenKind::AssignOperator => self.parse_assign_tail(ident, start_span),
            _ => Ok(ident),
        }
    }

    fn parse_member_tail(&mut self, mut object: Expr, start_span: Span) -> Result<Expr, ParseError> {
        while self.current.kind == TokenKind::Dot {
            self.bump()?; // '.'
            let (prop_tok, prop_span) = self.expect_kind(TokenKind::Id, "identifier after '.'")?;
            let span = start_span.to(prop_span);
            object = Expr::Member(MemberExpression { object: Box::new(object), property: Symbol::intern(&prop_tok.value), span });
        }
        Ok(object)
    }

    fn parse_call_tail(&mut self, callee: Expr, start_span: Span) -> Result<Expr, ParseError> {
        self.expect_kind(TokenKind::LeftParenthesis, "(")?;
        let arguments = self.parse_arg_list()?;
        let (_, end_span) = self.expect_kind(TokenKind::RightParenthesis, ")")?;
        let span = start_span.to(end_span);
        Ok(Expr::Call(CallExpression { callee: Box::new(callee), arguments, span }))
    }

    fn parse_arg_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.current.kind == TokenKind::RightParenthesis {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if self.current.kind == TokenKind::Comma {
                self.bump()?;
                continue;
            }
            break;
        }
        Ok(args)
    }

    fn parse_assign_tail(&mut self, target: Expr, start_span: Span) -> Result<Expr, ParseError> {
        let (op_tok, _) = self.expect_kind(TokenKind::AssignOperator, "assignment operator")?;
        let value = self.parse_expression()?;
        let span = start_span.to(value.span());
        Ok(Expr::Assign(AssignExpression { target: Box::new(target), op: op_tok.value, value: Box::new(value), span }))
    }

    fn expect_marks(&mut self, value: &str) -> Result<(), ParseError> {
        if self.current.kind == TokenKind::Marks && self.current.value == value {
            self.bump()?;
            Ok(())
        } else {
            Err(ParseError::unexpected(format!("'{value}'"), format!("{:?}", self.current.kind), self.current_span))
        }
    }

    fn expect_kind(&mut self, kind: TokenKind, expected: &str) -> Result<(Token, Span), ParseError> {
        if self.current.kind == kind {
            self.bump()
        } else {
            Err(ParseError::unexpected(expected, format!("{:?}", self.current.kind), self.current_span))
        }
    }

    /// Consumes `current`, refills it with the next non-trivia token,
    /// and returns the consumed `(Token, Span)` pair.
    fn bump(&mut self) -> Result<(Token, Span), ParseError> {
        let old_tok = self.current.clone();
        let old_span = self.current_span;
        let (next_tok, next_span) = self.next_significant()?;
        self.current = next_tok;
        self.current_span = next_span;
        Ok((old_tok, old_span))
    }

    fn next_significant(&mut self) -> Result<(Token, Span), ParseError> {
        loop {
            let start = self.lexer.position();
            let tok = self.lexer.get_token()?;
            if matches!(tok.kind, TokenKind::WhiteSpace | TokenKind::Crlf) {
                continue;
            }
            let end = self.lexer.position();
            let span = Span::with_file(start, end, self.file_id, tok.line, tok.col);
            return Ok((tok, span));
        }
    }
}

/// Parses a whole source file in one call.
pub fn parse_source(source: &str, file_id: FileId) -> Result<Program, ParseError> {
    Parser::new(source, file_id)?.parse()
}
