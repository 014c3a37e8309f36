//! Token cursor and grammar productions.

use omni_ir::ast::{Expr, ExprKind, Key, NamedArg, Program, Stmt, StmtKind};
use omni_ir::{LineOffsetTable, Span, Value};
use omni_lexer::{lex, Token, TokenKind};
use omni_stack::ensure_sufficient_stack;

use crate::{ParseError, SELF_KEY};

pub(crate) struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    lines: LineOffsetTable,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Parser {
            source,
            tokens: lex(source),
            pos: 0,
            lines: LineOffsetTable::build(source),
        }
    }

    // Cursor

    fn current(&self) -> &Token {
        // `lex` always terminates the stream with Eof, and `advance` never
        // moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        let next = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[next].kind
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&format!("expected {kind}")))
        }
    }

    fn error(&self, span: Span, message: impl Into<String>) -> ParseError {
        ParseError::with_table(&self.lines, self.source, span, message)
    }

    /// Error at the current token; lexer errors take precedence over `context`.
    fn unexpected(&self, context: &str) -> ParseError {
        let token = self.current();
        match &token.kind {
            TokenKind::Error(err) => self.error(token.span, err.to_string()),
            found => self.error(token.span, format!("{context}, found {found}")),
        }
    }

    // Statements

    pub(crate) fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Program { stmts })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span;
        let kind = match &self.current().kind {
            TokenKind::Include => {
                self.advance();
                StmtKind::Include(self.parse_expr()?)
            }
            TokenKind::HashInclude => {
                return Err(self.error(
                    start,
                    "'#include' is not supported; use 'include <source>;'",
                ));
            }
            TokenKind::Key(_) => self.parse_assignment()?,
            _ => return Err(self.unexpected("expected a key or 'include'")),
        };
        let end = self.expect(&TokenKind::Semi)?;
        Ok(Stmt {
            kind,
            span: start.merge(end),
        })
    }

    fn parse_assignment(&mut self) -> Result<StmtKind, ParseError> {
        let key = self.parse_key()?;
        if key.name == SELF_KEY {
            return Err(self.error(key.span, "'self' is reserved and cannot be assigned"));
        }
        if self.eat(&TokenKind::Eq) {
            let value = self.parse_expr()?;
            Ok(StmtKind::Set { key, value })
        } else if self.eat(&TokenKind::Tilde) {
            let value = self.parse_expr()?;
            Ok(StmtKind::Default { key, value })
        } else {
            Err(self.unexpected(&format!("expected '=' or '~' after key '{key}'")))
        }
    }

    fn parse_key(&mut self) -> Result<Key, ParseError> {
        match &self.current().kind {
            TokenKind::Key(name) => {
                let key = Key::new(name.clone(), self.current().span);
                self.advance();
                Ok(key)
            }
            _ => Err(self.unexpected("expected a key")),
        }
    }

    // Expressions

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut lhs = self.parse_primary()?;
            while self.eat(&TokenKind::Caret) {
                let rhs = self.parse_primary()?;
                let span = lhs.span.merge(rhs.span);
                lhs = Expr::new(ExprKind::Concat(Box::new(lhs), Box::new(rhs)), span);
            }
            Ok(lhs)
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.current().span;
        let literal = match &self.current().kind {
            TokenKind::Str(s) => Value::str(s.as_str()),
            TokenKind::Int(n) => Value::Int(*n),
            TokenKind::Long(n) => Value::Long(*n),
            TokenKind::Float(n) => Value::Float(*n),
            TokenKind::Double(n) => Value::Double(*n),
            TokenKind::True => Value::Bool(true),
            TokenKind::False => Value::Bool(false),
            TokenKind::LBrace => return self.parse_array(None),
            TokenKind::Key(_) => return self.parse_key_expr(),
            _ => return Err(self.unexpected("expected an expression")),
        };
        self.advance();
        Ok(Expr::new(ExprKind::Literal(literal), span))
    }

    /// A key starts a variable reference, a construction, or a typed array.
    fn parse_key_expr(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::LParen => {
                let type_name = self.parse_key()?;
                self.parse_construct(type_name)
            }
            TokenKind::LBrace => {
                let tag = self.parse_key()?;
                self.parse_array(Some(tag))
            }
            _ => {
                let key = self.parse_key()?;
                Ok(Expr::new(ExprKind::Var(key.name), key.span))
            }
        }
    }

    fn parse_construct(&mut self, type_name: Key) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        let mut end = self.expect(&TokenKind::RParen)?;

        let mut named = Vec::new();
        if self.eat(&TokenKind::LBracket) {
            loop {
                let key = self.parse_key()?;
                self.expect(&TokenKind::Eq)?;
                let value = self.parse_expr()?;
                named.push(NamedArg { key, value });
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            end = self.expect(&TokenKind::RBracket)?;
        }

        let span = type_name.span.merge(end);
        Ok(Expr::new(
            ExprKind::Construct {
                type_name,
                args,
                named,
            },
            span,
        ))
    }

    fn parse_array(&mut self, tag: Option<Key>) -> Result<Expr, ParseError> {
        let open = self.expect(&TokenKind::LBrace)?;
        let mut elems = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            elems.push(self.parse_expr()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let close = self.expect(&TokenKind::RBrace)?;
        let start = tag.as_ref().map_or(open, |t| t.span);
        Ok(Expr::new(ExprKind::Array { tag, elems }, start.merge(close)))
    }
}
