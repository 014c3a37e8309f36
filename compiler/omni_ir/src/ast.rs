//! Syntax tree of a configuration source.
//!
//! Every node carries the [`Span`] it was parsed from so evaluation errors can
//! point back into the text.

use std::fmt;

use crate::span::Span;
use crate::value::Value;

/// A whole configuration source: statements in evaluation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `key = expr;`
    Set { key: Key, value: Expr },
    /// `key ~ expr;` writes only when `key` is absent.
    Default { key: Key, value: Expr },
    /// `include expr;`
    Include(Expr),
}

/// A property key or type name as written in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    pub name: String,
    pub span: Span,
}

impl Key {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Key {
            name: name.into(),
            span,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Value),
    /// Reference to a previously assigned key.
    Var(String),
    /// `lhs ^ rhs`
    Concat(Box<Expr>, Box<Expr>),
    /// `{a, b}` or `Tag{a, b}`.
    Array { tag: Option<Key>, elems: Vec<Expr> },
    /// `Type(args)[name = value, ...]`
    Construct {
        type_name: Key,
        args: Vec<Expr>,
        named: Vec<NamedArg>,
    },
}

/// One `name = value` pair from a construction's `[...]` clause.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedArg {
    pub key: Key,
    pub value: Expr,
}
