//! Recursive-descent parser for the OmniProps configuration language.
//!
//! ```text
//! program  := stmt* EOF
//! stmt     := KEY ('=' | '~') expr ';' | 'include' expr ';'
//! expr     := primary ('^' primary)*
//! primary  := literal | KEY | KEY '(' args? ')' named? | KEY? '{' elems? '}'
//! named    := '[' KEY '=' expr (',' KEY '=' expr)* ']'
//! elems    := expr (',' expr)* ','?
//! ```
//!
//! Parsing stops at the first error; there is no recovery.

mod error;
mod parser;

pub use error::ParseError;

use omni_ir::ast::Program;

/// Key that always refers to the store being loaded and cannot be assigned.
pub const SELF_KEY: &str = "self";

/// Parse a whole configuration source.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let program = parser::Parser::new(source).parse_program()?;
    tracing::trace!(statements = program.stmts.len(), "parsed configuration source");
    Ok(program)
}

#[cfg(test)]
mod tests;
