//! Lexer and recursive-descent parser for strategy scripts.
//!
//! Scripts are indentation-structured: a `strategy` header, an optional
//! `game:` line, then `play:`, `bid:`, `trump:` and `discard:` sections,
//! each holding `when <condition>:` rules and an optional `default:`.

pub mod ast;
pub mod parser;
pub mod token;

use std::fmt;

pub use ast::{Action, BinOp, Expr, PlaySection, Rule, RuleBlock, StrategyAst};
pub use token::{tokenize, TokKind, Token};

/// A parse failure with a one-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize) -> ParseError {
        ParseError { message: message.into(), line }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "parse error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parse a complete strategy script.
pub fn parse_strategy(source: &str) -> Result<StrategyAst, ParseError> {
    let tokens = tokenize(source)?;
    parser::Parser::new(tokens).parse()
}
