//! Parser for the pattern language.
//!
//! # Architecture
//!
//! - `lexer`: logos-derived tokens with byte spans
//! - `grammar`: recursive descent producing the parse tree (`ast`)
//!
//! Syntax errors are collected as diagnostics; a parse with any diagnostic
//! fails with [`Error::Syntax`](crate::Error::Syntax) carrying the pattern
//! text. Group nesting is bounded by recursion fuel.

pub mod ast;
pub mod lexer;

mod core;
mod grammar;


pub use ast::{Node, NodeKind, Quantifier, Span};
pub use core::{DEFAULT_RECURSION_FUEL, Parser};
pub use lexer::{SyntaxKind, Token, lex};

use crate::Result;

/// Main entry point.
pub fn parse(source: &str) -> Result<Node> {
    Parser::new(source, lex(source)).parse()
}
