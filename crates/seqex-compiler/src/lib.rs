//! Seqex compiler: pattern text to nondeterministic automaton.
//!
//! This crate provides the compilation pipeline for seqex patterns:
//! - `parser` - lexer, parse tree, and grammar
//! - `diagnostics` - syntax error reporting
//! - `automaton` - transition identifiers, arena nodes, and the fragment algebra
//! - `compile` - parse tree to automaton (Thompson construction)
//!
//! ```text
//! pattern text → parse tree (parser) → Automaton (compile)
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod automaton;
pub mod compile;
pub mod diagnostics;
pub mod parser;

pub use automaton::{Automaton, Fragment, NodeId, Special, StateSet, TransitionId};
pub use compile::{compile, compile_tree};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter};

/// Errors that can occur while compiling a pattern.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The pattern text violates the grammar.
    #[error("invalid pattern `{pattern}`: {} syntax errors", .diagnostics.len())]
    Syntax {
        pattern: String,
        diagnostics: Diagnostics,
    },

    /// Recursion fuel exhausted (groups nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// A special transition was requested for a symbol that is not a special marker.
    #[error("`{0}` is not a special marker")]
    UnknownSpecial(String),

    /// The parse tree has a shape the grammar cannot produce.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

impl Error {
    /// Diagnostics for syntax errors, if any.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::Syntax { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, Error>;
