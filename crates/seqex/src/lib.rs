//! Regular expressions over sequences of arbitrary values.
//!
//! A pattern names its atoms; the caller decides what each name means by
//! binding it to a predicate over single elements or to another pattern.
//!
//! ```text
//! "POS? (NEG POS)* NEG?"  +  POS = v > 0, NEG = v < 0  →  alternating signs
//! ```
//!
//! Matching is always whole-sequence: a pattern either matches all of the
//! input or it does not.
//!
//! - `pattern` - compiled pattern and its binding-table API
//! - `bindings` - name → predicate / sub-pattern table
//! - `engine` - the matcher, fuel limits, and tracing
//! - `nullable` - null-ness of elements for the default `null` binding

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bindings;
pub mod engine;
pub mod nullable;
pub mod pattern;

#[cfg(test)]
mod pattern_tests;

pub use bindings::{Binding, Bindings, Predicate};
pub use engine::{
    FuelLimits, Matcher, MatcherBuilder, NoopTracer, PrintTracer, RuntimeError, Tracer, Verbosity,
};
pub use nullable::Nullable;
pub use pattern::Pattern;
pub use seqex_compiler::{Automaton, Diagnostics, TransitionId};

/// Errors from compiling, binding, or matching a pattern.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Compilation failed.
    #[error(transparent)]
    Compile(#[from] seqex_compiler::Error),

    /// Matching failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// `set` was given a name the pattern language cannot spell.
    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),
}

/// Result type for seqex operations.
pub type Result<T> = std::result::Result<T, Error>;
