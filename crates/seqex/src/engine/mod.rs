//! Matching engine.
//!
//! Simulates the automaton over the input one position at a time, keeping a
//! pending state set per position. Predicate edges move one position forward;
//! sub-pattern edges may jump any distance, so later positions can be
//! populated before the scan reaches them.
//!
//! A sub-pattern is scanned once per start position, recording every end at
//! which it accepts. Scans waiting on other scans sit on an explicit stack,
//! so nesting depth is bounded by `FuelLimits` rather than the thread stack.

mod error;
mod matcher;
mod trace;

#[cfg(test)]
mod matcher_tests;
#[cfg(test)]
mod trace_tests;

pub use error::RuntimeError;
pub use matcher::{FuelLimits, Matcher, MatcherBuilder};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
