//! Automaton representation for compiled patterns.
//!
//! # Architecture
//!
//! ```text
//! AutomatonBuilder (mutable, fragment algebra) → Automaton (frozen, matched against)
//! ```
//!
//! Nodes live in an arena and reference each other by index. Edges are labelled
//! with [`TransitionId`]s; a node's adjacency is a multimap from identifier to
//! successor set. Identifier transitions are wrapped in lazy nodes whose
//! adjacency is materialized once, on first access.

mod build;
mod dump;
mod ids;
mod nfa;

#[cfg(test)]
mod build_tests;

pub use build::{AutomatonBuilder, BuildNode, Edges, Fragment, LazyEdge, NodeId};
pub use ids::{EPSILON_MARKER, Special, TransitionId};
pub use nfa::{Automaton, Node, StateSet};
