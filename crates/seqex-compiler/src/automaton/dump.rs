//! Dump helpers for automaton inspection and testing.
//!
//! ```text
//! entry: N1
//! exit: N0
//! N0: ∅
//! N1: A ⇢ N0
//! ```
//!
//! `→` marks edges present since construction, `⇢` marks the deferred edge
//! of a lazy node. Dumping never materializes lazy nodes.

use std::fmt::Write;

use super::build::{AutomatonBuilder, Edges, LazyEdge, NodeId};
use super::nfa::Automaton;

impl Automaton {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        writeln!(out, "entry: N{}", self.entry()).expect("String write never fails");
        writeln!(out, "exit: N{}", self.exit()).expect("String write never fails");
        for (id, node) in self.iter() {
            format_node(&mut out, id, node.eager_edges(), node.lazy_edge())
                .expect("String write never fails");
        }
        out
    }
}

impl AutomatonBuilder {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for id in 0..self.len() as NodeId {
            let node = self.node(id);
            format_node(&mut out, id, &node.edges, node.lazy.as_ref())
                .expect("String write never fails");
        }
        out
    }
}

fn format_node(
    w: &mut String,
    id: NodeId,
    edges: &Edges,
    lazy: Option<&LazyEdge>,
) -> std::fmt::Result {
    if edges.is_empty() && lazy.is_none() {
        return writeln!(w, "N{id}: ∅");
    }

    for (label, targets) in edges {
        let targets: Vec<String> = targets.iter().map(|t| format!("N{t}")).collect();
        writeln!(w, "N{id}: {label} → {}", targets.join(", "))?;
    }
    if let Some(lazy) = lazy {
        writeln!(w, "N{id}: {} ⇢ N{}", lazy.id, lazy.target)?;
    }
    Ok(())
}
