//! Construction-time automaton and the fragment algebra.
//!
//! Nodes live in a flat vector and reference each other by `NodeId`, so cycles
//! (Kleene loops, self-referential names) need no shared ownership.
//!
//! Every combinator takes fragments with a well-defined entry and exit and
//! returns a new fragment. Existing nodes are reused as junctions; a fragment's
//! entry/exit identity is never changed once handed out.

use indexmap::{IndexMap, IndexSet};

use super::ids::TransitionId;
use super::nfa::{Automaton, Node};

/// Index into the node arena.
pub type NodeId = u32;

/// Adjacency multimap: identifier → successor set.
pub type Edges = IndexMap<TransitionId, IndexSet<NodeId>>;

/// A sub-automaton with single entry and exit points.
///
/// Matching starts at `entry`; reaching `exit` accepts. `entry == exit` for
/// loop junctions produced by the Kleene closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub entry: NodeId,
    pub exit: NodeId,
}

impl Fragment {
    pub fn new(entry: NodeId, exit: NodeId) -> Self {
        Self { entry, exit }
    }

    /// Single-node fragment where entry equals exit.
    pub fn single(node: NodeId) -> Self {
        Self {
            entry: node,
            exit: node,
        }
    }
}

/// Deferred edge of a lazy node, recorded by target index only.
///
/// The target exists in the arena before the edge is recorded, but nothing
/// about it is read until the owning node is materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyEdge {
    pub id: TransitionId,
    pub target: NodeId,
}

#[derive(Debug, Clone, Default)]
pub struct BuildNode {
    pub edges: Edges,
    pub lazy: Option<LazyEdge>,
}

impl BuildNode {
    pub fn is_lazy(&self) -> bool {
        self.lazy.is_some()
    }
}

/// Mutable automaton under construction.
#[derive(Debug, Default)]
pub struct AutomatonBuilder {
    nodes: Vec<BuildNode>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a concrete node, returning its ID.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(BuildNode::default());
        id
    }

    /// Add a lazy node whose only deferred edge leads to `target`.
    pub fn add_lazy(&mut self, id: TransitionId, target: NodeId) -> NodeId {
        let node = self.nodes.len() as NodeId;
        self.nodes.push(BuildNode {
            edges: Edges::new(),
            lazy: Some(LazyEdge { id, target }),
        });
        node
    }

    pub fn node(&self, id: NodeId) -> &BuildNode {
        &self.nodes[id as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add edge `from --id--> to`. Duplicate edges collapse.
    pub fn connect(&mut self, from: NodeId, id: TransitionId, to: NodeId) {
        self.nodes[from as usize]
            .edges
            .entry(id)
            .or_default()
            .insert(to);
    }

    pub fn connect_epsilon(&mut self, from: NodeId, to: NodeId) {
        self.connect(from, TransitionId::EPSILON, to);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fragment Combinators
    // ─────────────────────────────────────────────────────────────────────

    /// One-token fragment: `entry --id--> exit`.
    pub fn single(&mut self, id: TransitionId) -> Fragment {
        let entry = self.add_node();
        let exit = self.add_node();
        self.connect(entry, id, exit);
        Fragment::new(entry, exit)
    }

    /// One-token fragment whose edge is materialized on first access.
    ///
    /// The exit slot is reserved first so the entry can name it by index.
    pub fn lazy_single(&mut self, id: TransitionId) -> Fragment {
        let exit = self.add_node();
        let entry = self.add_lazy(id, exit);
        Fragment::new(entry, exit)
    }

    /// Language containing only the empty sequence.
    pub fn empty(&mut self) -> Fragment {
        self.single(TransitionId::EPSILON)
    }

    /// `A B`
    pub fn concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.connect_epsilon(first.exit, second.entry);
        Fragment::new(first.entry, second.exit)
    }

    /// `A | B`
    ///
    /// ```text
    ///          ┌─→ A ─┐
    /// entry ─→─┤      ├─→ exit
    ///          └─→ B ─┘
    /// ```
    pub fn alternate(&mut self, first: Fragment, second: Fragment) -> Fragment {
        let entry = self.add_node();
        let exit = self.add_node();

        for f in [first, second] {
            self.connect_epsilon(entry, f.entry);
            self.connect_epsilon(f.exit, exit);
        }

        Fragment::new(entry, exit)
    }

    /// `A*`
    ///
    /// ```text
    ///   ┌──────────────┐
    ///   ↓              │
    ///   N ─→ A.entry … A.exit
    /// ```
    pub fn kleene_star(&mut self, inner: Fragment) -> Fragment {
        let loop_node = self.add_node();
        self.connect_epsilon(loop_node, inner.entry);
        self.connect_epsilon(inner.exit, loop_node);
        Fragment::single(loop_node)
    }

    /// `A+` as `A A*`.
    ///
    /// Both halves share the nodes of `inner`: the concatenation edge
    /// `A.exit → N` coincides with the closure's back-edge, so no copy of
    /// `inner` is needed.
    pub fn one_or_more(&mut self, inner: Fragment) -> Fragment {
        let star = self.kleene_star(inner);
        self.concat(inner, star)
    }

    /// `A?` as `A | ()`.
    pub fn optional(&mut self, inner: Fragment) -> Fragment {
        let empty = self.empty();
        self.alternate(inner, empty)
    }

    /// Freeze the arena into an immutable automaton rooted at `root`.
    pub fn finish(self, root: Fragment) -> Automaton {
        let nodes = self
            .nodes
            .into_iter()
            .map(|n| Node::new(n.edges, n.lazy))
            .collect();
        Automaton::new(nodes, root)
    }
}
