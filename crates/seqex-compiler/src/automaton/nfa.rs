//! Frozen automaton used by the matcher.
//!
//! The structure is immutable after `AutomatonBuilder::finish`. The only
//! change a caller can observe is lazy-node materialization, which happens at
//! most once per node and is safe under concurrent first access.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use indexmap::IndexSet;

use super::build::{Edges, Fragment, LazyEdge, NodeId};
use super::ids::{Special, TransitionId};

/// Set of automaton states, ordered for deterministic iteration and display.
pub type StateSet = BTreeSet<NodeId>;

/// A node of the frozen automaton.
///
/// Concrete nodes expose `edges` directly. Lazy nodes compute their adjacency
/// once, from the edges recorded at construction time plus their deferred
/// edge, and cache it.
#[derive(Debug)]
pub struct Node {
    edges: Edges,
    lazy: Option<LazyEdge>,
    materialized: OnceLock<Edges>,
}

impl Node {
    pub(crate) fn new(edges: Edges, lazy: Option<LazyEdge>) -> Self {
        Self {
            edges,
            lazy,
            materialized: OnceLock::new(),
        }
    }

    pub fn is_lazy(&self) -> bool {
        self.lazy.is_some()
    }

    /// True once the adjacency is available without further work.
    pub fn is_materialized(&self) -> bool {
        self.lazy.is_none() || self.materialized.get().is_some()
    }

    /// Deferred edge of a lazy node.
    pub fn lazy_edge(&self) -> Option<&LazyEdge> {
        self.lazy.as_ref()
    }

    /// Outgoing edges, materializing a lazy node on first access.
    pub fn transitions(&self) -> &Edges {
        match &self.lazy {
            None => &self.edges,
            Some(lazy) => self
                .materialized
                .get_or_init(|| materialize(&self.edges, lazy)),
        }
    }

    /// Edges recorded at construction time, without materializing.
    pub(crate) fn eager_edges(&self) -> &Edges {
        &self.edges
    }
}

/// Builds a lazy node's adjacency from its identity and target index only.
///
/// Must not consult the node's own `transitions()`: that would re-enter the
/// initialization in progress.
fn materialize(eager: &Edges, lazy: &LazyEdge) -> Edges {
    let mut edges = eager.clone();
    edges
        .entry(lazy.id.clone())
        .or_default()
        .insert(lazy.target);
    edges
}

/// Compiled nondeterministic automaton with one entry and one accepting exit.
#[derive(Debug)]
pub struct Automaton {
    nodes: Vec<Node>,
    root: Fragment,
}

impl Automaton {
    pub(crate) fn new(nodes: Vec<Node>, root: Fragment) -> Self {
        Self { nodes, root }
    }

    /// Start state (the "tail" of the root fragment).
    pub fn entry(&self) -> NodeId {
        self.root.entry
    }

    /// Accepting state (the "head" of the root fragment).
    pub fn exit(&self) -> NodeId {
        self.root.exit
    }

    pub fn root(&self) -> Fragment {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as NodeId, n))
    }

    /// Initial state set: closure of the entry over epsilon and `^` edges.
    pub fn initial_states(&self) -> StateSet {
        self.closure(
            StateSet::from([self.entry()]),
            &[Special::BeginOfInput],
        )
    }

    /// Maximal superset of `states` reachable through epsilon edges and edges
    /// of the additional `free` kinds.
    pub fn closure(&self, states: StateSet, free: &[Special]) -> StateSet {
        let mut closure = states;
        let mut worklist: Vec<NodeId> = closure.iter().copied().collect();

        while let Some(state) = worklist.pop() {
            for (id, targets) in self.node(state).transitions() {
                if !(id.is_epsilon() || free.contains(&id.kind())) {
                    continue;
                }
                for &target in targets {
                    if closure.insert(target) {
                        worklist.push(target);
                    }
                }
            }
        }

        closure
    }

    /// Distinct identifiers leaving `states`, in first-seen order.
    pub fn outgoing<'a>(&'a self, states: &StateSet) -> IndexSet<&'a TransitionId> {
        let mut ids = IndexSet::new();
        for &state in states {
            ids.extend(self.node(state).transitions().keys());
        }
        ids
    }

    /// States reachable from `states` by exactly one `id` edge.
    pub fn traverse(&self, states: &StateSet, id: &TransitionId) -> StateSet {
        let mut next = StateSet::new();
        for &state in states {
            if let Some(targets) = self.node(state).transitions().get(id) {
                next.extend(targets.iter().copied());
            }
        }
        next
    }

    /// Names of the plain (non-special) identifiers labelling any edge.
    ///
    /// Reads deferred edges without materializing them.
    pub fn identifiers(&self) -> IndexSet<&str> {
        let mut names = IndexSet::new();
        for node in &self.nodes {
            let eager = node.eager_edges().keys();
            let deferred = node.lazy_edge().map(|l| &l.id);
            for id in eager.chain(deferred) {
                if !id.is_special() {
                    names.insert(id.name());
                }
            }
        }
        names
    }

    /// Number of lazy nodes whose adjacency has been computed.
    pub fn materialized_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.is_lazy() && n.is_materialized())
            .count()
    }
}
