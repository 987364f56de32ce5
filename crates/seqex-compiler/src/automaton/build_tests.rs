//! Tests for AutomatonBuilder construction and fragment combinators.

use super::*;

fn id(name: &str) -> TransitionId {
    TransitionId::named(name)
}

#[test]
fn single_transition() {
    let mut b = AutomatonBuilder::new();

    let frag = b.single(id("A"));

    assert_eq!(frag, Fragment::new(0, 1));
    insta::assert_snapshot!(b.dump(), @r"
    N0: A → N1
    N1: ∅
    ");
}

#[test]
fn lazy_single_reserves_target_first() {
    let mut b = AutomatonBuilder::new();

    let frag = b.lazy_single(TransitionId::negated("A"));

    assert_eq!(frag, Fragment::new(1, 0));
    assert!(b.node(frag.entry).is_lazy());
    assert!(b.node(frag.entry).edges.is_empty());
    insta::assert_snapshot!(b.dump(), @r"
    N0: ∅
    N1: !A ⇢ N0
    ");
}

#[test]
fn empty_is_single_epsilon() {
    let mut b = AutomatonBuilder::new();

    let frag = b.empty();

    assert_ne!(frag.entry, frag.exit);
    insta::assert_snapshot!(b.dump(), @r"
    N0: ε → N1
    N1: ∅
    ");
}

#[test]
fn concat_two() {
    let mut b = AutomatonBuilder::new();
    let a = b.single(id("A"));
    let c = b.single(id("B"));

    let frag = b.concat(a, c);

    assert_eq!(frag.entry, a.entry);
    assert_eq!(frag.exit, c.exit);
    insta::assert_snapshot!(b.dump(), @r"
    N0: A → N1
    N1: ε → N2
    N2: B → N3
    N3: ∅
    ");
}

#[test]
fn alternate_uses_fresh_junctions() {
    let mut b = AutomatonBuilder::new();
    let a = b.single(id("A"));
    let c = b.single(id("B"));

    let frag = b.alternate(a, c);

    assert_eq!(frag, Fragment::new(4, 5));
    insta::assert_snapshot!(b.dump(), @r"
    N0: A → N1
    N1: ε → N5
    N2: B → N3
    N3: ε → N5
    N4: ε → N0, N2
    N5: ∅
    ");
}

#[test]
fn kleene_star_loops_through_one_node() {
    let mut b = AutomatonBuilder::new();
    let a = b.single(id("A"));

    let frag = b.kleene_star(a);

    assert_eq!(frag, Fragment::single(2));
    insta::assert_snapshot!(b.dump(), @r"
    N0: A → N1
    N1: ε → N2
    N2: ε → N0
    ");
}

#[test]
fn one_or_more_shares_inner() {
    let mut b = AutomatonBuilder::new();
    let a = b.single(id("A"));

    let frag = b.one_or_more(a);

    // Concatenation edge and loop back-edge coincide.
    assert_eq!(frag, Fragment::new(0, 2));
    insta::assert_snapshot!(b.dump(), @r"
    N0: A → N1
    N1: ε → N2
    N2: ε → N0
    ");
}

#[test]
fn optional_is_alternation_with_empty() {
    let mut b = AutomatonBuilder::new();
    let a = b.single(id("A"));

    let frag = b.optional(a);

    assert_eq!(frag, Fragment::new(4, 5));
    insta::assert_snapshot!(b.dump(), @r"
    N0: A → N1
    N1: ε → N5
    N2: ε → N3
    N3: ε → N5
    N4: ε → N0, N2
    N5: ∅
    ");
}

#[test]
fn duplicate_edges_collapse() {
    let mut b = AutomatonBuilder::new();
    let n0 = b.add_node();
    let n1 = b.add_node();

    b.connect_epsilon(n0, n1);
    b.connect_epsilon(n0, n1);
    b.connect(n0, id("A"), n1);

    assert_eq!(b.node(n0).edges.len(), 2);
    assert_eq!(b.node(n0).edges[&TransitionId::EPSILON].len(), 1);
}

#[test]
fn finish_keeps_root() {
    let mut b = AutomatonBuilder::new();
    let a = b.lazy_single(id("A"));
    let c = b.single(TransitionId::WILDCARD);
    let root = b.concat(a, c);

    let automaton = b.finish(root);

    assert_eq!(automaton.entry(), a.entry);
    assert_eq!(automaton.exit(), c.exit);
    assert_eq!(automaton.len(), 4);
    insta::assert_snapshot!(automaton.dump(), @r"
    entry: N1
    exit: N3
    N0: ε → N2
    N1: A ⇢ N0
    N2: . → N3
    N3: ∅
    ");
}
