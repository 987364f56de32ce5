use std::sync::Arc;

use crate::{Error, Pattern, RuntimeError};

#[test]
fn source_is_kept_verbatim() {
    let text = "  POS? (NEG POS)*\tNEG?  ";
    let pattern: Pattern<i32> = Pattern::compile(text).unwrap();
    assert_eq!(pattern.source(), text);
    assert_eq!(pattern.to_string(), text);
}

#[test]
fn compile_error_carries_pattern() {
    let err = Pattern::<i32>::compile("A (B").unwrap_err();
    let Error::Compile(inner) = &err else {
        panic!("expected compile error, got {err:?}");
    };
    assert!(inner.diagnostics().is_some());
    insta::assert_snapshot!(err, @"invalid pattern `A (B`: 1 syntax errors");
}

#[test]
fn chained_setters() {
    let mut pattern: Pattern<&str> = Pattern::compile("A B").unwrap();
    pattern.set_value("A", "a").unwrap().set_value("B", "b").unwrap();

    assert!(pattern.is_match(&["a", "b"]).unwrap());
    assert!(!pattern.is_match(&["b", "a"]).unwrap());
}

#[test]
fn unbound_identifiers_in_order() {
    let mut pattern: Pattern<i32> = Pattern::compile("B A (null | this)* C A").unwrap();
    assert_eq!(pattern.unbound_identifiers(), ["B", "A", "C"]);

    pattern.set_value("A", 1).unwrap();
    assert_eq!(pattern.unbound_identifiers(), ["B", "C"]);
}

#[test]
fn unbound_identifier_fails_the_match() {
    let mut pattern: Pattern<i32> = Pattern::compile("A B").unwrap();
    pattern.set_value("A", 1).unwrap();

    let err = pattern.is_match(&[1, 2]).unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::UnboundIdentifier(ref name)) if name == "B"
    ));
    insta::assert_snapshot!(err, @"identifier `B` is not bound to a predicate or pattern");
}

#[test]
fn unbound_identifier_not_reached_is_fine() {
    let mut pattern: Pattern<i32> = Pattern::compile("A B").unwrap();
    pattern.set_value("A", 1).unwrap();

    // Scan dies at the first element, before `B` is ever evaluated.
    assert!(!pattern.is_match(&[2, 2]).unwrap());
    assert!(!pattern.is_match(&[]).unwrap());
}

#[test]
fn assigned_includes_defaults() {
    let mut pattern: Pattern<i32> = Pattern::compile("A").unwrap();
    pattern.set_value("A", 1).unwrap();

    let assigned: Vec<_> = pattern.assigned().iter().map(String::as_str).collect();
    assert_eq!(assigned, ["null", "this", "A"]);
}

#[test]
fn defaults_can_be_overridden() {
    let mut pattern: Pattern<i32> = Pattern::compile("null").unwrap();
    assert!(!pattern.is_match(&[0]).unwrap());

    pattern.set_predicate("null", |v| *v == 0).unwrap();
    assert!(pattern.is_match(&[0]).unwrap());

    let mut this: Pattern<i32> = Pattern::compile("this").unwrap();
    this.set_value("this", 7).unwrap();
    assert!(this.is_match(&[7]).unwrap());
    assert!(this.bindings().is_predicate("this"));
}

#[test]
fn clone_shares_automaton_but_not_bindings() {
    let mut original: Pattern<i32> = Pattern::compile("A").unwrap();
    original.set_value("A", 1).unwrap();

    let mut copy = original.clone();
    copy.set_value("A", 2).unwrap();

    assert!(std::ptr::eq(original.automaton(), copy.automaton()));
    assert!(original.is_match(&[1]).unwrap());
    assert!(copy.is_match(&[2]).unwrap());
    assert!(!copy.is_match(&[1]).unwrap());
}

#[test]
fn shared_sub_pattern() {
    let mut digit: Pattern<char> = Pattern::compile("D+").unwrap();
    digit.set_predicate("D", char::is_ascii_digit).unwrap();
    let digits = Arc::new(digit);

    let mut pair: Pattern<char> = Pattern::compile("N S N").unwrap();
    pair.set_pattern("N", Arc::clone(&digits)).unwrap();
    pair.set_value("S", ',').unwrap();

    let input: Vec<char> = "12,345".chars().collect();
    assert!(pair.is_match(&input).unwrap());

    let input: Vec<char> = "12,".chars().collect();
    assert!(!pair.is_match(&input).unwrap());
}

#[test]
fn pattern_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Pattern<i32>>();
    assert_send_sync::<Pattern<Option<String>>>();
}
