use super::*;
use crate::Pattern;

fn letters() -> Pattern<&'static str> {
    let mut pattern = Pattern::compile("A B").unwrap();
    pattern.set_value("A", "A").unwrap().set_value("B", "B").unwrap();
    pattern
}

fn brackets() -> Pattern<&'static str> {
    let mut pattern = Pattern::compile("L this* R").unwrap();
    pattern.set_value("L", "(").unwrap().set_value("R", ")").unwrap();
    pattern
}

fn trace(
    pattern: &Pattern<&'static str>,
    input: &[&'static str],
    verbosity: Verbosity,
) -> String {
    let mut tracer = PrintTracer::new(verbosity);
    Matcher::builder(pattern)
        .build()
        .execute_with(input, &mut tracer)
        .unwrap();
    tracer.dump()
}

#[test]
fn default_verbosity_shows_dead_ends() {
    insta::assert_snapshot!(trace(&letters(), &["B", "A"], Verbosity::Default), @r"
    enter `A B` @0
      @1 dead end
    exit `A B` = []
    no match
    ");
}

#[test]
fn verbose_shows_state_sets() {
    insta::assert_snapshot!(trace(&letters(), &["A", "B"], Verbosity::Verbose), @r"
    enter `A B` @0
      @0 {N1}
      @1 {N0, N3}
      @2 {N2}
    exit `A B` = [2]
    match
    ");
}

#[test]
fn very_verbose_shows_transitions() {
    insta::assert_snapshot!(trace(&letters(), &["A", "B"], Verbosity::VeryVerbose), @r"
    enter `A B` @0
      @0 {N1}
      @0 A ✓
      @1 {N0, N3}
      @1 B ✓
      @2 {N2}
    exit `A B` = [2]
    match
    ");
}

#[test]
fn sub_pattern_scans_are_nested() {
    insta::assert_snapshot!(trace(&brackets(), &["(", ")"], Verbosity::Default), @r"
    enter `L this* R` @0
      enter `L this* R` @1
        @2 dead end
      exit `L this* R` = []
    exit `L this* R` = [2]
    match
    ");
}

#[test]
fn each_start_is_scanned_once() {
    let output = trace(&brackets(), &["(", "(", ")", ")"], Verbosity::Default);
    let enters: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("enter"))
        .collect();

    insta::assert_snapshot!(enters.join("\n"), @r"
    enter `L this* R` @0
    enter `L this* R` @1
    enter `L this* R` @2
    enter `L this* R` @3
    ");
}

#[test]
fn failed_match_aborts_open_scans() {
    let inner: Pattern<i32> = Pattern::compile("X").unwrap();
    let mut outer: Pattern<i32> = Pattern::compile("S").unwrap();
    outer.set_pattern("S", inner).unwrap();

    let mut tracer = PrintTracer::new(Verbosity::Default);
    let err = Matcher::builder(&outer)
        .build()
        .execute_with(&[1], &mut tracer)
        .unwrap_err();

    assert_eq!(err, RuntimeError::UnboundIdentifier("X".to_owned()));
    insta::assert_snapshot!(tracer.dump(), @r"
    enter `S` @0
      enter `X` @0
      abort `X`
    abort `S`
    ");
}

#[test]
fn dump_joins_lines() {
    let mut tracer = PrintTracer::new(Verbosity::Default);
    tracer.trace_enter("A", 0);
    tracer.trace_exit("A", &[1]);
    tracer.trace_verdict(true);

    assert_eq!(tracer.lines(), ["enter `A` @0", "exit `A` = [1]", "match"]);
    assert_eq!(tracer.dump(), "enter `A` @0\nexit `A` = [1]\nmatch");
}

#[test]
fn noop_tracer_changes_nothing() {
    let pattern = brackets();
    let input = ["(", "(", ")", ")"];
    let traced = Matcher::builder(&pattern)
        .build()
        .execute_with(&input, &mut NoopTracer)
        .unwrap();
    assert_eq!(traced, pattern.is_match(&input).unwrap());
}
