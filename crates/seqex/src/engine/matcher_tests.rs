use std::sync::Arc;

use super::*;
use crate::Pattern;

fn brackets() -> Pattern<&'static str> {
    let mut pattern = Pattern::compile("L this* R").unwrap();
    pattern.set_value("L", "(").unwrap().set_value("R", ")").unwrap();
    pattern
}

fn run(
    pattern: &Pattern<&'static str>,
    limits: FuelLimits,
    input: &[&'static str],
) -> Result<bool, RuntimeError> {
    Matcher::builder(pattern).limits(limits).build().execute(input)
}

#[test]
fn fuel_limits_builder() {
    let limits = FuelLimits::new().exec_fuel(10).recursion_limit(3);
    assert_eq!(limits.get_exec_fuel(), 10);
    assert_eq!(limits.get_recursion_limit(), 3);

    let defaults = FuelLimits::default();
    assert_eq!(defaults.get_exec_fuel(), 1_000_000);
    assert_eq!(defaults.get_recursion_limit(), 1024);
}

#[test]
fn exec_fuel_exhausted() {
    let mut pattern: Pattern<i32> = Pattern::compile("A*").unwrap();
    pattern.set_value("A", 1).unwrap();
    let input = [1; 10];

    let err = Matcher::builder(&pattern)
        .exec_fuel(5)
        .build()
        .execute(&input)
        .unwrap_err();
    assert_eq!(err, RuntimeError::ExecFuelExhausted(5));

    let ok = Matcher::builder(&pattern).exec_fuel(10).build().execute(&input);
    assert_eq!(ok, Ok(true));
}

#[test]
fn recursion_limit_exceeded() {
    let pattern = brackets();
    let nested = ["(", "(", ")", ")"];

    let err = run(&pattern, FuelLimits::new().recursion_limit(1), &nested).unwrap_err();
    assert_eq!(err, RuntimeError::RecursionLimitExceeded(1));
    insta::assert_snapshot!(err, @"runtime recursion limit exceeded (1 nested sub-patterns)");

    assert_eq!(run(&pattern, FuelLimits::new().recursion_limit(1), &["(", ")"]), Ok(true));
    assert_eq!(run(&pattern, FuelLimits::default(), &nested), Ok(true));
}

fn nested(depth: usize) -> Vec<&'static str> {
    let mut input = vec!["("; depth];
    input.extend(std::iter::repeat_n(")", depth));
    input
}

#[test]
fn deep_nesting_runs_on_a_default_thread_stack() {
    let handle = std::thread::spawn(|| {
        let pattern = brackets();
        let limits = FuelLimits::new().exec_fuel(u32::MAX);
        run(&pattern, limits, &nested(1000))
    });
    assert_eq!(handle.join().unwrap(), Ok(true));
}

#[test]
fn nesting_past_the_default_limit_is_an_error() {
    let pattern = brackets();
    let limits = FuelLimits::new().exec_fuel(u32::MAX);

    let err = run(&pattern, limits, &nested(1100)).unwrap_err();
    assert_eq!(err, RuntimeError::RecursionLimitExceeded(1024));
}

#[test]
fn deep_nesting_fits_default_fuel() {
    let pattern = brackets();
    assert!(pattern.is_match(&nested(400)).unwrap());

    let mut unbalanced = nested(400);
    unbalanced.pop();
    assert!(!pattern.is_match(&unbalanced).unwrap());
}

#[test]
fn balanced_brackets() {
    let pattern = brackets();
    let cases: &[(&[&str], bool)] = &[
        (&["(", ")"], true),
        (&["(", "(", ")"], false),
        (&["(", "(", ")", "(", ")", ")"], true),
        (&["(", ")", "(", ")"], false),
        (&["(", "(", "(", ")", ")", ")"], true),
        (&[")", "("], false),
        (&[], false),
    ];

    for &(input, expected) in cases {
        assert_eq!(pattern.is_match(input).unwrap(), expected, "{input:?}");
    }
}

#[test]
fn sub_pattern_matching_empty_run() {
    let mut filler: Pattern<i32> = Pattern::compile("Z*").unwrap();
    filler.set_value("Z", 0).unwrap();

    let mut pattern: Pattern<i32> = Pattern::compile("A F B").unwrap();
    pattern
        .set_value("A", 1)
        .unwrap()
        .set_value("B", 2)
        .unwrap()
        .set_pattern("F", filler)
        .unwrap();

    assert!(pattern.is_match(&[1, 2]).unwrap());
    assert!(pattern.is_match(&[1, 0, 0, 2]).unwrap());
    assert!(!pattern.is_match(&[1, 3, 2]).unwrap());
}

#[test]
fn left_recursion_terminates() {
    let mut pattern: Pattern<i32> = Pattern::compile("this | A").unwrap();
    pattern.set_value("A", 1).unwrap();

    assert!(pattern.is_match(&[1]).unwrap());
    assert!(!pattern.is_match(&[2]).unwrap());
    assert!(!pattern.is_match(&[]).unwrap());
}

#[test]
fn negated_sub_pattern_consumes_one_element() {
    let mut one: Pattern<i32> = Pattern::compile("A").unwrap();
    one.set_value("A", 1).unwrap();

    let mut pattern: Pattern<i32> = Pattern::compile("!S").unwrap();
    pattern.set_pattern("S", Arc::new(one)).unwrap();

    assert!(pattern.is_match(&[2]).unwrap());
    assert!(!pattern.is_match(&[1]).unwrap());
    assert!(!pattern.is_match(&[2, 2]).unwrap());
    assert!(!pattern.is_match(&[]).unwrap());
}

#[test]
fn anchors_are_relative_to_the_sub_run() {
    let mut inner: Pattern<i32> = Pattern::compile("^ A $").unwrap();
    inner.set_value("A", 1).unwrap();

    let mut pattern: Pattern<i32> = Pattern::compile("S S").unwrap();
    pattern.set_pattern("S", inner).unwrap();

    assert!(pattern.is_match(&[1, 1]).unwrap());
}

#[test]
fn wildcard_accepts_null() {
    let pattern: Pattern<Option<i32>> = Pattern::compile(".").unwrap();
    assert!(pattern.is_match(&[None]).unwrap());
    assert!(pattern.is_match(&[Some(3)]).unwrap());
    assert!(!pattern.is_match(&[]).unwrap());
    assert!(!pattern.is_match(&[None, None]).unwrap());
}

#[test]
fn traced_and_untraced_agree() {
    let pattern = brackets();
    let input = ["(", "(", ")", "(", ")", ")"];

    let mut tracer = PrintTracer::new(Verbosity::VeryVerbose);
    let traced = Matcher::builder(&pattern)
        .build()
        .execute_with(&input, &mut tracer)
        .unwrap();

    assert!(traced);
    assert_eq!(traced, pattern.is_match(&input).unwrap());
    assert!(!tracer.lines().is_empty());
}

#[test]
fn concurrent_matches_share_one_pattern() {
    let pattern = &brackets();
    let inputs: [&[&str]; 4] = [
        &["(", ")"],
        &["(", "(", ")", ")"],
        &["(", ")", ")"],
        &["(", "(", ")", "(", ")", ")"],
    ];

    let results: Vec<bool> = std::thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| s.spawn(move || pattern.is_match(input).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, [true, true, false, true]);
}
