//! Whole-sequence matcher.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use seqex_compiler::{Automaton, Special, StateSet, TransitionId};

use crate::bindings::Binding;
use crate::pattern::Pattern;

use super::error::RuntimeError;
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for matching.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum total transition evaluations (default: 1,000,000).
    pub(crate) exec_fuel: u32,
    /// Maximum sub-pattern nesting depth (default: 1,024).
    pub(crate) recursion_limit: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 1_000_000,
            recursion_limit: 1024,
        }
    }
}

impl FuelLimits {
    /// Create new fuel limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Matches one pattern against whole input sequences.
pub struct Matcher<'p, T> {
    pattern: &'p Pattern<T>,
    limits: FuelLimits,
}

/// Builder for `Matcher`.
pub struct MatcherBuilder<'p, T> {
    pattern: &'p Pattern<T>,
    limits: FuelLimits,
}

impl<'p, T> MatcherBuilder<'p, T> {
    pub fn new(pattern: &'p Pattern<T>) -> Self {
        Self {
            pattern,
            limits: FuelLimits::default(),
        }
    }

    /// Set the fuel limits.
    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    pub fn build(self) -> Matcher<'p, T> {
        Matcher {
            pattern: self.pattern,
            limits: self.limits,
        }
    }
}

impl<'p, T> Matcher<'p, T> {
    pub fn builder(pattern: &'p Pattern<T>) -> MatcherBuilder<'p, T> {
        MatcherBuilder::new(pattern)
    }

    /// True iff the pattern matches all of `input`.
    pub fn execute(self, input: &[T]) -> Result<bool, RuntimeError> {
        self.execute_with(input, &mut NoopTracer)
    }

    /// Execute with a tracer for debugging.
    ///
    /// The tracer is generic, so `NoopTracer` calls are optimized away
    /// while `PrintTracer` calls collect the trace.
    pub fn execute_with<R: Tracer>(
        self,
        input: &[T],
        tracer: &mut R,
    ) -> Result<bool, RuntimeError> {
        Execution {
            input,
            limits: self.limits,
            exec_fuel: self.limits.exec_fuel,
            memo: HashMap::new(),
            tracer,
        }
        .run(self.pattern)
    }
}

/// (pattern address, start) of a scan.
type MemoKey = (usize, usize);

#[derive(Clone, Debug)]
enum Memo {
    InProgress,
    /// Every end `e` such that the pattern matches `input[start..e]`, ascending.
    Done(Rc<[usize]>),
}

fn memo_key<T>(pattern: &Pattern<T>, start: usize) -> MemoKey {
    (std::ptr::from_ref(pattern).addr(), start)
}

/// Sub-pattern an identifier edge refers to, if it is bound to one.
fn sub_pattern<'p, T>(pattern: &'p Pattern<T>, id: &TransitionId) -> Option<&'p Pattern<T>> {
    if id.is_special() {
        return None;
    }
    pattern
        .bindings()
        .get(id.name())
        .and_then(|binding| binding.sub_pattern(pattern))
}

/// One pattern scanning forward from `start`, collecting the ends at which
/// it accepts. Scans live on an explicit stack, so sub-pattern nesting never
/// grows the native stack.
struct Scan<'p, T> {
    pattern: &'p Pattern<T>,
    start: usize,
    /// States that have arrived at a position and not been settled yet.
    pending: BTreeMap<usize, StateSet>,
    /// Last settled position.
    last: usize,
    ends: Vec<usize>,
}

impl<'p, T> Scan<'p, T> {
    fn new(pattern: &'p Pattern<T>, start: usize) -> Self {
        let entry = StateSet::from([pattern.automaton().entry()]);
        Self {
            pattern,
            start,
            pending: BTreeMap::from([(start, entry)]),
            last: start,
            ends: Vec::new(),
        }
    }
}

/// Why a scan stopped.
enum Yield<'p, T> {
    /// No states remain.
    Finished,
    /// The scan needs the ends of `pattern` from `start` before it can go on.
    Needs(&'p Pattern<T>, usize),
}

/// State of one top-level match. Scan results are memoized for its whole
/// duration, so every (pattern, start) pair is scanned at most once.
struct Execution<'i, 't, T, R> {
    input: &'i [T],
    limits: FuelLimits,
    exec_fuel: u32,
    memo: HashMap<MemoKey, Memo>,
    tracer: &'t mut R,
}

impl<T, R: Tracer> Execution<'_, '_, T, R> {
    fn run(mut self, root: &Pattern<T>) -> Result<bool, RuntimeError> {
        let mut stack = vec![self.open(root, 0)];
        let result = self.drive(&mut stack);

        if result.is_err() {
            while let Some(scan) = stack.pop() {
                self.memo.remove(&memo_key(scan.pattern, scan.start));
                self.tracer.trace_abort(scan.pattern.source());
            }
        }

        let matched = result?;
        self.tracer.trace_verdict(matched);
        Ok(matched)
    }

    /// Resume the innermost scan until the root scan finishes. Returns
    /// whether the root accepted at the end of the input.
    fn drive<'p>(&mut self, stack: &mut Vec<Scan<'p, T>>) -> Result<bool, RuntimeError> {
        while let Some(scan) = stack.last_mut() {
            if let Yield::Needs(sub, start) = self.resume(scan)? {
                // The root is not a nested sub-pattern.
                if stack.len() > self.limits.recursion_limit as usize {
                    return Err(RuntimeError::RecursionLimitExceeded(
                        self.limits.recursion_limit,
                    ));
                }
                stack.push(self.open(sub, start));
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let ends: Rc<[usize]> = done.ends.into();
            self.tracer.trace_exit(done.pattern.source(), &ends);
            let matched = ends.contains(&self.input.len());
            self.memo
                .insert(memo_key(done.pattern, done.start), Memo::Done(ends));

            if stack.is_empty() {
                return Ok(matched);
            }
        }

        Ok(false)
    }

    fn open<'p>(&mut self, pattern: &'p Pattern<T>, start: usize) -> Scan<'p, T> {
        self.memo.insert(memo_key(pattern, start), Memo::InProgress);
        self.tracer.trace_enter(pattern.source(), start);
        Scan::new(pattern, start)
    }

    /// Ends of `pattern` from `start`. `None` if that scan has not run yet;
    /// empty while it is still running.
    fn ends(&self, pattern: &Pattern<T>, start: usize) -> Option<Rc<[usize]>> {
        match self.memo.get(&memo_key(pattern, start))? {
            Memo::InProgress => Some(Rc::from([])),
            Memo::Done(ends) => Some(Rc::clone(ends)),
        }
    }

    /// Settle positions of `scan` in order until it runs out of states or
    /// depends on a scan that has not run yet. Work at a position is only
    /// committed once every scan it depends on is known.
    fn resume<'p>(&mut self, scan: &mut Scan<'p, T>) -> Result<Yield<'p, T>, RuntimeError> {
        let to = self.input.len();
        let pattern = scan.pattern;
        let exit = pattern.automaton().exit();

        while let Some(entry) = scan.pending.first_entry() {
            let pos = *entry.key();
            let at_start = pos == scan.start;
            let at_end = pos == to;

            let states = match self.settle(pattern, entry.get().clone(), pos, at_start, at_end) {
                Ok(states) => states,
                Err(sub) => return Ok(Yield::Needs(sub, pos)),
            };
            // `$` is free only where a run ends; a longer run continues from
            // `states`.
            let accepted = if at_end {
                states.contains(&exit)
            } else {
                match self.settle(pattern, states.clone(), pos, at_start, true) {
                    Ok(closed) => closed.contains(&exit),
                    Err(sub) => return Ok(Yield::Needs(sub, pos)),
                }
            };
            if !at_end {
                if let Some(sub) = self.unscanned(pattern, &states, pos) {
                    return Ok(Yield::Needs(sub, pos));
                }
            }

            entry.remove();
            scan.last = pos;
            self.tracer.trace_states(pos, &states);
            if accepted {
                scan.ends.push(pos);
            }
            if at_end {
                break;
            }
            for (end, targets) in self.advance(pattern, &states, pos)? {
                scan.pending.entry(end).or_default().extend(targets);
            }
        }

        if scan.last < to {
            self.tracer.trace_dead_end(scan.last + 1);
        }
        Ok(Yield::Finished)
    }

    /// Close `states` at `pos`, also crossing sub-pattern edges whose
    /// sub-pattern matches the empty run at `pos`, until nothing changes.
    /// Fails with the first sub-pattern not yet scanned from `pos`.
    fn settle<'p>(
        &self,
        pattern: &'p Pattern<T>,
        mut states: StateSet,
        pos: usize,
        at_start: bool,
        at_end: bool,
    ) -> Result<StateSet, &'p Pattern<T>> {
        let automaton = pattern.automaton();

        loop {
            states = close(automaton, states, at_start, at_end);

            let mut grown = false;
            for id in automaton.outgoing(&states) {
                if id.is_negated() {
                    continue;
                }
                let Some(sub) = sub_pattern(pattern, id) else {
                    continue;
                };
                let ends = self.ends(sub, pos).ok_or(sub)?;
                if ends.first() == Some(&pos) {
                    for target in automaton.traverse(&states, id) {
                        grown |= states.insert(target);
                    }
                }
            }

            if !grown {
                return Ok(states);
            }
        }
    }

    /// First sub-pattern reachable by a consuming edge from `states` that
    /// has not been scanned from `pos` yet.
    fn unscanned<'p>(
        &self,
        pattern: &'p Pattern<T>,
        states: &StateSet,
        pos: usize,
    ) -> Option<&'p Pattern<T>> {
        pattern
            .automaton()
            .outgoing(states)
            .into_iter()
            .filter_map(|id| sub_pattern(pattern, id))
            .find(|sub| self.ends(sub, pos).is_none())
    }

    /// Evaluate the consuming transitions leaving `states` at `pos`. Returns
    /// the landing position and reached states of each satisfied edge.
    fn advance(
        &mut self,
        pattern: &Pattern<T>,
        states: &StateSet,
        pos: usize,
    ) -> Result<Vec<(usize, StateSet)>, RuntimeError> {
        let automaton = pattern.automaton();
        let input = self.input;
        let mut arrivals = Vec::new();

        for id in automaton.outgoing(states) {
            if id.kind().is_zero_width() {
                continue;
            }
            self.consume_fuel()?;

            if id.kind() == Special::Wildcard {
                self.tracer.trace_transition(pos, id, true);
                arrivals.push((pos + 1, automaton.traverse(states, id)));
                continue;
            }

            let binding = pattern
                .bindings()
                .get(id.name())
                .ok_or_else(|| RuntimeError::UnboundIdentifier(id.name().to_owned()))?;

            let sub = match binding {
                Binding::Predicate(predicate) => {
                    let satisfied = predicate(&input[pos]) != id.is_negated();
                    self.tracer.trace_transition(pos, id, satisfied);
                    if satisfied {
                        arrivals.push((pos + 1, automaton.traverse(states, id)));
                    }
                    continue;
                }
                Binding::Pattern(sub) => &**sub,
                Binding::Recursive => pattern,
            };
            let ends = self.ends(sub, pos).unwrap_or_else(|| Rc::from([]));

            // Negated sub-pattern: exactly one element the sub-pattern rejects.
            if id.is_negated() {
                let satisfied = ends.binary_search(&(pos + 1)).is_err();
                self.tracer.trace_transition(pos, id, satisfied);
                if satisfied {
                    arrivals.push((pos + 1, automaton.traverse(states, id)));
                }
                continue;
            }

            let mut satisfied = false;
            for &end in ends.iter().filter(|&&end| end > pos) {
                satisfied = true;
                arrivals.push((end, automaton.traverse(states, id)));
            }
            self.tracer.trace_transition(pos, id, satisfied);
        }

        Ok(arrivals)
    }

    fn consume_fuel(&mut self) -> Result<(), RuntimeError> {
        if self.exec_fuel == 0 {
            return Err(RuntimeError::ExecFuelExhausted(self.limits.exec_fuel));
        }
        self.exec_fuel -= 1;
        Ok(())
    }
}

/// Epsilon closure at one position. `^` edges are free at the first position
/// of a run, `$` edges at the last; on an empty run `^` is crossed first.
fn close(automaton: &Automaton, states: StateSet, at_start: bool, at_end: bool) -> StateSet {
    let free: &[Special] = if at_start {
        &[Special::BeginOfInput]
    } else {
        &[]
    };
    let states = automaton.closure(states, free);
    if at_end {
        automaton.closure(states, &[Special::EndOfInput])
    } else {
        states
    }
}
