//! Tracing infrastructure for debugging matches.
//!
//! `NoopTracer` methods are empty and `#[inline(always)]`, so a match run
//! with it carries no tracing cost. `PrintTracer` keeps its own nesting depth
//! for indentation; the engine never stores tracing state.

use seqex_compiler::{StateSet, TransitionId};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Scan entry/exit, dead ends, and the verdict.
    #[default]
    Default,
    /// Also the state set at every position.
    Verbose,
    /// Also every transition evaluation.
    VeryVerbose,
}

/// Instrumentation hooks. Positions are offsets into the top-level input.
pub trait Tracer {
    /// A pattern starts scanning forward from `start`.
    fn trace_enter(&mut self, source: &str, start: usize);

    /// Settled state set at `pos`.
    fn trace_states(&mut self, pos: usize, states: &StateSet);

    /// A transition leaving `pos` was evaluated.
    fn trace_transition(&mut self, pos: usize, id: &TransitionId, satisfied: bool);

    /// No states remain at or beyond `pos`.
    fn trace_dead_end(&mut self, pos: usize);

    /// The innermost scan finished, accepting at `ends`.
    fn trace_exit(&mut self, source: &str, ends: &[usize]);

    /// The innermost scan was abandoned because the match failed with an
    /// error.
    fn trace_abort(&mut self, source: &str);

    /// Final answer for the whole input.
    fn trace_verdict(&mut self, matched: bool);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(&mut self, _source: &str, _start: usize) {}

    #[inline(always)]
    fn trace_states(&mut self, _pos: usize, _states: &StateSet) {}

    #[inline(always)]
    fn trace_transition(&mut self, _pos: usize, _id: &TransitionId, _satisfied: bool) {}

    #[inline(always)]
    fn trace_dead_end(&mut self, _pos: usize) {}

    #[inline(always)]
    fn trace_exit(&mut self, _source: &str, _ends: &[usize]) {}

    #[inline(always)]
    fn trace_abort(&mut self, _source: &str) {}

    #[inline(always)]
    fn trace_verdict(&mut self, _matched: bool) {}
}

/// Tracer that collects a human-readable trace.
#[derive(Debug, Default)]
pub struct PrintTracer {
    verbosity: Verbosity,
    lines: Vec<String>,
    depth: usize,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            lines: Vec::new(),
            depth: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Collected trace as one string.
    pub fn dump(&self) -> String {
        self.lines.join("\n")
    }

    /// Print the collected trace to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }

    fn push(&mut self, line: String) {
        self.lines
            .push(format!("{:indent$}{line}", "", indent = self.depth * 2));
    }
}

fn format_states(states: &StateSet) -> String {
    let ids: Vec<String> = states.iter().map(|s| format!("N{s}")).collect();
    format!("{{{}}}", ids.join(", "))
}

impl Tracer for PrintTracer {
    fn trace_enter(&mut self, source: &str, start: usize) {
        self.push(format!("enter `{source}` @{start}"));
        self.depth += 1;
    }

    fn trace_states(&mut self, pos: usize, states: &StateSet) {
        if self.verbosity >= Verbosity::Verbose {
            self.push(format!("@{pos} {}", format_states(states)));
        }
    }

    fn trace_transition(&mut self, pos: usize, id: &TransitionId, satisfied: bool) {
        if self.verbosity >= Verbosity::VeryVerbose {
            let mark = if satisfied { "✓" } else { "✗" };
            self.push(format!("@{pos} {id} {mark}"));
        }
    }

    fn trace_dead_end(&mut self, pos: usize) {
        self.push(format!("@{pos} dead end"));
    }

    fn trace_exit(&mut self, source: &str, ends: &[usize]) {
        self.depth = self.depth.saturating_sub(1);
        self.push(format!("exit `{source}` = {ends:?}"));
    }

    fn trace_abort(&mut self, source: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.push(format!("abort `{source}`"));
    }

    fn trace_verdict(&mut self, matched: bool) {
        self.push(if matched { "match" } else { "no match" }.to_owned());
    }
}
