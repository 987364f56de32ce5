//! Compiled pattern: automaton plus binding table.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use seqex_compiler::Automaton;

use crate::Result;
use crate::bindings::{Binding, Bindings, NULL, THIS};
use crate::engine::Matcher;
use crate::nullable::Nullable;

/// A pattern over sequences of `T`.
///
/// Compilation is pure; the only state that changes afterwards is the binding
/// table (through `set*`) and one-time materialization of identifier nodes
/// inside the shared automaton. Bind everything before sharing a pattern
/// across threads: `is_match` takes `&self` and is safe to run concurrently.
pub struct Pattern<T> {
    source: String,
    automaton: Arc<Automaton>,
    bindings: Bindings<T>,
}

impl<T: Nullable + 'static> Pattern<T> {
    /// Compile pattern text and register the default `null` and `this`
    /// bindings.
    pub fn compile(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let automaton = seqex_compiler::compile(&source)?;

        let mut pattern = Self {
            source,
            automaton: Arc::new(automaton),
            bindings: Bindings::new(),
        };
        pattern.set(NULL, Binding::predicate(|x: &T| x.is_null()))?;
        pattern.set(THIS, Binding::Recursive)?;
        Ok(pattern)
    }
}

impl<T> Pattern<T> {
    /// Pattern text exactly as given to `compile`.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn bindings(&self) -> &Bindings<T> {
        &self.bindings
    }

    /// Bind `name`. See [`Bindings::set`].
    pub fn set(&mut self, name: &str, binding: Binding<T>) -> Result<&mut Self> {
        self.bindings.set(name, binding)?;
        Ok(self)
    }

    pub fn set_predicate<F>(&mut self, name: &str, predicate: F) -> Result<&mut Self>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.set(name, Binding::predicate(predicate))
    }

    /// Bind `name` to equality with `value`.
    pub fn set_value(&mut self, name: &str, value: T) -> Result<&mut Self>
    where
        T: PartialEq + Send + Sync + 'static,
    {
        self.set(name, Binding::value(value))
    }

    pub fn set_pattern(
        &mut self,
        name: &str,
        pattern: impl Into<Arc<Pattern<T>>>,
    ) -> Result<&mut Self> {
        self.set(name, Binding::pattern(pattern))
    }

    /// Bind `name` to this pattern itself.
    pub fn set_recursive(&mut self, name: &str) -> Result<&mut Self> {
        self.set(name, Binding::Recursive)
    }

    /// Whole-sequence match with default limits.
    pub fn is_match(&self, input: &[T]) -> Result<bool> {
        Ok(Matcher::builder(self).build().execute(input)?)
    }

    /// Identifiers used by the pattern that currently have no binding, in
    /// order of first appearance.
    pub fn unbound_identifiers(&self) -> Vec<&str> {
        self.automaton
            .identifiers()
            .into_iter()
            .filter(|name| !self.bindings.contains(name))
            .collect()
    }

    /// Every name ever bound on this pattern, defaults included.
    pub fn assigned(&self) -> &IndexSet<String> {
        self.bindings.assigned()
    }
}

impl<T> Clone for Pattern<T> {
    /// The copy shares the automaton and starts with the same bindings.
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            automaton: Arc::clone(&self.automaton),
            bindings: self.bindings.clone(),
        }
    }
}

impl<T> fmt::Debug for Pattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("bindings", &self.bindings)
            .finish()
    }
}

impl<T> fmt::Display for Pattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
