//! Name → meaning table consulted while matching.
//!
//! A name is bound either to a predicate over single elements or to a
//! sub-pattern matched against a contiguous run of elements. The two kinds
//! live in separate maps; binding a name in one evicts it from the other, so
//! a name has at most one meaning at a time.

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use seqex_compiler::parser::{SyntaxKind, lex};

use crate::pattern::Pattern;
use crate::{Error, Result};

/// Default binding satisfied by null elements.
pub const NULL: &str = "null";

/// Default binding referring to the pattern that contains it.
pub const THIS: &str = "this";

/// Shared single-element test.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Meaning of one identifier.
pub enum Binding<T> {
    /// Satisfied by one element for which the predicate holds.
    Predicate(Predicate<T>),
    /// Satisfied by a run of elements the sub-pattern matches as a whole.
    Pattern(Arc<Pattern<T>>),
    /// Like `Pattern`, with the sub-pattern being the pattern that owns the
    /// binding table.
    Recursive,
}

impl<T> Binding<T> {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Binding::Predicate(Arc::new(f))
    }

    /// Equality with `value`.
    pub fn value(value: T) -> Self
    where
        T: PartialEq + Send + Sync + 'static,
    {
        Binding::predicate(move |x: &T| *x == value)
    }

    pub fn pattern(pattern: impl Into<Arc<Pattern<T>>>) -> Self {
        Binding::Pattern(pattern.into())
    }

    pub fn is_predicate(&self) -> bool {
        matches!(self, Binding::Predicate(_))
    }

    /// Resolve the sub-pattern this binding refers to, `owner` standing in for
    /// `Recursive`. `None` for predicates.
    pub fn sub_pattern<'a>(&'a self, owner: &'a Pattern<T>) -> Option<&'a Pattern<T>> {
        match self {
            Binding::Predicate(_) => None,
            Binding::Pattern(pattern) => Some(&**pattern),
            Binding::Recursive => Some(owner),
        }
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        match self {
            Binding::Predicate(f) => Binding::Predicate(Arc::clone(f)),
            Binding::Pattern(p) => Binding::Pattern(Arc::clone(p)),
            Binding::Recursive => Binding::Recursive,
        }
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Predicate(_) => f.write_str("Predicate(..)"),
            Binding::Pattern(p) => f.debug_tuple("Pattern").field(&p.source()).finish(),
            Binding::Recursive => f.write_str("Recursive"),
        }
    }
}

pub struct Bindings<T> {
    predicates: IndexMap<String, Binding<T>>,
    patterns: IndexMap<String, Binding<T>>,
    /// Every name ever passed to `set`. Only grows.
    assigned: IndexSet<String>,
}

impl<T> Default for Bindings<T> {
    fn default() -> Self {
        Self {
            predicates: IndexMap::new(),
            patterns: IndexMap::new(),
            assigned: IndexSet::new(),
        }
    }
}

impl<T> Clone for Bindings<T> {
    fn clone(&self) -> Self {
        Self {
            predicates: self.predicates.clone(),
            patterns: self.patterns.clone(),
            assigned: self.assigned.clone(),
        }
    }
}

impl<T> Bindings<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous binding of either kind.
    ///
    /// Fails without changing anything if `name` is not an identifier.
    pub fn set(&mut self, name: &str, binding: Binding<T>) -> Result<()> {
        if !is_identifier(name) {
            return Err(Error::InvalidIdentifier(name.to_owned()));
        }

        if binding.is_predicate() {
            self.patterns.shift_remove(name);
            self.predicates.insert(name.to_owned(), binding);
        } else {
            self.predicates.shift_remove(name);
            self.patterns.insert(name.to_owned(), binding);
        }
        self.assigned.insert(name.to_owned());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Binding<T>> {
        self.predicates.get(name).or_else(|| self.patterns.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name) || self.patterns.contains_key(name)
    }

    pub fn is_predicate(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    pub fn is_pattern(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    pub fn predicate_names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    pub fn pattern_names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    pub fn assigned(&self) -> &IndexSet<String> {
        &self.assigned
    }
}

impl<T> fmt::Debug for Bindings<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("predicates", &self.predicates.keys().collect::<Vec<_>>())
            .field("patterns", &self.patterns)
            .field("assigned", &self.assigned)
            .finish()
    }
}

/// Same rule the pattern lexer applies to plain names.
fn is_identifier(name: &str) -> bool {
    matches!(lex(name).as_slice(), [token] if token.kind == SyntaxKind::Id)
}
