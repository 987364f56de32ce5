//! Transition identifiers: the labels on automaton edges.
//!
//! An identifier is a name plus a special kind plus a negation flag. All three
//! take part in equality and hashing, so `A` and `!A` label distinct edges.

use std::borrow::Cow;
use std::fmt;

use crate::{Error, Result};

/// Symbol of the internal epsilon marker. Never produced by the lexer.
pub const EPSILON_MARKER: &str = "ε";

/// Kind of a transition identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Special {
    /// Plain named identifier, resolved through the binding table.
    None,
    /// Zero-width edge, always free.
    Epsilon,
    /// `^`: zero-width edge, free only before the first token.
    BeginOfInput,
    /// `$`: zero-width edge, free only after the last token.
    EndOfInput,
    /// `.`: consumes any single token.
    Wildcard,
}

impl Special {
    /// Parse a special marker symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "^" => Some(Special::BeginOfInput),
            "$" => Some(Special::EndOfInput),
            "." => Some(Special::Wildcard),
            EPSILON_MARKER => Some(Special::Epsilon),
            _ => None,
        }
    }

    /// Marker symbol. Empty for plain identifiers.
    pub const fn symbol(self) -> &'static str {
        match self {
            Special::None => "",
            Special::Epsilon => EPSILON_MARKER,
            Special::BeginOfInput => "^",
            Special::EndOfInput => "$",
            Special::Wildcard => ".",
        }
    }

    /// Zero-width kinds never consume a token.
    pub fn is_zero_width(self) -> bool {
        matches!(
            self,
            Special::Epsilon | Special::BeginOfInput | Special::EndOfInput
        )
    }
}

/// Label of an automaton edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionId {
    name: Cow<'static, str>,
    special: Special,
    negated: bool,
}

impl TransitionId {
    pub const EPSILON: Self = Self::fixed(Special::Epsilon);
    pub const BEGIN_OF_INPUT: Self = Self::fixed(Special::BeginOfInput);
    pub const END_OF_INPUT: Self = Self::fixed(Special::EndOfInput);
    pub const WILDCARD: Self = Self::fixed(Special::Wildcard);

    const fn fixed(special: Special) -> Self {
        Self {
            name: Cow::Borrowed(special.symbol()),
            special,
            negated: false,
        }
    }

    /// Plain named identifier.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// Named identifier with the negation flag set (`!name`).
    pub fn negated(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn new(name: impl Into<String>, negated: bool) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            special: Special::None,
            negated,
        }
    }

    /// One of the fixed special identifiers for `^`, `$`, `.`, or the epsilon marker.
    pub fn special(symbol: &str) -> Result<Self> {
        match Special::from_symbol(symbol) {
            Some(Special::BeginOfInput) => Ok(Self::BEGIN_OF_INPUT),
            Some(Special::EndOfInput) => Ok(Self::END_OF_INPUT),
            Some(Special::Wildcard) => Ok(Self::WILDCARD),
            Some(Special::Epsilon) => Ok(Self::EPSILON),
            Some(Special::None) | None => Err(Error::UnknownSpecial(symbol.to_owned())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Special {
        self.special
    }

    pub fn is_special(&self) -> bool {
        self.special != Special::None
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_epsilon(&self) -> bool {
        self.special == Special::Epsilon
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        f.write_str(&self.name)
    }
}
