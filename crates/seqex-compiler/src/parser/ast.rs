//! Parse tree for the pattern language.
//!
//! A tagged union over the fixed node kinds of the grammar. Every node
//! carries the byte span of the source text it was parsed from.

use std::fmt::Write;
use std::ops::Range;

/// Byte range into the pattern source.
pub type Span = Range<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root: wraps the top-level `Expression`.
    Start(Box<Node>),
    /// `ConcatExpr ('|' ConcatExpr)*`. Never empty.
    Expression(Vec<Node>),
    /// `Term*`. Possibly empty.
    ConcatExpr(Vec<Node>),
    /// Wraps one `OperatorExpr`.
    Term(Box<Node>),
    /// Atom followed by zero or more `Operator` nodes.
    OperatorExpr {
        atom: Box<Node>,
        operators: Vec<Node>,
    },
    Identifier(String),
    /// `!name`
    NegativeIdentifier(String),
    /// `^`, `$`, or `.`
    SpecialIdentifier(String),
    /// Postfix operator token text.
    Operator(String),
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Node kind name, as used by [`Node::dump`].
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Start(_) => "Start",
            NodeKind::Expression(_) => "Expression",
            NodeKind::ConcatExpr(_) => "ConcatExpr",
            NodeKind::Term(_) => "Term",
            NodeKind::OperatorExpr { .. } => "OperatorExpr",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::NegativeIdentifier(_) => "NegativeIdentifier",
            NodeKind::SpecialIdentifier(_) => "SpecialIdentifier",
            NodeKind::Operator(_) => "Operator",
        }
    }

    /// Indented tree rendering for tests and debugging.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out, 0).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String, depth: usize) -> std::fmt::Result {
        write!(w, "{:indent$}{}", "", self.kind_name(), indent = depth * 2)?;
        match &self.kind {
            NodeKind::Identifier(text)
            | NodeKind::NegativeIdentifier(text)
            | NodeKind::SpecialIdentifier(text)
            | NodeKind::Operator(text) => writeln!(w, " {text:?}"),
            NodeKind::Start(child) | NodeKind::Term(child) => {
                writeln!(w)?;
                child.format(w, depth + 1)
            }
            NodeKind::Expression(children) | NodeKind::ConcatExpr(children) => {
                writeln!(w)?;
                children.iter().try_for_each(|c| c.format(w, depth + 1))
            }
            NodeKind::OperatorExpr { atom, operators } => {
                writeln!(w)?;
                atom.format(w, depth + 1)?;
                operators.iter().try_for_each(|op| op.format(w, depth + 1))
            }
        }
    }
}

/// Postfix repetition operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
}

impl Quantifier {
    pub fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "*" => Some(Quantifier::Star),
            "+" => Some(Quantifier::Plus),
            "?" => Some(Quantifier::Question),
            _ => None,
        }
    }

    pub fn literal(self) -> &'static str {
        match self {
            Quantifier::Star => "*",
            Quantifier::Plus => "+",
            Quantifier::Question => "?",
        }
    }
}
