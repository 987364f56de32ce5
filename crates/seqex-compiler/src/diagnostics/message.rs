use std::fmt;

use crate::parser::ast::Span;

/// Syntax diagnostic kinds, ordered by priority (highest priority first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascade through the rest of the pattern
    UnclosedGroup,
    UnmatchedParen,

    // User omitted something required
    MissingOperand,
    ExpectedIdentifier,

    // User wrote something that doesn't belong
    UnexpectedToken,
}

impl DiagnosticKind {
    /// Base message for this diagnostic kind.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            DiagnosticKind::UnclosedGroup => "missing closing `)`",
            DiagnosticKind::UnmatchedParen => "unmatched `)`",
            DiagnosticKind::MissingOperand => "operator has nothing to repeat",
            DiagnosticKind::ExpectedIdentifier => "expected identifier after `!`",
            DiagnosticKind::UnexpectedToken => "unexpected input",
        }
    }

    /// Render the message, appending custom detail when given.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            Some(detail) => format!("{}; {}", self.fallback_message(), detail),
            None => self.fallback_message().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            span,
            message: kind.message(None),
            related: Vec::new(),
        }
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            self.span.start, self.span.end, self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.span.start, related.span.end
            )?;
        }
        Ok(())
    }
}
