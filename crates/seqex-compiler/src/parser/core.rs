//! Parser state and low-level token operations.

use super::ast::{Node, Span};
use super::lexer::{SyntaxKind, Token, token_text};
use crate::diagnostics::Diagnostics;
use crate::{Error, Result};

/// Default maximum group nesting depth.
pub const DEFAULT_RECURSION_FUEL: u32 = 512;

/// Trivia is dropped up front; the parse tree is not lossless.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    pub(super) diagnostics: Diagnostics,
    depth: u32,
    recursion_fuel_limit: u32,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        let tokens = tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect();
        Self {
            source,
            tokens,
            pos: 0,
            diagnostics: Diagnostics::new(),
            depth: 0,
            recursion_fuel_limit: DEFAULT_RECURSION_FUEL,
            fatal_error: None,
        }
    }

    pub fn with_recursion_fuel(mut self, limit: u32) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    /// Parse the whole source. Any diagnostic fails the parse.
    pub fn parse(mut self) -> Result<Node> {
        let root = self.parse_start();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        if self.diagnostics.has_errors() {
            return Err(Error::Syntax {
                pattern: self.source.to_owned(),
                diagnostics: self.diagnostics,
            });
        }
        Ok(root)
    }

    pub(super) fn current(&self) -> SyntaxKind {
        self.tokens.get(self.pos).map_or(SyntaxKind::Eof, |t| t.kind)
    }

    pub(super) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or_else(|| self.eof_offset()..self.eof_offset(), |t| t.span.clone())
    }

    pub(super) fn current_text(&self) -> &'src str {
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(super) fn currently_is(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn eof_offset(&self) -> usize {
        self.source.len()
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.eof() || self.fatal_error.is_some()
    }

    pub(super) fn bump(&mut self) {
        if !self.eof() {
            self.pos += 1;
        }
    }

    /// End offset of the last consumed token, or `start` if nothing was
    /// consumed since `start`.
    pub(super) fn last_end(&self, start: usize) -> usize {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(t) if t.span.end > start => t.span.end,
            _ => start,
        }
    }

    /// Returns false (and records a fatal error) when nesting is too deep.
    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.depth >= self.recursion_fuel_limit {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            self.pos = self.tokens.len();
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
