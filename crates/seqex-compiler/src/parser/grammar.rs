//! Recursive-descent grammar.
//!
//! ```text
//! Start      := Expression
//! Expression := ConcatExpr ('|' ConcatExpr)*
//! ConcatExpr := Term*
//! Term       := Atom Operator*
//! Atom       := Id | '!' Id | '.' | '^' | '$' | '(' Expression ')'
//! Operator   := '*' | '+' | '?'
//! ```
//!
//! Errors are reported as diagnostics and parsing continues, so one pass
//! reports every problem in the pattern. The tree built alongside errors is
//! never compiled.

use super::ast::{Node, NodeKind};
use super::core::Parser;
use super::lexer::SyntaxKind;
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub(super) fn parse_start(&mut self) -> Node {
        let expr = self.parse_expression();

        while !self.should_stop() {
            let kind = self.current();
            let span = self.current_span();
            let diagnostic = if kind == SyntaxKind::ParenClose {
                DiagnosticKind::UnmatchedParen
            } else {
                DiagnosticKind::UnexpectedToken
            };
            self.diagnostics.report(diagnostic, span).emit();
            self.bump();
            // Keep going to surface later errors too.
            let _ = self.parse_expression();
        }

        Node::new(NodeKind::Start(Box::new(expr)), 0..self.source.len())
    }

    fn parse_expression(&mut self) -> Node {
        let start = self.current_span().start;
        let mut branches = vec![self.parse_concat()];

        while self.currently_is(SyntaxKind::Pipe) {
            self.bump();
            branches.push(self.parse_concat());
        }

        Node::new(NodeKind::Expression(branches), start..self.last_end(start))
    }

    fn parse_concat(&mut self) -> Node {
        let start = self.current_span().start;
        let mut terms = Vec::new();

        while !self.should_stop() {
            let kind = self.current();
            if kind.starts_atom() {
                terms.push(self.parse_term());
            } else if kind.is_operator() {
                let span = self.current_span();
                let literal = self.current_text().to_owned();
                self.diagnostics
                    .report(DiagnosticKind::MissingOperand, span)
                    .message(format!("`{literal}` must follow an atom"))
                    .emit();
                self.bump();
            } else if kind == SyntaxKind::Garbage {
                let span = self.current_span();
                self.diagnostics
                    .report(DiagnosticKind::UnexpectedToken, span)
                    .emit();
                self.bump();
            } else {
                break;
            }
        }

        Node::new(NodeKind::ConcatExpr(terms), start..self.last_end(start))
    }

    fn parse_term(&mut self) -> Node {
        let inner = self.parse_operator_expr();
        let span = inner.span.clone();
        Node::new(NodeKind::Term(Box::new(inner)), span)
    }

    fn parse_operator_expr(&mut self) -> Node {
        let atom = self.parse_atom();
        let start = atom.span.start;
        let mut operators = Vec::new();

        while self.current().is_operator() {
            let span = self.current_span();
            let literal = self.current_text().to_owned();
            operators.push(Node::new(NodeKind::Operator(literal), span));
            self.bump();
        }

        Node::new(
            NodeKind::OperatorExpr {
                atom: Box::new(atom),
                operators,
            },
            start..self.last_end(start),
        )
    }

    fn parse_atom(&mut self) -> Node {
        let span = self.current_span();
        match self.current() {
            SyntaxKind::Id => {
                let name = self.current_text().to_owned();
                self.bump();
                Node::new(NodeKind::Identifier(name), span)
            }
            SyntaxKind::Dot | SyntaxKind::Caret | SyntaxKind::Dollar => {
                let symbol = self.current_text().to_owned();
                self.bump();
                Node::new(NodeKind::SpecialIdentifier(symbol), span)
            }
            SyntaxKind::Negation => {
                self.bump();
                self.parse_negated(span.start)
            }
            SyntaxKind::ParenOpen => self.parse_group(),
            _ => unreachable!("parse_atom called on a token that cannot start an atom"),
        }
    }

    fn parse_negated(&mut self, start: usize) -> Node {
        if !self.currently_is(SyntaxKind::Id) {
            let span = self.current_span();
            self.diagnostics
                .report(DiagnosticKind::ExpectedIdentifier, span)
                .emit();
            return Node::new(NodeKind::NegativeIdentifier(String::new()), start..start + 1);
        }

        let name = self.current_text().to_owned();
        let end = self.current_span().end;
        self.bump();
        Node::new(NodeKind::NegativeIdentifier(name), start..end)
    }

    fn parse_group(&mut self) -> Node {
        let open = self.current_span();
        if !self.enter_recursion() {
            return Node::new(NodeKind::Expression(Vec::new()), open);
        }
        self.bump();

        let mut inner = self.parse_expression();

        let end = if self.currently_is(SyntaxKind::ParenClose) {
            let end = self.current_span().end;
            self.bump();
            end
        } else {
            let span = self.current_span();
            self.diagnostics
                .report(DiagnosticKind::UnclosedGroup, span.clone())
                .related_to("group opened here", open.clone())
                .emit();
            span.start
        };

        self.exit_recursion();
        inner.span = open.start..end;
        inner
    }
}
