//! Tree walker driving the fragment combinators.

use crate::automaton::{Automaton, AutomatonBuilder, Fragment, TransitionId};
use crate::parser::{Node, NodeKind, Quantifier};
use crate::{Error, Result};

/// Compiler state for Thompson construction.
#[derive(Debug, Default)]
pub struct Compiler {
    builder: AutomatonBuilder,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `root` and freeze the result.
    pub fn compile(mut self, root: &Node) -> Result<Automaton> {
        let fragment = self.visit(root)?;
        Ok(self.builder.finish(fragment))
    }

    fn visit(&mut self, node: &Node) -> Result<Fragment> {
        match &node.kind {
            NodeKind::Start(inner) | NodeKind::Term(inner) => self.visit(inner),
            NodeKind::Expression(branches) => self.visit_alternation(branches),
            NodeKind::ConcatExpr(terms) => self.visit_sequence(terms),
            NodeKind::OperatorExpr { atom, operators } => self.visit_quantified(atom, operators),
            NodeKind::Identifier(name) => {
                Ok(self.builder.lazy_single(TransitionId::named(name)))
            }
            NodeKind::NegativeIdentifier(name) => {
                Ok(self.builder.lazy_single(TransitionId::negated(name)))
            }
            NodeKind::SpecialIdentifier(symbol) => {
                let id = TransitionId::special(symbol)?;
                Ok(self.builder.single(id))
            }
            NodeKind::Operator(literal) => Err(Error::Internal(format!(
                "operator `{literal}` outside of an operator expression"
            ))),
        }
    }

    fn visit_alternation(&mut self, branches: &[Node]) -> Result<Fragment> {
        let Some((first, rest)) = branches.split_first() else {
            return Err(Error::Internal("expression without branches".to_owned()));
        };

        let mut fragment = self.visit(first)?;
        for branch in rest {
            let next = self.visit(branch)?;
            fragment = self.builder.alternate(fragment, next);
        }
        Ok(fragment)
    }

    fn visit_sequence(&mut self, terms: &[Node]) -> Result<Fragment> {
        let Some((first, rest)) = terms.split_first() else {
            return Ok(self.builder.empty());
        };

        let mut fragment = self.visit(first)?;
        for term in rest {
            let next = self.visit(term)?;
            fragment = self.builder.concat(fragment, next);
        }
        Ok(fragment)
    }

    fn visit_quantified(&mut self, atom: &Node, operators: &[Node]) -> Result<Fragment> {
        let mut fragment = self.visit(atom)?;

        for op in operators {
            let NodeKind::Operator(literal) = &op.kind else {
                return Err(Error::Internal(format!(
                    "expected operator, found {}",
                    op.kind_name()
                )));
            };
            let Some(quantifier) = Quantifier::from_literal(literal) else {
                return Err(Error::Internal(format!("unknown operator `{literal}`")));
            };

            fragment = match quantifier {
                Quantifier::Star => self.builder.kleene_star(fragment),
                Quantifier::Plus => self.builder.one_or_more(fragment),
                Quantifier::Question => self.builder.optional(fragment),
            };
        }

        Ok(fragment)
    }
}
