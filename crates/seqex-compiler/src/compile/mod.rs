//! Thompson construction: parse tree to automaton.
//!
//! Each grammar construct maps to one fragment combinator of
//! [`AutomatonBuilder`](crate::automaton::AutomatonBuilder):
//!
//! - `ConcatExpr` folds its terms with `concat` (empty concat is `empty`)
//! - `Expression` folds its branches with `alternate`
//! - postfix operators apply `kleene_star`, `one_or_more`, `optional` in order
//! - named identifiers become lazy single-edge fragments
//! - `^`, `$`, `.` become concrete single-edge fragments

mod compiler;


pub use compiler::Compiler;

use crate::Result;
use crate::automaton::Automaton;
use crate::parser::{self, Node};

/// Parse and compile pattern text.
pub fn compile(source: &str) -> Result<Automaton> {
    let root = parser::parse(source)?;
    compile_tree(&root)
}

/// Compile an already parsed tree.
pub fn compile_tree(root: &Node) -> Result<Automaton> {
    Compiler::new().compile(root)
}
