//! mini_parser: Grammar and derivation engine for Mini.
//!
//! The grammar is a table of productions with semantic actions; the engine
//! enumerates every complete derivation of a token stream against it. Zero
//! derivations is a syntax error, more than one is an ambiguity error, and
//! exactly one yields the AST. The engine is grammar-parametric: the shipped
//! Mini grammar is one table, and a different dialect would be another.

mod grammar;
mod parser;

pub use grammar::MINI_GRAMMAR;
pub use parser::{Action, Grammar, Parser, Production, SemanticValue, Symbol};
