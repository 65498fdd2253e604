//! mini_ast: Abstract Syntax Tree definitions for the Mini front end.
//!
//! The node catalog here is the canonical, cross-front-end shape consumed by
//! the downstream analysis toolchain: every front end in the family emits
//! these nodes with these field names and operator tags. Nodes are plain
//! immutable values; equality is structural.

pub mod node;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use visitor::AstVisitor;
