//! mini_compiler: Driver for the Mini front end.
//!
//! Orchestrates the scanner and the derivation engine behind a single entry
//! point: source text in, ordered top-level AST sequence or aggregated
//! diagnostics out. The policy is abort-on-first-error: the scanner stops at
//! its first lexical failure and the parser reports exactly one syntax or
//! ambiguity diagnostic, so no partial AST is ever fabricated.
//!
//! Each call is independent and re-entrant. The only cross-call state is the
//! read-only grammar table.

use mini_ast::node::Statement;
use mini_diagnostics::DiagnosticCollection;
use mini_parser::Parser;
use mini_scanner::tokenize;
use thiserror::Error;

/// Parsing failed. Carries every diagnostic the front end produced; under
/// the abort-on-first-error policy that is exactly one.
#[derive(Debug, Clone, Error)]
#[error("parsing failed with {} diagnostic(s)", .diagnostics.len())]
pub struct ParseFailure {
    pub diagnostics: DiagnosticCollection,
}

impl ParseFailure {
    /// The diagnostic messages as plain strings.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.messages()
    }
}

impl From<DiagnosticCollection> for ParseFailure {
    fn from(diagnostics: DiagnosticCollection) -> Self {
        Self { diagnostics }
    }
}

/// The Mini front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniParser;

impl MiniParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse Mini source text into its top-level AST sequence.
    pub fn parse(&self, source: &str) -> Result<Vec<Statement>, ParseFailure> {
        let tokens = tokenize(source)?;
        let statements = Parser::new(tokens).parse()?;
        Ok(statements)
    }
}

/// Convenience wrapper over [`MiniParser::parse`].
pub fn parse(source: &str) -> Result<Vec<Statement>, ParseFailure> {
    MiniParser::new().parse(source)
}
