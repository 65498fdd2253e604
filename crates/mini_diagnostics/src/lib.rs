//! mini_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Defines every diagnostic the Mini front end can emit. Diagnostics fall
//! into three kinds: lexical failures from the scanner, syntax failures from
//! the parser, and ambiguity failures when an input admits more than one
//! derivation. All of them propagate to the caller; none are recovered from.

use mini_core::text::Position;
use std::fmt;

/// The kind of a diagnostic, mirroring the front end's failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An unrecognized or malformed character sequence in the source text.
    Lexical,
    /// A token stream that matches no derivation of the grammar.
    Syntax,
    /// A token stream that matches more than one derivation of the grammar.
    Ambiguity,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "lexical error"),
            DiagnosticKind::Syntax => write!(f, "syntax error"),
            DiagnosticKind::Ambiguity => write!(f, "ambiguity error"),
        }
    }
}

/// A diagnostic message template. May contain `{0}`, `{1}`, etc. placeholders
/// that are substituted when the diagnostic is realized.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The kind of diagnostic this template produces.
    pub kind: DiagnosticKind,
    /// The message template string.
    pub message: &'static str,
}

/// A realized diagnostic with resolved message text and, where it applies,
/// the source position it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The kind of failure.
    pub kind: DiagnosticKind,
    /// The resolved message text.
    pub message_text: String,
    /// Where the failure occurred. Ambiguity diagnostics describe the whole
    /// input and carry no position.
    pub position: Option<Position>,
}

impl Diagnostic {
    /// Create a diagnostic without a position.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            kind: message.kind,
            message_text: format_message(message.message, args),
            position: None,
        }
    }

    /// Create a diagnostic anchored at a source position.
    pub fn at(position: Position, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            kind: message.kind,
            message_text: format_message(message.message, args),
            position: Some(position),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message_text)
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a single parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// The diagnostic messages as plain strings, the surface the downstream
    /// toolchain consumes.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|d| d.message_text.clone())
            .collect()
    }
}

// ============================================================================
// Diagnostic messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($kind:ident, $msg:expr) => {
            DiagnosticMessage {
                kind: DiagnosticKind::$kind,
                message: $msg,
            }
        };
    }

    // ------------------------------------------------------------------------
    // Scanner errors
    // ------------------------------------------------------------------------
    pub const INVALID_CHARACTER: DiagnosticMessage =
        diag!(Lexical, "Invalid character '{0}' at line {1} col {2}.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage =
        diag!(Lexical, "Unterminated string literal at line {0} col {1}.");
    pub const UNTERMINATED_CHAR_LITERAL: DiagnosticMessage =
        diag!(Lexical, "Unterminated character literal at line {0} col {1}.");
    pub const EMPTY_CHAR_LITERAL: DiagnosticMessage = diag!(
        Lexical,
        "Character literal at line {0} col {1} must contain exactly one character."
    );
    pub const UNTERMINATED_BLOCK_COMMENT: DiagnosticMessage =
        diag!(Lexical, "Unterminated block comment at line {0} col {1}.");
    pub const INVALID_ESCAPE_SEQUENCE: DiagnosticMessage =
        diag!(Lexical, "Invalid escape sequence '\\{0}' at line {1} col {2}.");
    pub const INVALID_UNICODE_ESCAPE: DiagnosticMessage =
        diag!(Lexical, "Invalid unicode escape at line {0} col {1}.");

    // ------------------------------------------------------------------------
    // Parser errors
    // ------------------------------------------------------------------------
    pub const UNEXPECTED_TOKEN: DiagnosticMessage =
        diag!(Syntax, "Unexpected '{0}' token '{1}' at line {2} col {3}.");
    pub const RECURSION_LIMIT_EXCEEDED: DiagnosticMessage =
        diag!(Syntax, "Input is nested too deeply to parse.");

    // ------------------------------------------------------------------------
    // Ambiguity errors
    // ------------------------------------------------------------------------
    pub const AMBIGUOUS_PARSE: DiagnosticMessage = diag!(
        Ambiguity,
        "Ambiguous parse: {0} derivations produced for the same input."
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message("Unexpected '{0}' token '{1}' at line {2} col {3}.", &[
                "semicolon", ";", "1", "5"
            ]),
            "Unexpected 'semicolon' token ';' at line 1 col 5."
        );
    }

    #[test]
    fn test_collection() {
        let mut collection = DiagnosticCollection::new();
        assert!(collection.is_empty());
        collection.add(Diagnostic::at(
            Position::new(2, 4),
            &messages::INVALID_CHARACTER,
            &["@", "2", "4"],
        ));
        assert_eq!(collection.len(), 1);
        assert_eq!(
            collection.messages(),
            vec!["Invalid character '@' at line 2 col 4.".to_string()]
        );
        assert_eq!(collection.diagnostics()[0].kind, DiagnosticKind::Lexical);
    }
}
