//! Token types produced by the scanner.

use mini_core::text::Position;
use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Names and literals
    Identifier,
    NumberLiteral,
    StringLiteral,
    CharLiteral,
    BooleanLiteral,

    // Keywords
    ReturnKeyword,
    IfKeyword,
    ElseKeyword,

    // Operators
    ColonEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    LessThanToken,
    LessThanEqualsToken,
    GreaterThanToken,
    GreaterThanEqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,

    // Punctuation
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    CommaToken,
    SemicolonToken,

    // Sentinels
    EndOfInputToken,
    Unknown,
}

impl TokenKind {
    /// Whether this kind is one of the reserved keywords.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::ReturnKeyword | TokenKind::IfKeyword | TokenKind::ElseKeyword
        )
    }

    /// Reclassify identifier text that matches the reserved set.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        match text {
            "return" => Some(TokenKind::ReturnKeyword),
            "if" => Some(TokenKind::IfKeyword),
            "else" => Some(TokenKind::ElseKeyword),
            _ => None,
        }
    }

    /// The fixed lexeme of operator and punctuation kinds.
    pub fn fixed_text(&self) -> Option<&'static str> {
        match self {
            TokenKind::ColonEqualsToken => Some(":="),
            TokenKind::EqualsEqualsToken => Some("=="),
            TokenKind::ExclamationEqualsToken => Some("!="),
            TokenKind::LessThanToken => Some("<"),
            TokenKind::LessThanEqualsToken => Some("<="),
            TokenKind::GreaterThanToken => Some(">"),
            TokenKind::GreaterThanEqualsToken => Some(">="),
            TokenKind::PlusToken => Some("+"),
            TokenKind::MinusToken => Some("-"),
            TokenKind::AsteriskToken => Some("*"),
            TokenKind::SlashToken => Some("/"),
            TokenKind::OpenParenToken => Some("("),
            TokenKind::CloseParenToken => Some(")"),
            TokenKind::OpenBraceToken => Some("{"),
            TokenKind::CloseBraceToken => Some("}"),
            TokenKind::OpenBracketToken => Some("["),
            TokenKind::CloseBracketToken => Some("]"),
            TokenKind::CommaToken => Some(","),
            TokenKind::SemicolonToken => Some(";"),
            _ => None,
        }
    }

    /// The kind name used in diagnostics. Names follow the reference lexer's
    /// vocabulary (`semicolon`, `lparen`, `gte`, ...); `{`/`}` are `lbracket`/
    /// `rbracket` and `[`/`]` are `lsquare`/`rsquare` as there.
    pub fn description(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::NumberLiteral => "number",
            TokenKind::StringLiteral => "string",
            TokenKind::CharLiteral => "char",
            TokenKind::BooleanLiteral => "bool",
            TokenKind::ReturnKeyword | TokenKind::IfKeyword | TokenKind::ElseKeyword => "keyword",
            TokenKind::ColonEqualsToken => "assign",
            TokenKind::EqualsEqualsToken => "equal",
            TokenKind::ExclamationEqualsToken => "notEqual",
            TokenKind::LessThanToken => "lt",
            TokenKind::LessThanEqualsToken => "lte",
            TokenKind::GreaterThanToken => "gt",
            TokenKind::GreaterThanEqualsToken => "gte",
            TokenKind::PlusToken
            | TokenKind::MinusToken
            | TokenKind::AsteriskToken
            | TokenKind::SlashToken => "operator",
            TokenKind::OpenParenToken => "lparen",
            TokenKind::CloseParenToken => "rparen",
            TokenKind::OpenBraceToken => "lbracket",
            TokenKind::CloseBraceToken => "rbracket",
            TokenKind::OpenBracketToken => "lsquare",
            TokenKind::CloseBracketToken => "rsquare",
            TokenKind::CommaToken => "comma",
            TokenKind::SemicolonToken => "semicolon",
            TokenKind::EndOfInputToken => "eof",
            TokenKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A scanned token: kind, literal value, and the position of its first
/// character. String and char tokens carry their decoded value; number
/// tokens carry the raw literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: String, position: Position) -> Self {
        Self {
            kind,
            value,
            position,
        }
    }

    /// The numeric value of a number token, collapsing every radix the
    /// lexer accepts (`0x`, `0b`, `0o`, decimal with fraction/exponent).
    pub fn numeric_value(&self) -> f64 {
        numeric_value(&self.value)
    }
}

/// Convert numeric literal text to its value.
pub fn numeric_value(text: &str) -> f64 {
    if let Some(digits) = strip_prefix_ci(text, 'x') {
        return fold_digits(digits, 16);
    }
    if let Some(digits) = strip_prefix_ci(text, 'b') {
        return fold_digits(digits, 2);
    }
    if let Some(digits) = strip_prefix_ci(text, 'o') {
        return fold_digits(digits, 8);
    }
    debug_assert!(!text.is_empty(), "number token with empty text");
    text.parse().unwrap_or(f64::NAN)
}

/// Strip a `0x`-style radix prefix, case-insensitively on the radix letter.
fn strip_prefix_ci(text: &str, radix_letter: char) -> Option<&str> {
    let mut chars = text.chars();
    if chars.next() != Some('0') {
        return None;
    }
    match chars.next() {
        Some(c) if c.eq_ignore_ascii_case(&radix_letter) => Some(chars.as_str()),
        _ => None,
    }
}

fn fold_digits(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * radix as f64 + d as f64)
}
