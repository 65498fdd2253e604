//! The Mini scanner/lexer.
//!
//! Converts Mini source text into a stream of tokens that the parser
//! consumes. The scanner is a pure function of its input: it owns a cursor
//! and a diagnostic collection per instance and shares nothing mutable.

use crate::char_codes::*;
use crate::token::{Token, TokenKind};
use mini_core::text::Position;
use mini_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// The scanner converts Mini source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: Vec<char>,
    /// Current position in the text.
    pos: usize,
    /// 1-based line of the current position.
    line: u32,
    /// 1-based column of the current position.
    column: u32,
    /// The current token kind.
    token: TokenKind,
    /// The text of the current token. Literals are stored decoded.
    token_value: String,
    /// Position of the current token's first character.
    token_position: Position,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            token: TokenKind::Unknown,
            token_value: String::new(),
            token_position: Position::start(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> TokenKind {
        self.token
    }

    /// Get the current token's text value.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Get the position of the current token's first character.
    #[inline]
    pub fn token_position(&self) -> Position {
        self.token_position
    }

    /// Get the accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get a Token for the current token. Fixed-lexeme kinds get their
    /// lexeme as value even though the scanner never stored one.
    pub fn token_info(&self) -> Token {
        let value = if self.token_value.is_empty() {
            self.token.fixed_text().unwrap_or("").to_string()
        } else {
            self.token_value.clone()
        };
        Token::new(self.token, value, self.token_position)
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// Look at the character at the current position without advancing.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    /// Look at the character at position pos + offset.
    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    /// Whether we've reached the end of the text.
    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The position of the current character.
    #[inline]
    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Advance one character, keeping line/column in sync.
    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Collect the characters in [start, end) into a String.
    fn chars_to_string(&self, start: usize, end: usize) -> String {
        self.text[start..end].iter().collect()
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    fn error_at(&mut self, position: Position, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics.add(Diagnostic::at(position, message, args));
    }

    fn error_invalid_character(&mut self, ch: char, position: Position) {
        self.error_at(
            position,
            &messages::INVALID_CHARACTER,
            &[
                &ch.to_string(),
                &position.line.to_string(),
                &position.column.to_string(),
            ],
        );
    }

    fn error_positioned(&mut self, message: &DiagnosticMessage, position: Position) {
        self.error_at(
            position,
            message,
            &[&position.line.to_string(), &position.column.to_string()],
        );
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Skip whitespace and comments (trivia).
    fn skip_trivia(&mut self) {
        loop {
            if self.is_eof() {
                return;
            }
            let ch = self.text[self.pos];
            match ch {
                c if is_white_space(c) => self.advance(),
                // `--` line comment; a lone `-` is the minus operator
                '-' if self.char_at(1) == Some('-') => {
                    while !self.is_eof() && !is_line_break(self.text[self.pos]) {
                        self.advance();
                    }
                }
                // `{- ... -}` block comment; a lone `{` opens a block
                '{' if self.char_at(1) == Some('-') => {
                    let start = self.position();
                    self.advance();
                    self.advance();
                    loop {
                        if self.is_eof() {
                            self.error_positioned(&messages::UNTERMINATED_BLOCK_COMMENT, start);
                            return;
                        }
                        if self.text[self.pos] == '-' && self.char_at(1) == Some('}') {
                            self.advance();
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> TokenKind {
        self.token_value.clear();
        self.skip_trivia();
        self.token_position = self.position();

        if self.is_eof() {
            self.token = TokenKind::EndOfInputToken;
            return self.token;
        }

        let ch = self.text[self.pos];
        self.token = match ch {
            '(' => { self.advance(); TokenKind::OpenParenToken }
            ')' => { self.advance(); TokenKind::CloseParenToken }
            '{' => { self.advance(); TokenKind::OpenBraceToken }
            '}' => { self.advance(); TokenKind::CloseBraceToken }
            '[' => { self.advance(); TokenKind::OpenBracketToken }
            ']' => { self.advance(); TokenKind::CloseBracketToken }
            ',' => { self.advance(); TokenKind::CommaToken }
            ';' => { self.advance(); TokenKind::SemicolonToken }

            '+' => { self.advance(); TokenKind::PlusToken }
            '-' => { self.advance(); TokenKind::MinusToken }
            '*' => { self.advance(); TokenKind::AsteriskToken }
            '/' => { self.advance(); TokenKind::SlashToken }

            '<' => self.scan_pair('=', TokenKind::LessThanEqualsToken, TokenKind::LessThanToken),
            '>' => self.scan_pair('=', TokenKind::GreaterThanEqualsToken, TokenKind::GreaterThanToken),

            // `:`, `=`, and `!` only exist as the first half of `:=`, `==`, `!=`
            ':' => self.scan_required_pair('=', TokenKind::ColonEqualsToken),
            '=' => self.scan_required_pair('=', TokenKind::EqualsEqualsToken),
            '!' => self.scan_required_pair('=', TokenKind::ExclamationEqualsToken),

            '"' => self.scan_string_literal(),
            '\'' => self.scan_char_literal(),

            '0'..='9' => self.scan_number(),
            '.' if self.char_at(1).map_or(false, is_digit) => self.scan_number(),

            c if is_identifier_start(c) => self.scan_identifier(),
            'A'..='Z' => self.scan_capitalized_word(),

            _ => {
                let position = self.token_position;
                self.error_invalid_character(ch, position);
                self.advance();
                TokenKind::Unknown
            }
        };

        self.token
    }

    /// Two-character operator with a valid one-character fallback.
    fn scan_pair(&mut self, second: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.char_at(1) == Some(second) {
            self.advance();
            self.advance();
            double
        } else {
            self.advance();
            single
        }
    }

    /// Two-character operator whose first character is not a token on its own.
    fn scan_required_pair(&mut self, second: char, double: TokenKind) -> TokenKind {
        if self.char_at(1) == Some(second) {
            self.advance();
            self.advance();
            double
        } else {
            let position = self.token_position;
            let ch = self.text[self.pos];
            self.error_invalid_character(ch, position);
            self.advance();
            TokenKind::Unknown
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;

        // Radix prefixes only apply when a digit follows; otherwise `0x`
        // falls back to the longest match: number `0`, identifier `x`.
        if self.text[self.pos] == '0' {
            match self.char_at(1) {
                Some('x') | Some('X') if self.char_at(2).map_or(false, is_hex_digit) => {
                    self.advance();
                    self.advance();
                    while !self.is_eof() && is_hex_digit(self.text[self.pos]) {
                        self.advance();
                    }
                    self.token_value = self.chars_to_string(start, self.pos);
                    return TokenKind::NumberLiteral;
                }
                Some('b') | Some('B') if self.char_at(2).map_or(false, is_binary_digit) => {
                    self.advance();
                    self.advance();
                    while !self.is_eof() && is_binary_digit(self.text[self.pos]) {
                        self.advance();
                    }
                    self.token_value = self.chars_to_string(start, self.pos);
                    return TokenKind::NumberLiteral;
                }
                Some('o') | Some('O') if self.char_at(2).map_or(false, is_octal_digit) => {
                    self.advance();
                    self.advance();
                    while !self.is_eof() && is_octal_digit(self.text[self.pos]) {
                        self.advance();
                    }
                    self.token_value = self.chars_to_string(start, self.pos);
                    return TokenKind::NumberLiteral;
                }
                _ => {}
            }
        }

        // Decimal number with optional fraction and exponent. The fraction
        // requires a digit after the dot; `1.` is the number `1` and the dot
        // is left for the next scan.
        self.scan_digits();
        if self.current_char() == Some('.') && self.char_at(1).map_or(false, is_digit) {
            self.advance();
            self.scan_digits();
        }
        if let Some('e') | Some('E') = self.current_char() {
            let mut lookahead = 1;
            if let Some('+') | Some('-') = self.char_at(lookahead) {
                lookahead += 1;
            }
            // `1e` with no digits is the number `1` followed by identifier `e`
            if self.char_at(lookahead).map_or(false, is_digit) {
                self.advance();
                if let Some('+') | Some('-') = self.current_char() {
                    self.advance();
                }
                self.scan_digits();
            }
        }

        self.token_value = self.chars_to_string(start, self.pos);
        TokenKind::NumberLiteral
    }

    fn scan_digits(&mut self) {
        while !self.is_eof() && is_digit(self.text[self.pos]) {
            self.advance();
        }
    }

    fn scan_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance();
        while !self.is_eof() && is_identifier_part(self.text[self.pos]) {
            self.advance();
        }
        let text = self.chars_to_string(start, self.pos);
        let kind = TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier);
        self.token_value = text;
        kind
    }

    /// A capitalized word is only valid as `True` or `False`; identifiers
    /// must start lowercase.
    fn scan_capitalized_word(&mut self) -> TokenKind {
        let start = self.pos;
        let position = self.token_position;
        let first = self.text[self.pos];
        self.advance();
        while !self.is_eof() && is_identifier_part(self.text[self.pos]) {
            self.advance();
        }
        let text = self.chars_to_string(start, self.pos);
        match text.as_str() {
            "True" | "False" => {
                self.token_value = text;
                TokenKind::BooleanLiteral
            }
            _ => {
                self.error_invalid_character(first, position);
                TokenKind::Unknown
            }
        }
    }

    fn scan_string_literal(&mut self) -> TokenKind {
        let start = self.token_position;
        self.advance(); // opening quote
        let mut result = String::new();
        loop {
            if self.is_eof() {
                self.error_positioned(&messages::UNTERMINATED_STRING_LITERAL, start);
                break;
            }
            let ch = self.text[self.pos];
            if ch == '"' {
                self.advance();
                break;
            }
            if is_line_break(ch) {
                self.error_positioned(&messages::UNTERMINATED_STRING_LITERAL, start);
                break;
            }
            if ch == '\\' {
                if let Some(decoded) = self.scan_escape('"') {
                    result.push(decoded);
                }
                continue;
            }
            result.push(ch);
            self.advance();
        }
        self.token_value = result;
        TokenKind::StringLiteral
    }

    fn scan_char_literal(&mut self) -> TokenKind {
        let start = self.token_position;
        self.advance(); // opening quote
        match self.current_char() {
            None => {
                self.error_positioned(&messages::UNTERMINATED_CHAR_LITERAL, start);
                return TokenKind::CharLiteral;
            }
            Some('\'') => {
                self.advance();
                self.error_positioned(&messages::EMPTY_CHAR_LITERAL, start);
                return TokenKind::CharLiteral;
            }
            Some(c) if is_line_break(c) => {
                self.error_positioned(&messages::UNTERMINATED_CHAR_LITERAL, start);
                return TokenKind::CharLiteral;
            }
            Some('\\') => {
                if let Some(decoded) = self.scan_escape('\'') {
                    self.token_value.push(decoded);
                }
            }
            Some(c) => {
                self.token_value.push(c);
                self.advance();
            }
        }
        if self.current_char() == Some('\'') {
            self.advance();
        } else {
            self.error_positioned(&messages::UNTERMINATED_CHAR_LITERAL, start);
        }
        TokenKind::CharLiteral
    }

    /// Decode one escape sequence. The cursor sits on the backslash; `quote`
    /// is the quote character of the enclosing literal.
    fn scan_escape(&mut self, quote: char) -> Option<char> {
        let position = self.position();
        self.advance(); // backslash
        let ch = self.current_char()?;
        match ch {
            c if c == quote => {
                self.advance();
                Some(quote)
            }
            '\\' => { self.advance(); Some('\\') }
            'b' => { self.advance(); Some('\u{0008}') }
            'f' => { self.advance(); Some('\u{000C}') }
            'n' => { self.advance(); Some('\n') }
            'r' => { self.advance(); Some('\r') }
            't' => { self.advance(); Some('\t') }
            'v' => { self.advance(); Some('\u{000B}') }
            '0' => { self.advance(); Some('\0') }
            'u' => {
                self.advance();
                let mut code = 0u32;
                for _ in 0..4 {
                    match self.current_char().and_then(|c| c.to_digit(16)) {
                        Some(digit) => {
                            code = code * 16 + digit;
                            self.advance();
                        }
                        None => {
                            self.error_positioned(&messages::INVALID_UNICODE_ESCAPE, position);
                            return None;
                        }
                    }
                }
                match char::from_u32(code) {
                    Some(decoded) => Some(decoded),
                    None => {
                        self.error_positioned(&messages::INVALID_UNICODE_ESCAPE, position);
                        None
                    }
                }
            }
            other => {
                self.error_at(
                    position,
                    &messages::INVALID_ESCAPE_SEQUENCE,
                    &[
                        &other.to_string(),
                        &position.line.to_string(),
                        &position.column.to_string(),
                    ],
                );
                self.advance();
                None
            }
        }
    }
}

/// Tokenize an entire source text, aborting at the first lexical error.
///
/// On success the returned stream is non-empty and ends with the
/// end-of-input sentinel token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, DiagnosticCollection> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if !scanner.diagnostics().is_empty() {
            return Err(scanner.take_diagnostics());
        }
        tokens.push(scanner.token_info());
        if kind == TokenKind::EndOfInputToken {
            break;
        }
    }
    Ok(tokens)
}
