//! Character classification helpers for the Mini lexer.
//!
//! The Mini grammar is ASCII: identifiers start with a lowercase letter or
//! underscore and continue with alphanumerics, underscore, or apostrophe.

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch == '_'
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '\''
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[inline]
pub fn is_binary_digit(ch: char) -> bool {
    ch == '0' || ch == '1'
}

#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    ('0'..='7').contains(&ch)
}

#[inline]
pub fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

#[inline]
pub fn is_white_space(ch: char) -> bool {
    ch == ' ' || ch == '\t' || is_line_break(ch)
}
