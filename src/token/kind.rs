//! The closed set of token tags.

use serde::{Serialize, Serializer};
use std::fmt;

/// Lexical class of a [Token](super::Token).
///
/// `Eof` is the end-of-input sentinel every producer terminates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Unknown,
    Plus,
    Minus,
    Star,
    Slash,
    Equals,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Semicolon,
    String,
    Number,
    Boolean,
    Null,
    Identifier,
    Keyword,
    Directive,
    InvalidHex,
    HexNumber,
}

impl TokenKind {
    pub const ALL: [TokenKind; 25] = [
        TokenKind::Eof,
        TokenKind::Unknown,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Equals,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::Colon,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::String,
        TokenKind::Number,
        TokenKind::Boolean,
        TokenKind::Null,
        TokenKind::Identifier,
        TokenKind::Keyword,
        TokenKind::Directive,
        TokenKind::InvalidHex,
        TokenKind::HexNumber,
    ];

    /// The tag name used in projections.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Eof => "eof",
            TokenKind::Unknown => "unknown",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Star => "star",
            TokenKind::Slash => "slash",
            TokenKind::Equals => "equals",
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::LBrace => "lbrace",
            TokenKind::RBrace => "rbrace",
            TokenKind::LBracket => "lbracket",
            TokenKind::RBracket => "rbracket",
            TokenKind::Colon => "colon",
            TokenKind::Comma => "comma",
            TokenKind::Semicolon => "semicolon",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Directive => "directive",
            TokenKind::InvalidHex => "invalid_hex",
            TokenKind::HexNumber => "hex_number",
        }
    }

    /// Resolve a tag name. Unrecognized names map to `Unknown`.
    pub fn from_name(name: &str) -> TokenKind {
        TokenKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .unwrap_or(TokenKind::Unknown)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_name(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_unrecognized_name_is_unknown() {
        assert_eq!(TokenKind::from_name("semicolons"), TokenKind::Unknown);
    }
}
