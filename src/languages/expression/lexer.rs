//! Lexer for the expression language
//!
//! Raw lexemes come from a logos lexer. Two of them need more than a regex:
//!
//!     string literals     the body is read with a [Scanner] so that `\` escapes are
//!                         resolved (`\n`, `\t`, `\"`, `\\`, anything else verbatim)
//!     hex candidates      anything shaped like `0x...` is validated with a derivative
//!                         matcher; bad digits yield an `invalid_hex` token instead
//!
//! Number tokens carry a parsed value. When the surface text differs from the canonical
//! rendering of that value (`007`, `1.50`, `1e3`) the text is kept in the `raw` extra.

use crate::matching::{concat, literal, one_of, plus, Matcher};
use crate::scanning::Scanner;
use crate::token::{Scalar, Token, TokenKind};
use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static QUOTE_OR_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["\\]"#).unwrap());

/// `0[xX][0-9a-fA-F]+`
static HEX_LITERAL: Lazy<Matcher> = Lazy::new(|| {
    let digit = one_of(b"0123456789abcdefABCDEF");
    Matcher::new(concat(concat(literal(b"0"), one_of(b"xX")), plus(digit)))
});

/// Raw lexemes as recognized by logos.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
pub enum Lexeme {
    #[token("let")]
    Let,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Equals,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,

    #[regex(r"0[xX][0-9A-Za-z_]*")]
    HexCandidate,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    /// Opening quote; the callback consumes the body and closing quote.
    #[token("\"", lex_string)]
    String(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
}

/// Reads a string body up to the closing quote, resolving escapes. `None` (a lexing
/// error) when the quote is never closed.
fn lex_string(lex: &mut logos::Lexer<Lexeme>) -> Option<String> {
    let mut scanner = Scanner::new(lex.remainder());
    let mut body = String::new();
    loop {
        let chunk = scanner.scan_until(&*QUOTE_OR_ESCAPE)?;
        let (text, stop) = chunk.split_at(chunk.len() - 1);
        body.push_str(text);
        if stop == "\"" {
            break;
        }
        let rest = scanner.rest();
        let escaped = rest.chars().next()?;
        body.push(match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            other => other,
        });
        scanner.set_pos(scanner.pos() + escaped.len_utf8());
    }
    lex.bump(scanner.pos());
    Some(body)
}

/// Tokens of one input, terminated by a single EOF token.
pub struct ExpressionLexer<'a> {
    inner: logos::Lexer<'a, Lexeme>,
    finished: bool,
}

impl<'a> ExpressionLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Lexeme::lexer(input),
            finished: false,
        }
    }
}

impl Iterator for ExpressionLexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let Some(result) = self.inner.next() else {
            self.finished = true;
            return Some(Token::eof(self.inner.source().len()));
        };
        let offset = self.inner.span().start;
        let text = self.inner.slice();
        let token = match result {
            Ok(lexeme) => to_token(lexeme, text, offset),
            Err(()) => Token::with_value(TokenKind::Unknown, text, offset),
        };
        trace!(kind = %token.kind, offset, "token");
        Some(token)
    }
}

/// Lexes the whole input eagerly.
pub fn tokenize(input: &str) -> Vec<Token> {
    ExpressionLexer::new(input).collect()
}

fn to_token(lexeme: Lexeme, text: &str, offset: usize) -> Token {
    match lexeme {
        Lexeme::Let => Token::with_value(TokenKind::Keyword, "let", offset),
        Lexeme::True => Token::with_value(TokenKind::Boolean, true, offset),
        Lexeme::False => Token::with_value(TokenKind::Boolean, false, offset),
        Lexeme::Null => Token::bare(TokenKind::Null, offset),
        Lexeme::Plus => Token::bare(TokenKind::Plus, offset),
        Lexeme::Minus => Token::bare(TokenKind::Minus, offset),
        Lexeme::Star => Token::bare(TokenKind::Star, offset),
        Lexeme::Slash => Token::bare(TokenKind::Slash, offset),
        Lexeme::Equals => Token::bare(TokenKind::Equals, offset),
        Lexeme::LParen => Token::bare(TokenKind::LParen, offset),
        Lexeme::RParen => Token::bare(TokenKind::RParen, offset),
        Lexeme::Semicolon => Token::bare(TokenKind::Semicolon, offset),
        Lexeme::HexCandidate => {
            let kind = if HEX_LITERAL.is_match(text) {
                TokenKind::HexNumber
            } else {
                TokenKind::InvalidHex
            };
            Token::with_value(kind, text, offset)
        }
        Lexeme::Number => number_token(text, offset),
        Lexeme::String(body) => Token::with_value(TokenKind::String, body, offset),
        Lexeme::Identifier => Token::with_value(TokenKind::Identifier, text, offset),
    }
}

fn number_token(text: &str, offset: usize) -> Token {
    let value = if text.contains(&['.', 'e', 'E'][..]) {
        text.parse::<f64>().ok().map(Scalar::Float)
    } else {
        text.parse::<i64>().ok().map(Scalar::Int)
    };
    match value {
        Some(value) => {
            let canonical = value.to_string() == text;
            let token = Token::with_value(TokenKind::Number, value, offset);
            if canonical {
                token
            } else {
                token.with_extra("raw", text)
            }
        }
        // Out of range for i64
        None => Token::with_value(TokenKind::Unknown, text, offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn test_assignment() {
        assert_eq!(
            kinds("let x = 1 + y;"),
            vec![
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_offsets_and_eof() {
        let tokens = tokenize("ab  12");
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[1].offset, 4);
        assert_eq!(tokens[2], Token::eof(6));
        assert_eq!(tokenize(""), vec![Token::eof(0)]);
    }

    #[test]
    fn test_keywords_need_a_boundary() {
        let tokens = tokenize("letter nullable");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].value, Some(Scalar::from("nullable")));
    }

    #[rstest]
    #[case("0x1F", TokenKind::HexNumber)]
    #[case("0XdeadBEEF", TokenKind::HexNumber)]
    #[case("0x", TokenKind::InvalidHex)]
    #[case("0x1G", TokenKind::InvalidHex)]
    fn test_hex_literals(#[case] input: &str, #[case] expected: TokenKind) {
        let token = &tokenize(input)[0];
        assert_eq!(token.kind, expected);
        assert_eq!(token.value, Some(Scalar::from(input)));
    }

    #[rstest]
    #[case("42", Scalar::Int(42), None)]
    #[case("007", Scalar::Int(7), Some("007"))]
    #[case("1.5", Scalar::Float(1.5), None)]
    #[case("1.50", Scalar::Float(1.5), Some("1.50"))]
    #[case("1e3", Scalar::Float(1000.0), Some("1e3"))]
    fn test_numbers(#[case] input: &str, #[case] value: Scalar, #[case] raw: Option<&str>) {
        let token = &tokenize(input)[0];
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.value, Some(value));
        assert_eq!(token.extra("raw").and_then(Scalar::as_str), raw);
    }

    #[test]
    fn test_number_out_of_range_is_unknown() {
        let token = &tokenize("99999999999999999999")[0];
        assert_eq!(token.kind, TokenKind::Unknown);
    }

    #[test]
    fn test_string_escapes() {
        let tokens = tokenize(r#""a\"b\\c\nd" rest"#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].value, Some(Scalar::from("a\"b\\c\nd")));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].offset, 13);
    }

    #[test]
    fn test_unterminated_string_is_unknown() {
        let tokens = tokenize(r#"x = "open"#);
        assert_eq!(tokens[2].kind, TokenKind::Unknown);
        assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_comments_and_stray_characters() {
        assert_eq!(
            kinds("1 # trailing comment\n@"),
            vec![TokenKind::Number, TokenKind::Unknown, TokenKind::Eof]
        );
    }
}
