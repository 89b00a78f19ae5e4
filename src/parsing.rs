//! Error tolerant parser base
//!
//!     [Parser] is the cursor every language parser is built on. It reads tokens through
//!     [TokenAccess], so the same parser code runs over a fully buffered
//!     [TokenSource](crate::source::TokenSource) or a bounded
//!     [StreamingTokenSource](crate::source::StreamingTokenSource).
//!
//! Recovery
//!
//!     Syntax errors never abort a parse. [Parser::expect] records a [ParseDiagnostic]
//!     and returns `None`; the language parser then calls [Parser::synchronize], which
//!     discards tokens up to and including the next `;` (or up to EOF), and carries on
//!     with the next statement.
//!
//! Releasing tokens
//!
//!     Every [Parser::advance] tells the source that indices below the new position will
//!     not be read again, which lets a streaming source drop them. Reading an index the
//!     source has already dropped is a bug in the language parser (it looked behind its
//!     own position) and panics.

use crate::source::TokenAccess;
use crate::token::{Token, TokenKind};
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnexpectedToken,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnexpectedToken => write!(f, "unexpected_token"),
        }
    }
}

/// A recoverable syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    /// A token kind name, or a description such as "expression".
    pub expected: String,
    /// Kind of the offending token, `eof` when the input ran out.
    pub got: TokenKind,
    /// Byte offset of the offending token, or the token index when there was none.
    pub position: usize,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {} at {}",
            self.kind, self.expected, self.got, self.position
        )
    }
}

/// Token cursor with diagnostics and panic-mode recovery.
#[derive(Debug)]
pub struct Parser<S> {
    tokens: S,
    position: usize,
    diagnostics: Vec<ParseDiagnostic>,
}

impl<S: TokenAccess> Parser<S> {
    pub fn new(tokens: S) -> Self {
        Self {
            tokens,
            position: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Index of the current token.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    /// Hands over the diagnostics recorded so far.
    pub fn take_diagnostics(&mut self) -> Vec<ParseDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    pub fn into_parts(self) -> (S, Vec<ParseDiagnostic>) {
        (self.tokens, self.diagnostics)
    }

    pub fn current(&mut self) -> Option<&Token> {
        let index = self.position;
        self.token_at(index)
    }

    /// The token `offset` places ahead of the current one.
    pub fn peek(&mut self, offset: usize) -> Option<&Token> {
        let index = self.position + offset;
        self.token_at(index)
    }

    /// Kind of the current token, `Eof` when there is none.
    pub fn current_kind(&mut self) -> TokenKind {
        self.current().map_or(TokenKind::Eof, |token| token.kind)
    }

    pub fn check(&mut self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Moves past the current token, returning it, and releases everything behind.
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.current().cloned();
        self.position += 1;
        self.tokens.release_before(self.position);
        token
    }

    /// Consumes the current token if it has `kind`; otherwise records a diagnostic and
    /// leaves the position alone.
    pub fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            return self.advance();
        }
        self.report(kind.as_str());
        None
    }

    /// Records an unexpected-token diagnostic against the current token.
    pub fn report(&mut self, expected: impl Into<String>) {
        let index = self.position;
        let (got, position) = match self.current() {
            Some(token) => (token.kind, token.offset),
            None => (TokenKind::Eof, index),
        };
        let diagnostic = ParseDiagnostic {
            kind: DiagnosticKind::UnexpectedToken,
            expected: expected.into(),
            got,
            position,
        };
        debug!(%diagnostic, "parse error");
        self.diagnostics.push(diagnostic);
    }

    pub fn at_end(&mut self) -> bool {
        self.current().map_or(true, Token::is_eof)
    }

    /// Skips to just past the next semicolon, or to EOF.
    pub fn synchronize(&mut self) {
        let start = self.position;
        while !self.at_end() && !self.check(TokenKind::Semicolon) {
            self.advance();
        }
        if !self.at_end() {
            self.advance();
        }
        trace!(skipped = self.position - start, "synchronized");
    }

    fn token_at(&mut self, index: usize) -> Option<&Token> {
        match self.tokens.token_at(index) {
            Ok(token) => token,
            Err(err) => panic!("parser read behind its token window: {err}"),
        }
    }
}
