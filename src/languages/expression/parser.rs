//! Recursive descent parser for the expression language
//!
//! Grammar:
//!
//!     program     := statement*
//!     statement   := ( "let" IDENT "=" expression | expression ) ";"?
//!     expression  := term ( ("+" | "-") term )*
//!     term        := primary ( ("*" | "/") primary )*
//!     primary     := NUMBER | HEX | STRING | IDENT | "true" | "false" | "null"
//!                  | "(" expression ")"
//!
//! A statement that fails to parse is dropped after the error is recorded, and parsing
//! resumes after the next `;`. Parentheses nest at most [MAX_GROUP_DEPTH] deep; an
//! opening parenthesis beyond that is reported like any other unexpected token.

use crate::ast::{BinaryOp, Node};
use crate::parsing::{ParseDiagnostic, Parser};
use crate::source::TokenAccess;
use crate::token::{Scalar, Token, TokenKind};

pub const MAX_GROUP_DEPTH: usize = 256;

/// Parsing options of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpressionOptions {
    /// Keep the surface text of number literals whose spelling is not canonical
    /// (`007`, `1.50`), marking the node with the raw flag.
    pub preserve_raw_literals: bool,
}

pub struct ExpressionParser<S> {
    parser: Parser<S>,
    options: ExpressionOptions,
    groups: usize,
}

impl<S: TokenAccess> ExpressionParser<S> {
    pub fn new(tokens: S, options: ExpressionOptions) -> Self {
        Self {
            parser: Parser::new(tokens),
            options,
            groups: 0,
        }
    }

    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        self.parser.diagnostics()
    }

    /// The token source being parsed.
    pub fn tokens(&self) -> &S {
        self.parser.tokens()
    }

    pub fn into_diagnostics(self) -> Vec<ParseDiagnostic> {
        self.parser.into_parts().1
    }

    pub fn into_parts(self) -> (S, Vec<ParseDiagnostic>) {
        self.parser.into_parts()
    }

    /// Parses every remaining statement into a program node.
    pub fn parse_program(&mut self) -> Node {
        let mut statements = Vec::new();
        while let Some(statement) = self.next_statement() {
            statements.push(statement);
        }
        Node::program(statements)
    }

    /// The next statement that parses, skipping (and recording) broken ones. `None` at
    /// the end of input.
    pub fn next_statement(&mut self) -> Option<Node> {
        while !self.parser.at_end() {
            match self.statement() {
                Some(statement) => {
                    if self.parser.check(TokenKind::Semicolon) {
                        self.parser.advance();
                    }
                    return Some(statement);
                }
                None => self.parser.synchronize(),
            }
        }
        None
    }

    fn statement(&mut self) -> Option<Node> {
        if !self.parser.check(TokenKind::Keyword) {
            return self.expression();
        }
        self.parser.advance();
        let name = self.parser.expect(TokenKind::Identifier)?;
        self.parser.expect(TokenKind::Equals)?;
        let value = self.expression()?;
        Some(Node::assign(Node::identifier(text_of(&name)), value))
    }

    fn expression(&mut self) -> Option<Node> {
        let mut left = self.term()?;
        loop {
            let op = match self.parser.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => return Some(left),
            };
            self.parser.advance();
            let right = self.term()?;
            left = Node::binary(op, left, right);
        }
    }

    fn term(&mut self) -> Option<Node> {
        let mut left = self.primary()?;
        loop {
            let op = match self.parser.current_kind() {
                TokenKind::Star => BinaryOp::Multiply,
                TokenKind::Slash => BinaryOp::Divide,
                _ => return Some(left),
            };
            self.parser.advance();
            let right = self.primary()?;
            left = Node::binary(op, left, right);
        }
    }

    fn primary(&mut self) -> Option<Node> {
        match self.parser.current_kind() {
            TokenKind::LParen if self.groups >= MAX_GROUP_DEPTH => {
                self.parser
                    .report(format!("at most {MAX_GROUP_DEPTH} nested groups"));
                None
            }
            TokenKind::LParen => {
                self.parser.advance();
                self.groups += 1;
                let inner = self.expression();
                self.groups -= 1;
                let inner = inner?;
                self.parser.expect(TokenKind::RParen)?;
                Some(Node::group(inner))
            }
            TokenKind::Number
            | TokenKind::HexNumber
            | TokenKind::String
            | TokenKind::Identifier
            | TokenKind::Boolean
            | TokenKind::Null => {
                let token = self.parser.advance()?;
                self.literal(&token)
            }
            _ => {
                self.parser.report("expression");
                None
            }
        }
    }

    fn keeps_raw(&self, token: &Token) -> bool {
        self.options.preserve_raw_literals && token.has_extra("raw")
    }

    fn literal(&self, token: &Token) -> Option<Node> {
        let node = match (token.kind, &token.value) {
            (TokenKind::Number, _) if self.keeps_raw(token) => {
                Node::raw_number(token.extra("raw").map(ToString::to_string)?)
            }
            (TokenKind::Number, Some(Scalar::Int(value))) => Node::int(*value),
            (TokenKind::Number, Some(Scalar::Float(value))) => Node::float(*value),
            (TokenKind::HexNumber, _) => Node::hex_number(text_of(token)),
            (TokenKind::String, _) => Node::string(text_of(token)),
            (TokenKind::Identifier, _) => Node::identifier(text_of(token)),
            (TokenKind::Boolean, Some(Scalar::Bool(value))) => Node::boolean(*value),
            (TokenKind::Null, _) => Node::null(),
            _ => return None,
        };
        Some(node)
    }
}

fn text_of(token: &Token) -> String {
    token
        .value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}
