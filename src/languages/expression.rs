//! The reference expression language
//!
//!     let total = (price + 0x10) * 2;
//!     total / 4
//!
//! A deliberately small front end that exercises every layer of the crate: a logos lexer
//! backed by the scanner and the derivative engine, the parser base with error recovery,
//! both token sources and the fabric.

pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, ExpressionLexer, Lexeme};
pub use parser::{ExpressionOptions, ExpressionParser};

use super::{Language, Processed};
use crate::ast::Node;
use crate::fabric::Fabric;
use crate::source::{StreamingTokenSource, TokenAccess, TokenSource};
use crate::token::Token;
use tracing::{debug, debug_span};
use wiregram_config::WireGramConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    options: ExpressionOptions,
    window_capacity: usize,
}

impl Expression {
    pub const NAME: &'static str = "expression";

    pub fn new(options: ExpressionOptions) -> Self {
        Self {
            options,
            window_capacity: 8,
        }
    }

    pub fn from_config(config: &WireGramConfig) -> Self {
        Self {
            options: ExpressionOptions {
                preserve_raw_literals: config.languages.expression.preserve_raw_literals,
            },
            window_capacity: config.streaming.window_capacity,
        }
    }

    pub fn with_window_capacity(mut self, window_capacity: usize) -> Self {
        self.window_capacity = window_capacity;
        self
    }

    pub fn options(&self) -> ExpressionOptions {
        self.options
    }

    /// Statements of `input`, parsed lazily over a streaming token source. Unlike
    /// [Language::parse_stream] this keeps the parser reachable for its diagnostics.
    pub fn statements<'a>(
        &self,
        input: &'a str,
    ) -> Statements<StreamingTokenSource<ExpressionLexer<'a>>> {
        let source =
            StreamingTokenSource::with_capacity(ExpressionLexer::new(input), self.window_capacity);
        Statements {
            parser: ExpressionParser::new(source, self.options),
        }
    }
}

impl Default for Expression {
    fn default() -> Self {
        Self::new(ExpressionOptions::default())
    }
}

impl Language for Expression {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn process(&self, input: &str) -> Processed {
        let _span = debug_span!("process", language = Self::NAME, bytes = input.len()).entered();
        let source = TokenSource::new(ExpressionLexer::new(input));
        let mut parser = ExpressionParser::new(source, self.options);
        let root = parser.parse_program();
        let (source, diagnostics) = parser.into_parts();
        let tokens = source.into_tokens();
        debug!(
            statements = root.children().len(),
            tokens = tokens.len(),
            diagnostics = diagnostics.len(),
            "processed"
        );
        Processed {
            fabric: Fabric::new(input, root, tokens),
            diagnostics,
        }
    }

    fn tokenize_stream<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item = Token> + 'a> {
        Box::new(ExpressionLexer::new(input))
    }

    fn parse_stream<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item = Node> + 'a> {
        Box::new(self.statements(input))
    }
}

/// Iterator over the top-level statements of one input.
pub struct Statements<S> {
    parser: ExpressionParser<S>,
}

impl<S: TokenAccess> Statements<S> {
    pub fn parser(&self) -> &ExpressionParser<S> {
        &self.parser
    }
}

impl<S: TokenAccess> Iterator for Statements<S> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        self.parser.next_statement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, PatternCategory};
    use crate::engines::AnalysisReport;
    use crate::token::TokenKind;

    #[test]
    fn test_process_builds_fabric() {
        let processed = Expression::default().process("let x = 1 + 2; x * 3");
        assert!(processed.diagnostics.is_empty());
        assert_eq!(
            processed.shape(),
            AnalysisReport {
                node_count: 9,
                depth: 3
            }
        );
        assert_eq!(processed.fabric.tokens().len(), 11);
        assert_eq!(processed.fabric.to_source(), "let x = 1 + 2 x * 3");
        let identifiers = processed.fabric.find_patterns(PatternCategory::Identifiers);
        assert_eq!(identifiers.len(), 2);
    }

    #[test]
    fn test_tokenize_stream_ends_with_eof() {
        let tokens: Vec<Token> = Expression::default().tokenize_stream("a + b").collect();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_parse_stream_yields_statements() {
        let kinds: Vec<NodeKind> = Expression::default()
            .parse_stream("let a = 1; a + 1; (a)")
            .map(|node| node.kind())
            .collect();
        assert_eq!(kinds, vec![NodeKind::Assign, NodeKind::Add, NodeKind::Group]);
    }

    #[test]
    fn test_statements_expose_diagnostics() {
        let mut statements = Expression::default().statements("1 +; 2");
        assert_eq!(statements.next().map(|node| node.kind()), Some(NodeKind::Number));
        assert!(statements.next().is_none());
        assert_eq!(statements.parser().diagnostics().len(), 1);
    }

    #[test]
    fn test_window_capacity_is_only_a_hint() {
        let language = Expression::default().with_window_capacity(1);
        let mut statements = language.statements("let a = (1 + 2) * 3; a");
        assert_eq!(statements.next().map(|node| node.kind()), Some(NodeKind::Assign));
        assert_eq!(statements.next().map(|node| node.kind()), Some(NodeKind::Identifier));
        assert!(statements.next().is_none());
        assert!(statements.parser().tokens().peak_window() <= 2);
    }
}
