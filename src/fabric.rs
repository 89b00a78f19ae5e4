//! The fabric: a tree bundle pairing source text, its AST and its tokens
//!
//!     A fabric is what a language front end hands back after processing. It owns the three
//!     views of one input and offers the operations that need more than one of them, or
//!     that are convenient to have in one place:
//!
//!         find_patterns / find_all   structural queries over the AST
//!         analyze                    node count and depth
//!         transform                  persistent rewrite of the AST
//!         to_source                  unweave the AST back to text
//!         to_json                    projection of the whole bundle
//!
//!     The fabric never changes after construction. A transform returns a new root and
//!     leaves the fabric as it was.

use crate::ast::{Node, PatternCategory, UnknownCategory};
use crate::engines::{AnalysisReport, Analyzer, Transformer};
use crate::formats::unweave;
use crate::token::Token;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fabric {
    source: String,
    root: Node,
    tokens: Vec<Token>,
}

impl Fabric {
    pub fn new(source: impl Into<String>, root: Node, tokens: Vec<Token>) -> Self {
        Self {
            source: source.into(),
            root,
            tokens,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn find_patterns(&self, category: PatternCategory) -> Vec<&Node> {
        self.root.find_patterns(category)
    }

    /// [Fabric::find_patterns] with the category given by name.
    pub fn find_patterns_named(&self, category: &str) -> Result<Vec<&Node>, UnknownCategory> {
        Ok(self.find_patterns(category.parse()?))
    }

    pub fn find_all(&self, predicate: impl FnMut(&Node) -> bool) -> Vec<&Node> {
        self.root.find_all(predicate)
    }

    pub fn analyze(&self) -> AnalysisReport {
        Analyzer::new(&self.root).report()
    }

    /// Rewrites the AST; see [Node::transform].
    pub fn transform(&self, rewrite: impl FnMut(&Node) -> Option<Node>) -> Node {
        Transformer::new(&self.root).apply(rewrite)
    }

    /// A fabric over the same source and tokens with a different root.
    pub fn with_root(&self, root: Node) -> Fabric {
        Fabric {
            source: self.source.clone(),
            root,
            tokens: self.tokens.clone(),
        }
    }

    pub fn to_source(&self) -> String {
        unweave(&self.root)
    }

    /// `{source, root, tokens}` with the node and token projections nested inside.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, NodeKind};
    use crate::token::TokenKind;
    use serde_json::json;

    fn sum_fabric() -> Fabric {
        let root = Node::binary(BinaryOp::Add, Node::int(1), Node::int(2));
        let tokens = vec![
            Token::with_value(TokenKind::Number, 1i64, 0),
            Token::bare(TokenKind::Plus, 2),
            Token::with_value(TokenKind::Number, 2i64, 4),
            Token::eof(5),
        ];
        Fabric::new("1 + 2", root, tokens)
    }

    #[test]
    fn test_queries_and_analysis() {
        let fabric = sum_fabric();
        assert_eq!(fabric.find_patterns(PatternCategory::Literals).len(), 2);
        assert_eq!(
            fabric
                .find_patterns_named("arithmetic_operations")
                .unwrap()
                .len(),
            1
        );
        assert!(fabric.find_patterns_named("comments").is_err());
        assert_eq!(
            fabric.analyze(),
            AnalysisReport {
                node_count: 3,
                depth: 1
            }
        );
    }

    #[test]
    fn test_transform_leaves_fabric_intact() {
        let fabric = sum_fabric();
        let doubled = fabric.transform(|node| match node.value() {
            Some(crate::ast::Value::Int(n)) => Some(Node::int(n * 2)),
            _ => None,
        });
        assert_eq!(doubled.to_json()["children"][1]["value"], json!(4));
        assert_eq!(fabric.to_source(), "1 + 2");
        assert_eq!(fabric.with_root(doubled).to_source(), "2 + 4");
    }

    #[test]
    fn test_bundle_projection() {
        let projection = sum_fabric().to_json();
        assert_eq!(projection["source"], json!("1 + 2"));
        assert_eq!(projection["root"]["type"], json!("add"));
        assert_eq!(projection["tokens"][1], json!({"type": "plus", "value": null, "position": 2}));
        assert_eq!(projection["tokens"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_find_all_by_kind() {
        let fabric = sum_fabric();
        let numbers = fabric.find_all(|node| node.kind() == NodeKind::Number);
        assert_eq!(numbers.len(), 2);
    }
}
