//! Persistent rewriting over a node tree.

use crate::ast::Node;
use tracing::trace;

/// Applies rewrite callbacks to a tree without touching it. See [Node::transform] for
/// the callback contract.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    root: &'a Node,
}

impl<'a> Transformer<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self { root }
    }

    /// Rewrites the tree top-down. `None` from the callback keeps a node and descends
    /// into its children; `Some(node)` replaces the whole subtree.
    pub fn apply(&self, mut rewrite: impl FnMut(&Node) -> Option<Node>) -> Node {
        let mut replaced = 0usize;
        let result = self.root.transform(&mut |node| {
            let replacement = rewrite(node);
            if replacement.is_some() {
                replaced += 1;
            }
            replacement
        });
        trace!(replaced, "transform finished");
        result
    }

    /// Applies each rewrite in turn, feeding the output of one pass into the next.
    pub fn apply_all<F>(&self, passes: impl IntoIterator<Item = F>) -> Node
    where
        F: FnMut(&Node) -> Option<Node>,
    {
        passes
            .into_iter()
            .fold(self.root.clone(), |tree, pass| Transformer::new(&tree).apply(pass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, NodeKind, Value};

    fn sample() -> Node {
        Node::program(vec![
            Node::binary(BinaryOp::Add, Node::int(1), Node::int(2)),
            Node::binary(BinaryOp::Multiply, Node::identifier("x"), Node::int(3)),
        ])
    }

    #[test]
    fn test_declining_rewrite_returns_equal_tree() {
        let tree = sample();
        let copy = Transformer::new(&tree).apply(|_| None);
        assert_eq!(copy, tree);
    }

    #[test]
    fn test_replacement_is_not_revisited() {
        let tree = sample();
        let mut seen = Vec::new();
        let rewritten = Transformer::new(&tree).apply(|node| {
            seen.push(node.kind());
            (node.kind() == NodeKind::Add).then(|| Node::int(3))
        });
        // The children of the replaced add node are never offered to the callback.
        assert_eq!(
            seen,
            vec![
                NodeKind::Program,
                NodeKind::Add,
                NodeKind::Multiply,
                NodeKind::Identifier,
                NodeKind::Number,
            ]
        );
        assert_eq!(rewritten.child(0), Some(&Node::int(3)));
        assert_eq!(tree.child(0).map(Node::kind), Some(NodeKind::Add));
    }

    #[test]
    fn test_constant_folding_passes() {
        let fold = |node: &Node| -> Option<Node> {
            if node.kind() != NodeKind::Add {
                return None;
            }
            match (node.child(0)?.value()?, node.child(1)?.value()?) {
                (Value::Int(a), Value::Int(b)) => Some(Node::int(a + b)),
                _ => None,
            }
        };
        let rename = |node: &Node| -> Option<Node> {
            (node.text() == Some("x")).then(|| Node::identifier("y"))
        };
        let tree = sample();
        let passes: Vec<Box<dyn FnMut(&Node) -> Option<Node>>> =
            vec![Box::new(fold), Box::new(rename)];
        let result = Transformer::new(&tree).apply_all(passes);
        assert_eq!(result.child(0), Some(&Node::int(3)));
        assert_eq!(result.find_all(|node| node.text() == Some("y")).len(), 1);
    }
}
