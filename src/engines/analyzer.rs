//! Shape metrics over a node tree.

use crate::ast::Node;
use serde::Serialize;

/// The shape of a tree: how many nodes, how deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnalysisReport {
    pub node_count: usize,
    pub depth: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    root: &'a Node,
}

impl<'a> Analyzer<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self { root }
    }

    /// Total node count, the root included.
    pub fn complexity(&self) -> usize {
        count_nodes(self.root)
    }

    /// Edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        tree_depth(self.root)
    }

    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            node_count: self.complexity(),
            depth: self.depth(),
        }
    }
}

pub fn count_nodes(node: &Node) -> usize {
    node.iter().count()
}

/// 0 for a childless node, otherwise one more than the deepest child.
pub fn tree_depth(node: &Node) -> usize {
    let mut deepest = 0;
    let mut pending = vec![(node, 0usize)];
    while let Some((node, depth)) = pending.pop() {
        deepest = deepest.max(depth);
        pending.extend(node.children().iter().map(|child| (child, depth + 1)));
    }
    deepest
}
