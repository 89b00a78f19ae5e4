//! Node snapshot - the serializable projection of a tree
//!
//! A snapshot mirrors the node tree one to one with plain owned data so that any serde
//! format can render it. The projection rules live here and nowhere else:
//!
//!     {type, value, children, metadata}
//!
//! Infinite floats become the strings "Infinity" / "-Infinity", directives become
//! `{name, args, path}` and the raw-preservation flag is left out of `metadata`.
//!
//! Building and dropping a snapshot never recurse. Serializing one does, once per level,
//! inside serde.

use super::node::{Node, RAW_KEY};
use super::{NodeKind, Value};
use crate::token::Scalar;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    #[serde(rename = "type")]
    pub node_type: NodeKind,
    pub value: Option<Value>,
    pub children: Vec<NodeSnapshot>,
    pub metadata: BTreeMap<String, Scalar>,
}

/// Builds the snapshot of `node` and all its descendants.
pub fn snapshot_node(node: &Node) -> NodeSnapshot {
    node.fold(
        |_| None,
        |node, children| NodeSnapshot {
            node_type: node.kind(),
            value: node.value().cloned(),
            children,
            metadata: node
                .metadata()
                .iter()
                .filter(|(key, _)| key.as_str() != RAW_KEY)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        },
    )
}

impl Drop for NodeSnapshot {
    fn drop(&mut self) {
        let mut orphans = std::mem::take(&mut self.children);
        while let Some(mut snapshot) = orphans.pop() {
            orphans.append(&mut snapshot.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use serde_json::json;

    #[test]
    fn test_snapshot_of_sum() {
        let tree = Node::binary(BinaryOp::Add, Node::int(1), Node::int(2));
        assert_eq!(
            serde_json::to_value(snapshot_node(&tree)).unwrap(),
            json!({
                "type": "add",
                "value": null,
                "children": [
                    {"type": "number", "value": 1, "children": [], "metadata": {}},
                    {"type": "number", "value": 2, "children": [], "metadata": {}}
                ],
                "metadata": {}
            })
        );
    }

    #[test]
    fn test_snapshot_hides_raw_flag() {
        let node = Node::raw_number("0010").with_metadata("line", 3i64).unwrap();
        let snapshot = snapshot_node(&node);
        assert_eq!(snapshot.value, Some(Value::Text("0010".to_string())));
        assert_eq!(snapshot.metadata.len(), 1);
        assert_eq!(snapshot.metadata.get("line"), Some(&Scalar::Int(3)));
    }

    #[test]
    fn test_snapshot_of_deep_tree() {
        let tree = (0..200_000).fold(Node::int(0), |inner, _| Node::group(inner));
        let snapshot = snapshot_node(&tree);
        let mut depth = 0;
        let mut cursor = &snapshot;
        while let Some(child) = cursor.children.first() {
            depth += 1;
            cursor = child;
        }
        assert_eq!(depth, 200_000);
        assert_eq!(cursor.value, Some(Value::Int(0)));
    }
}
