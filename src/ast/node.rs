//! The node type, its validating factory and its structural queries.

use super::error::NodeError;
use super::kind::{Arity, BinaryOp, NodeKind, ValueRule};
use super::pattern::PatternCategory;
use super::snapshot::{snapshot_node, NodeSnapshot};
use super::value::{DirectiveInfo, Value};
use crate::token::Scalar;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Metadata side table of a node.
pub type Metadata = BTreeMap<String, Scalar>;

/// Metadata key of the raw-preservation flag. When set to `true` on a number node, the
/// node keeps the literal's surface text instead of a parsed value.
pub const RAW_KEY: &str = "raw";

/// An immutable AST node.
///
/// Nodes are built once and never modified. "Changing" a node means building a new one,
/// either through [Node::transform] or by assembling fresh nodes from the parts of an
/// existing one.
///
/// Trees can be as deep as their input is long (`1 + 1 + ... + 1` leans left one level
/// per term), so every whole-tree operation here, including clone, equality and drop,
/// walks with a heap stack instead of recursing.
#[derive(Debug)]
pub struct Node {
    kind: NodeKind,
    value: Option<Value>,
    children: Vec<Node>,
    metadata: Metadata,
}

impl Node {
    /// Builds a node of any kind, validating the value and child count against the kind.
    pub fn build(
        kind: NodeKind,
        value: Option<Value>,
        children: Vec<Node>,
    ) -> Result<Node, NodeError> {
        Self::build_with_metadata(kind, value, children, Metadata::new())
    }

    /// Like [Node::build], with metadata. A number node whose metadata carries the raw
    /// flag keeps textual values verbatim; otherwise number text is parsed.
    pub fn build_with_metadata(
        kind: NodeKind,
        value: Option<Value>,
        children: Vec<Node>,
        metadata: Metadata,
    ) -> Result<Node, NodeError> {
        let raw = metadata.get(RAW_KEY) == Some(&Scalar::Bool(true));
        let value = check_value(kind, value, raw)?;
        if let Arity::Exactly(expected) = kind.arity() {
            if children.len() != expected {
                return Err(NodeError::Arity {
                    kind,
                    expected,
                    found: children.len(),
                });
            }
        }
        Ok(Node {
            kind,
            value,
            children,
            metadata,
        })
    }

    fn unchecked(kind: NodeKind, value: Option<Value>, children: Vec<Node>) -> Node {
        Node {
            kind,
            value,
            children,
            metadata: Metadata::new(),
        }
    }

    pub fn program(statements: Vec<Node>) -> Node {
        Self::unchecked(NodeKind::Program, None, statements)
    }

    pub fn ucl_program(items: Vec<Node>) -> Node {
        Self::unchecked(NodeKind::UclProgram, None, items)
    }

    pub fn object(pairs: Vec<Node>) -> Node {
        Self::unchecked(NodeKind::Object, None, pairs)
    }

    pub fn array(items: Vec<Node>) -> Node {
        Self::unchecked(NodeKind::Array, None, items)
    }

    pub fn assign(target: Node, expr: Node) -> Node {
        Self::unchecked(NodeKind::Assign, None, vec![target, expr])
    }

    pub fn pair(key: Node, value: Node) -> Node {
        Self::unchecked(NodeKind::Pair, None, vec![key, value])
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Node {
        Self::unchecked(op.kind(), None, vec![left, right])
    }

    pub fn group(inner: Node) -> Node {
        Self::unchecked(NodeKind::Group, None, vec![inner])
    }

    pub fn identifier(name: impl Into<String>) -> Node {
        Self::unchecked(NodeKind::Identifier, Some(Value::Text(name.into())), Vec::new())
    }

    pub fn string(text: impl Into<String>) -> Node {
        Self::unchecked(NodeKind::String, Some(Value::Text(text.into())), Vec::new())
    }

    pub fn hex_number(text: impl Into<String>) -> Node {
        Self::unchecked(NodeKind::HexNumber, Some(Value::Text(text.into())), Vec::new())
    }

    pub fn int(value: i64) -> Node {
        Self::unchecked(NodeKind::Number, Some(Value::Int(value)), Vec::new())
    }

    pub fn float(value: f64) -> Node {
        Self::unchecked(NodeKind::Number, Some(Value::Float(value)), Vec::new())
    }

    /// A number node that keeps its surface text and carries the raw flag.
    pub fn raw_number(text: impl Into<String>) -> Node {
        Node {
            kind: NodeKind::Number,
            value: Some(Value::Text(text.into())),
            children: Vec::new(),
            metadata: Metadata::from([(RAW_KEY.to_string(), Scalar::Bool(true))]),
        }
    }

    pub fn boolean(value: bool) -> Node {
        Self::unchecked(NodeKind::Boolean, Some(Value::Bool(value)), Vec::new())
    }

    pub fn null() -> Node {
        Self::unchecked(NodeKind::Null, None, Vec::new())
    }

    pub fn directive(info: DirectiveInfo) -> Node {
        Self::unchecked(NodeKind::Directive, Some(Value::Directive(info)), Vec::new())
    }

    /// Returns this node with one more metadata entry. Writing the raw flag re-checks the
    /// value under the new flag, so clearing it on a raw number parses the kept text.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Result<Node, NodeError> {
        let key = key.into();
        let value = value.into();
        if key == RAW_KEY {
            let raw = value == Scalar::Bool(true);
            self.value = check_value(self.kind, self.value.take(), raw)?;
        }
        self.metadata.insert(key, value);
        Ok(self)
    }

    /// Same kind, value and metadata over new children. Callers keep the child count.
    pub(crate) fn rebuild(&self, children: Vec<Node>) -> Node {
        debug_assert!(match self.kind.arity() {
            Arity::Any => true,
            Arity::Exactly(expected) => expected == children.len(),
        });
        Node {
            kind: self.kind,
            value: self.value.clone(),
            children,
            metadata: self.metadata.clone(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The textual value, for identifier, string, hex and raw number nodes.
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().and_then(Value::as_text)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn meta(&self, key: &str) -> Option<&Scalar> {
        self.metadata.get(key)
    }

    /// Whether the raw-preservation flag is set.
    pub fn is_raw(&self) -> bool {
        self.meta(RAW_KEY) == Some(&Scalar::Bool(true))
    }

    /// Pre-order iterator over this node and all its descendants.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Visits this node and all its descendants in pre-order.
    pub fn traverse<'a>(&'a self, mut visit: impl FnMut(&'a Node)) {
        for node in self.iter() {
            visit(node);
        }
    }

    /// Every node in the tree satisfying `predicate`, in pre-order.
    pub fn find_all(&self, mut predicate: impl FnMut(&Node) -> bool) -> Vec<&Node> {
        self.iter().filter(|&node| predicate(node)).collect()
    }

    pub fn find_patterns(&self, category: PatternCategory) -> Vec<&Node> {
        self.find_all(|node| category.includes(node.kind))
    }

    /// Persistent depth-first rewrite.
    ///
    /// The callback sees each node top-down. Returning `Some(replacement)` puts the
    /// replacement in place of the node as is; its subtree is not visited. Returning
    /// `None` rewrites the children and rebuilds the node with the same kind, value and
    /// metadata. The input tree is never modified.
    pub fn transform(&self, rewrite: &mut impl FnMut(&Node) -> Option<Node>) -> Node {
        self.fold(rewrite, |node, children| node.rebuild(children))
    }

    /// Bottom-up fold over the tree.
    ///
    /// `enter` sees each node top-down; `Some(result)` stands in for the whole subtree.
    /// Otherwise `exit` gets the node together with the results of its children, in
    /// order, once all of them are done.
    pub(crate) fn fold<T>(
        &self,
        mut enter: impl FnMut(&Node) -> Option<T>,
        mut exit: impl FnMut(&Node, Vec<T>) -> T,
    ) -> T {
        let mut pending: Vec<(&Node, bool)> = vec![(self, false)];
        let mut results: Vec<T> = Vec::new();
        while let Some((node, expanded)) = pending.pop() {
            let result = if expanded {
                let children = results.split_off(results.len() - node.children.len());
                exit(node, children)
            } else if let Some(result) = enter(node) {
                result
            } else {
                pending.push((node, true));
                pending.extend(node.children.iter().rev().map(|child| (child, false)));
                continue;
            };
            if pending.is_empty() {
                return result;
            }
            results.push(result);
        }
        unreachable!("the root is always folded last")
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        snapshot_node(self)
    }

    /// Projects the tree to a JSON value (`{type, value, children, metadata}`).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

impl Clone for Node {
    fn clone(&self) -> Node {
        self.fold(|_| None, |node, children| node.rebuild(children))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some((left, right)) = pairs.pop() {
            if left.kind != right.kind
                || left.value != right.value
                || left.metadata != right.metadata
                || left.children.len() != right.children.len()
            {
                return false;
            }
            pairs.extend(left.children.iter().zip(&right.children));
        }
        true
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut orphans = std::mem::take(&mut self.children);
        while let Some(mut node) = orphans.pop() {
            orphans.append(&mut node.children);
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

/// See [Node::iter].
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> PreOrder<'a> {
        self.iter()
    }
}

fn check_value(
    kind: NodeKind,
    value: Option<Value>,
    raw: bool,
) -> Result<Option<Value>, NodeError> {
    let found = value.as_ref().map_or("nothing", Value::type_name);
    let expected = match kind.value_rule() {
        ValueRule::Nothing => {
            return match value {
                None => Ok(None),
                Some(_) => Err(NodeError::UnexpectedValue { kind, found }),
            }
        }
        ValueRule::Text => "text",
        ValueRule::Number => "number",
        ValueRule::Bool => "bool",
        ValueRule::Directive => "directive",
    };
    match (kind.value_rule(), value) {
        (ValueRule::Text, Some(accepted @ Value::Text(_)))
        | (ValueRule::Bool, Some(accepted @ Value::Bool(_)))
        | (ValueRule::Directive, Some(accepted @ Value::Directive(_)))
        | (ValueRule::Number, Some(accepted @ (Value::Int(_) | Value::Float(_)))) => {
            Ok(Some(accepted))
        }
        (ValueRule::Number, Some(Value::Text(text))) if raw => Ok(Some(Value::Text(text))),
        (ValueRule::Number, Some(Value::Text(text))) => parse_number(&text).map(Some),
        _ => Err(NodeError::InvalidValue {
            kind,
            expected,
            found,
        }),
    }
}

/// Parses number text: a `.`, `e` or `E` makes it a float, anything else an integer.
pub fn parse_number(text: &str) -> Result<Value, NodeError> {
    let invalid = || NodeError::InvalidNumber {
        text: text.to_string(),
    };
    if text.contains(&['.', 'e', 'E'][..]) {
        text.parse::<f64>().map(Value::Float).map_err(|_| invalid())
    } else {
        text.parse::<i64>().map(Value::Int).map_err(|_| invalid())
    }
}
