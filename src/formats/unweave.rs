//! Unweaving: rendering a node tree back to source text
//!
//! Reconstruction is approximate. Whitespace, comments and the original spelling of
//! literals are not stored in the tree, so the output is a canonical rendering:
//!
//! - program: statements joined by a single space
//! - ucl_program: items joined by newlines
//! - pair: `key = value;`
//! - object: one indented pair per line between braces
//! - array: `[a, b]`
//! - binary operators: `left op right`, assign: `let name = expr`, group: `(inner)`
//! - directive: `.name(k=v, ...) "path"`, omitting the parts that are absent
//!
//! Number nodes re-render from their value. A number built with the raw flag keeps its
//! surface text and renders it verbatim, which is what makes exact round trips possible.

use crate::ast::{BinaryOp, DirectiveInfo, Node, NodeKind, Value};

/// Conversion of a node into source text.
pub trait ToSource {
    fn to_source(&self) -> String;
}

impl ToSource for Node {
    fn to_source(&self) -> String {
        unweave(self)
    }
}

/// Pending output: a subtree still to render, or finished text.
enum Piece<'a> {
    Node(&'a Node),
    Text(&'a str),
    Owned(String),
}

/// Renders `node` and its subtree into one buffer, driving an explicit work stack.
pub fn unweave(node: &Node) -> String {
    let mut out = String::new();
    let mut pending = vec![Piece::Node(node)];
    let mut parts = Vec::new();
    while let Some(piece) = pending.pop() {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Owned(text) => out.push_str(&text),
            Piece::Node(node) => {
                expand(node, &mut parts);
                pending.extend(parts.drain(..).rev());
            }
        }
    }
    out
}

/// The pieces `node` renders as, in output order.
fn expand<'a>(node: &'a Node, parts: &mut Vec<Piece<'a>>) {
    let children = node.children();
    let child = |index: usize| children.get(index).map_or(Piece::Text(""), Piece::Node);
    match node.kind() {
        NodeKind::Program => separated(children, " ", parts),
        NodeKind::UclProgram => separated(children, "\n", parts),
        NodeKind::Assign => {
            parts.extend([Piece::Text("let "), key(node), Piece::Text(" = "), child(1)]);
        }
        NodeKind::Add | NodeKind::Subtract | NodeKind::Multiply | NodeKind::Divide => {
            let symbol = BinaryOp::from_kind(node.kind()).map_or("?", BinaryOp::symbol);
            parts.extend([
                child(0),
                Piece::Text(" "),
                Piece::Text(symbol),
                Piece::Text(" "),
                child(1),
            ]);
        }
        NodeKind::Group => parts.extend([Piece::Text("("), child(0), Piece::Text(")")]),
        NodeKind::Pair => {
            parts.extend([key(node), Piece::Text(" = "), child(1), Piece::Text(";")]);
        }
        NodeKind::Object => {
            parts.push(Piece::Text("{\n"));
            for (index, pair) in children.iter().enumerate() {
                if index > 0 {
                    parts.push(Piece::Text("\n"));
                }
                parts.extend([Piece::Text("  "), Piece::Node(pair)]);
            }
            parts.push(Piece::Text("\n}"));
        }
        NodeKind::Array => {
            parts.push(Piece::Text("["));
            separated(children, ", ", parts);
            parts.push(Piece::Text("]"));
        }
        NodeKind::String => {
            parts.extend([
                Piece::Text("\""),
                Piece::Text(node.text().unwrap_or_default()),
                Piece::Text("\""),
            ]);
        }
        NodeKind::Null => parts.push(Piece::Text("null")),
        NodeKind::Directive => {
            if let Some(Value::Directive(info)) = node.value() {
                parts.push(Piece::Owned(unweave_directive(info)));
            }
        }
        NodeKind::Identifier | NodeKind::HexNumber | NodeKind::Number | NodeKind::Boolean => {
            if let Some(value) = node.value() {
                parts.push(Piece::Owned(render_value(value)));
            }
        }
    }
}

fn separated<'a>(nodes: &'a [Node], separator: &'a str, parts: &mut Vec<Piece<'a>>) {
    for (index, node) in nodes.iter().enumerate() {
        if index > 0 {
            parts.push(Piece::Text(separator));
        }
        parts.push(Piece::Node(node));
    }
}

/// A binding's first child by its bare text: `"name" = 1;` renders as `name = 1;`.
fn key(node: &Node) -> Piece<'_> {
    match node.child(0) {
        Some(key) => key.text().map_or(Piece::Node(key), Piece::Text),
        None => Piece::Text(""),
    }
}

/// Canonical text of a literal value. Floats always show a fractional part or exponent.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Bool(flag) => flag.to_string(),
        Value::Int(number) => number.to_string(),
        Value::Float(number) => format!("{number:?}"),
        Value::Text(text) => text.clone(),
        Value::Directive(info) => unweave_directive(info),
    }
}

fn unweave_directive(info: &DirectiveInfo) -> String {
    let mut text = format!(".{}", info.name);
    if let Some(args) = &info.args {
        let args: Vec<String> = args
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        text.push_str(&format!("({})", args.join(", ")));
    }
    if let Some(path) = &info.path {
        text.push_str(&format!(" \"{path}\""));
    }
    text
}
