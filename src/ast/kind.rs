//! Node tags and the shape each tag admits.

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Group,
    Identifier,
    Number,
    String,
    Boolean,
    Null,
    Object,
    Pair,
    Array,
    Directive,
    UclProgram,
    HexNumber,
}

/// How many children a kind takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    Any,
    Exactly(usize),
}

/// Which value a kind takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueRule {
    Nothing,
    Text,
    Number,
    Bool,
    Directive,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::Assign => "assign",
            NodeKind::Add => "add",
            NodeKind::Subtract => "subtract",
            NodeKind::Multiply => "multiply",
            NodeKind::Divide => "divide",
            NodeKind::Group => "group",
            NodeKind::Identifier => "identifier",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Boolean => "boolean",
            NodeKind::Null => "null",
            NodeKind::Object => "object",
            NodeKind::Pair => "pair",
            NodeKind::Array => "array",
            NodeKind::Directive => "directive",
            NodeKind::UclProgram => "ucl_program",
            NodeKind::HexNumber => "hex_number",
        }
    }

    pub fn is_binary(self) -> bool {
        BinaryOp::from_kind(self).is_some()
    }

    pub(crate) fn arity(self) -> Arity {
        match self {
            NodeKind::Program | NodeKind::UclProgram | NodeKind::Object | NodeKind::Array => {
                Arity::Any
            }
            NodeKind::Assign
            | NodeKind::Pair
            | NodeKind::Add
            | NodeKind::Subtract
            | NodeKind::Multiply
            | NodeKind::Divide => Arity::Exactly(2),
            NodeKind::Group => Arity::Exactly(1),
            NodeKind::Identifier
            | NodeKind::Number
            | NodeKind::String
            | NodeKind::Boolean
            | NodeKind::Null
            | NodeKind::Directive
            | NodeKind::HexNumber => Arity::Exactly(0),
        }
    }

    pub(crate) fn value_rule(self) -> ValueRule {
        match self {
            NodeKind::Identifier | NodeKind::String | NodeKind::HexNumber => ValueRule::Text,
            NodeKind::Number => ValueRule::Number,
            NodeKind::Boolean => ValueRule::Bool,
            NodeKind::Directive => ValueRule::Directive,
            _ => ValueRule::Nothing,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The four arithmetic node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn kind(self) -> NodeKind {
        match self {
            BinaryOp::Add => NodeKind::Add,
            BinaryOp::Subtract => NodeKind::Subtract,
            BinaryOp::Multiply => NodeKind::Multiply,
            BinaryOp::Divide => NodeKind::Divide,
        }
    }

    pub fn from_kind(kind: NodeKind) -> Option<BinaryOp> {
        match kind {
            NodeKind::Add => Some(BinaryOp::Add),
            NodeKind::Subtract => Some(BinaryOp::Subtract),
            NodeKind::Multiply => Some(BinaryOp::Multiply),
            NodeKind::Divide => Some(BinaryOp::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }
}
