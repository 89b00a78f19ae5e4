use super::kind::NodeKind;
use thiserror::Error;

/// A node was built with a value or child count its kind does not admit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("{kind} node takes no value, got {found}")]
    UnexpectedValue { kind: NodeKind, found: &'static str },

    #[error("{kind} node requires a {expected} value, got {found}")]
    InvalidValue {
        kind: NodeKind,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{kind} node takes {expected} children, got {found}")]
    Arity {
        kind: NodeKind,
        expected: usize,
        found: usize,
    },

    #[error("invalid number literal {text:?}")]
    InvalidNumber { text: String },
}
