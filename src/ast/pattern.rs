//! Named node categories for structural queries.

use super::kind::NodeKind;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pattern category {0:?}")]
pub struct UnknownCategory(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    /// add, subtract, multiply and divide nodes
    ArithmeticOperations,
    /// number and string nodes
    Literals,
    Identifiers,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 3] = [
        PatternCategory::ArithmeticOperations,
        PatternCategory::Literals,
        PatternCategory::Identifiers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternCategory::ArithmeticOperations => "arithmetic_operations",
            PatternCategory::Literals => "literals",
            PatternCategory::Identifiers => "identifiers",
        }
    }

    pub fn includes(self, kind: NodeKind) -> bool {
        match self {
            PatternCategory::ArithmeticOperations => kind.is_binary(),
            PatternCategory::Literals => matches!(kind, NodeKind::Number | NodeKind::String),
            PatternCategory::Identifiers => kind == NodeKind::Identifier,
        }
    }
}

impl FromStr for PatternCategory {
    type Err = UnknownCategory;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        PatternCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
            .ok_or_else(|| UnknownCategory(name.to_string()))
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_names() {
        assert_eq!(
            "literals".parse::<PatternCategory>(),
            Ok(PatternCategory::Literals)
        );
        assert_eq!(
            "arithmetic_operations".parse::<PatternCategory>(),
            Ok(PatternCategory::ArithmeticOperations)
        );
        assert_eq!(
            "strings".parse::<PatternCategory>(),
            Err(UnknownCategory("strings".to_string()))
        );
    }

    #[test]
    fn test_literals_exclude_booleans() {
        assert!(PatternCategory::Literals.includes(NodeKind::String));
        assert!(!PatternCategory::Literals.includes(NodeKind::Boolean));
        assert!(!PatternCategory::Literals.includes(NodeKind::HexNumber));
    }
}
