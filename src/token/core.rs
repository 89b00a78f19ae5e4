//! The token value itself and its serialized projection.
//!
//! Extras are flattened into the projection after `type`, `value` and `position`. An
//! extras entry named like one of those three is left out rather than written over it,
//! so the projection always shows the token's own kind, value and offset.

use super::kind::TokenKind;
use super::scalar::Scalar;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Producer specific side data attached to a token.
pub type Extras = BTreeMap<String, Scalar>;

/// Keys owned by the projection itself; extras never override them.
const RESERVED_KEYS: [&str; 3] = ["type", "value", "position"];

/// An immutable lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<Scalar>,
    pub offset: usize,
    pub extras: Option<Extras>,
}

impl Token {
    pub fn new(kind: TokenKind, value: Option<Scalar>, offset: usize) -> Self {
        Self {
            kind,
            value,
            offset,
            extras: None,
        }
    }

    /// A token without a value (punctuation, keywords).
    pub fn bare(kind: TokenKind, offset: usize) -> Self {
        Self::new(kind, None, offset)
    }

    /// A token carrying a value.
    pub fn with_value(kind: TokenKind, value: impl Into<Scalar>, offset: usize) -> Self {
        Self::new(kind, Some(value.into()), offset)
    }

    /// The end-of-input sentinel.
    pub fn eof(offset: usize) -> Self {
        Self::bare(TokenKind::Eof, offset)
    }

    /// Returns a copy of this token with one more extras entry.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.extras
            .get_or_insert_with(Extras::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn extra(&self, key: &str) -> Option<&Scalar> {
        self.extras.as_ref().and_then(|extras| extras.get(key))
    }

    pub fn has_extra(&self, key: &str) -> bool {
        self.extras
            .as_ref()
            .is_some_and(|extras| extras.contains_key(key))
    }

    /// Projects the token to a JSON value (`{type, value, position, ...extras}`).
    pub fn to_json(&self) -> serde_json::Value {
        // Serializing a Token cannot fail: every field is a plain scalar or string.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extras = self
            .extras
            .iter()
            .flatten()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()));

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind)?;
        map.serialize_entry("value", &self.value)?;
        map.serialize_entry("position", &self.offset)?;
        for (key, value) in extras {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
