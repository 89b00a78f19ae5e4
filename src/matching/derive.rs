//! Derivation, nullability and the matching drivers built on them.

use super::expr::{empty, epsilon, simplify_alt, simplify_concat, star, Expr};
use std::sync::Arc;

/// Does the language of `expr` contain the empty string?
pub fn nullable(expr: &Expr) -> bool {
    match expr {
        Expr::Empty | Expr::Byte(_) | Expr::Range(_, _) => false,
        Expr::Epsilon | Expr::Star(_) => true,
        Expr::Alt(left, right) => nullable(left) || nullable(right),
        Expr::Concat(left, right) => nullable(left) && nullable(right),
    }
}

/// The derivative of `expr` with respect to `b`: every suffix `w` such that `b w` is in
/// the language of `expr`.
pub fn derive(expr: &Arc<Expr>, b: u8) -> Arc<Expr> {
    match expr.as_ref() {
        Expr::Empty | Expr::Epsilon => empty(),
        Expr::Byte(c) => {
            if *c == b {
                epsilon()
            } else {
                empty()
            }
        }
        Expr::Range(lo, hi) => {
            if (*lo..=*hi).contains(&b) {
                epsilon()
            } else {
                empty()
            }
        }
        Expr::Alt(left, right) => simplify_alt(derive(left, b), derive(right, b)),
        Expr::Concat(left, right) => {
            let head = simplify_concat(derive(left, b), Arc::clone(right));
            if nullable(left) {
                simplify_alt(head, derive(right, b))
            } else {
                head
            }
        }
        Expr::Star(inner) => simplify_concat(derive(inner, b), star(Arc::clone(inner))),
    }
}

/// Does `expr` match the whole of `input`?
pub fn matches(expr: &Arc<Expr>, input: &[u8]) -> bool {
    let mut current = Arc::clone(expr);
    for &b in input {
        current = derive(&current, b);
        if current.is_empty_language() {
            return false;
        }
    }
    nullable(&current)
}

/// Length of the longest prefix of `input` matched by `expr`, or `None` when not even
/// the empty prefix matches.
pub fn longest_prefix(expr: &Arc<Expr>, input: &[u8]) -> Option<usize> {
    let mut current = Arc::clone(expr);
    let mut longest = nullable(&current).then_some(0);
    for (index, &b) in input.iter().enumerate() {
        current = derive(&current, b);
        if current.is_empty_language() {
            break;
        }
        if nullable(&current) {
            longest = Some(index + 1);
        }
    }
    longest
}

/// A compiled pattern rooted at one expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matcher {
    root: Arc<Expr>,
}

impl Matcher {
    pub fn new(root: Arc<Expr>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Arc<Expr> {
        &self.root
    }

    pub fn is_match(&self, input: &str) -> bool {
        matches(&self.root, input.as_bytes())
    }

    pub fn is_match_bytes(&self, input: &[u8]) -> bool {
        matches(&self.root, input)
    }

    pub fn longest_prefix(&self, input: &str) -> Option<usize> {
        longest_prefix(&self.root, input.as_bytes())
    }
}

impl From<Arc<Expr>> for Matcher {
    fn from(root: Arc<Expr>) -> Self {
        Self::new(root)
    }
}
