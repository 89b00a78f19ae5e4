//! The expression algebra and its constructors.

use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

static EMPTY: Lazy<Arc<Expr>> = Lazy::new(|| Arc::new(Expr::Empty));
static EPSILON: Lazy<Arc<Expr>> = Lazy::new(|| Arc::new(Expr::Epsilon));

/// A regular language over bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// The empty language; matches nothing.
    Empty,
    /// The language containing only the empty string.
    Epsilon,
    Byte(u8),
    /// Inclusive byte range.
    Range(u8, u8),
    Alt(Arc<Expr>, Arc<Expr>),
    Concat(Arc<Expr>, Arc<Expr>),
    /// Kleene star.
    Star(Arc<Expr>),
}

impl Expr {
    pub fn is_empty_language(&self) -> bool {
        matches!(self, Expr::Empty)
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Expr::Epsilon)
    }

    /// Number of nodes in the formula.
    pub fn size(&self) -> usize {
        match self {
            Expr::Empty | Expr::Epsilon | Expr::Byte(_) | Expr::Range(_, _) => 1,
            Expr::Alt(left, right) | Expr::Concat(left, right) => 1 + left.size() + right.size(),
            Expr::Star(inner) => 1 + inner.size(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Empty => f.write_str("∅"),
            Expr::Epsilon => f.write_str("ε"),
            Expr::Byte(b) => write!(f, "{}", (*b as char).escape_default()),
            Expr::Range(lo, hi) => write!(
                f,
                "[{}-{}]",
                (*lo as char).escape_default(),
                (*hi as char).escape_default()
            ),
            Expr::Alt(left, right) => write!(f, "({left}|{right})"),
            Expr::Concat(left, right) => write!(f, "{left}{right}"),
            Expr::Star(inner) => write!(f, "({inner})*"),
        }
    }
}

// ============================================================================
// Pattern author constructors
// ============================================================================
//
// These build exactly the formula they name; no simplification happens here.

/// The canonical empty-language instance.
pub fn empty() -> Arc<Expr> {
    Arc::clone(&EMPTY)
}

/// The canonical empty-string instance.
pub fn epsilon() -> Arc<Expr> {
    Arc::clone(&EPSILON)
}

pub fn byte(b: u8) -> Arc<Expr> {
    Arc::new(Expr::Byte(b))
}

pub fn range(lo: u8, hi: u8) -> Arc<Expr> {
    Arc::new(Expr::Range(lo, hi))
}

pub fn alt(left: Arc<Expr>, right: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::Alt(left, right))
}

pub fn concat(left: Arc<Expr>, right: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::Concat(left, right))
}

pub fn star(inner: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::Star(inner))
}

/// One or more repetitions: `e e*`.
pub fn plus(inner: Arc<Expr>) -> Arc<Expr> {
    concat(Arc::clone(&inner), star(inner))
}

/// Zero or one occurrence: `e | ε`.
pub fn optional(inner: Arc<Expr>) -> Arc<Expr> {
    alt(inner, epsilon())
}

/// The exact byte sequence; the empty slice is epsilon.
pub fn literal(bytes: &[u8]) -> Arc<Expr> {
    match bytes.split_last() {
        None => epsilon(),
        Some((last, init)) => init
            .iter()
            .rev()
            .fold(byte(*last), |rest, b| concat(byte(*b), rest)),
    }
}

/// Any single byte of the set; the empty set is the empty language.
pub fn one_of(bytes: &[u8]) -> Arc<Expr> {
    match bytes.split_first() {
        None => empty(),
        Some((first, rest)) => rest.iter().fold(byte(*first), |acc, b| alt(acc, byte(*b))),
    }
}

// ============================================================================
// Simplifying constructors used by derivation
// ============================================================================

/// Alternation with empty-language absorption and idempotence.
pub(crate) fn simplify_alt(left: Arc<Expr>, right: Arc<Expr>) -> Arc<Expr> {
    if left.is_empty_language() {
        return right;
    }
    if right.is_empty_language() || left == right {
        return left;
    }
    alt(left, right)
}

/// Concatenation with empty-language absorption and epsilon identity.
pub(crate) fn simplify_concat(left: Arc<Expr>, right: Arc<Expr>) -> Arc<Expr> {
    if left.is_empty_language() || right.is_empty_language() {
        return empty();
    }
    if left.is_epsilon() {
        return right;
    }
    if right.is_epsilon() {
        return left;
    }
    concat(left, right)
}
