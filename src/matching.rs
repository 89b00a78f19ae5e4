//! Brzozowski derivative matching engine
//!
//!     Regular languages are represented as an immutable expression algebra ([Expr]). Every
//!     expression instance is a state of an implicit automaton, and [derive] computes the
//!     transition for one input byte by allocating a new expression. Nothing is ever
//!     mutated in place, so expressions can be shared freely (`Arc`) between patterns,
//!     scanners and threads.
//!
//! Operations
//!
//!     nullable(E)      does E accept the empty string
//!     derive(E, b)     the residual language of E after consuming byte b
//!     matches(E, s)    fold derive over s, then ask nullable
//!
//!     Matching short-circuits as soon as the running expression is the empty language:
//!     no further byte can revive it.
//!
//! Simplification
//!
//!     Derivatives are built through simplifying constructors (empty absorption for
//!     alternation and concatenation, epsilon identity for concatenation, idempotent
//!     alternation). These keep formula growth bounded for common patterns. There is no
//!     memoization of (expression, byte) pairs and no DFA minimization; expressions derive
//!     `Eq + Hash` so a cache can be layered on top.

pub mod derive;
pub mod expr;

pub use derive::{derive, longest_prefix, matches, nullable, Matcher};
pub use expr::{
    alt, byte, concat, empty, epsilon, literal, one_of, optional, plus, range, star, Expr,
};
