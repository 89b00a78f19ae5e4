//! Core token types shared across scanners, token sources, parsers and tooling.
//!
//!     A token is the atomic lexical unit handed from a language front end to the rest of
//!     the pipeline. Tokens are created once by a producer and never mutated afterwards;
//!     every consumer (buffered source, streaming window, parser, fabric) only reads them.
//!
//! Token Layout
//!
//!     kind:    the closed [TokenKind] tag
//!     value:   an optional [Scalar] (identifier text, parsed number, string body...)
//!     offset:  byte offset of the lexeme in the source text
//!     extras:  an optional side table of `String -> Scalar`, for producer specific data
//!              such as the raw surface text of a literal
//!
//!     Extras are restricted to the closed set of [Scalar] kinds so that they stay
//!     serializable and comparable without dynamic typing.
//!
//! Projection
//!
//!     Tokens serialize to `{type, value, position, ...extras}` with extras flattened into
//!     the top-level map. See [core] for the exact rules.

pub mod core;
pub mod kind;
pub mod scalar;

pub use self::core::{Extras, Token};
pub use kind::TokenKind;
pub use scalar::Scalar;
