//! # wiregram
//!
//! Building blocks for small language pipelines: text goes in, a persistent AST comes
//! out, and the AST can be queried, rewritten and rendered back to text.
//!
//! Pipeline
//!
//!     source text
//!         -> language lexer (logos, [scanning], [matching])
//!         -> token source ([source]: buffered or bounded streaming window)
//!         -> parser ([parsing] base plus a language grammar)
//!         -> [ast::Node] tree
//!         -> [fabric::Fabric] bundle: queries, [engines], unweave ([formats])
//!
//! Modules
//!
//!     token       token model and its JSON projection
//!     matching    Brzozowski derivative matching over byte expressions
//!     scanning    cursor-based prefix scanning over text
//!     source      lazily filled token sources
//!     parsing     shared parser base with diagnostics and recovery
//!     ast         immutable nodes, traversal, persistent transforms
//!     formats     unweaving a tree back to source text
//!     engines     analysis and rewrite passes
//!     fabric      the processed-input bundle
//!     languages   the [languages::Language] trait, registry and the expression language
//!     logging     subscriber setup driven by `wiregram-config`
//!
//! Configuration lives in the `wiregram-config` crate, re-exported as [config].

pub mod ast;
pub mod engines;
pub mod fabric;
pub mod formats;
pub mod languages;
pub mod logging;
pub mod matching;
pub mod parsing;
pub mod scanning;
pub mod source;
pub mod token;

pub use wiregram_config as config;
