//! Output formats for node trees.
//!
//! JSON output goes through the serde projection in [crate::ast::snapshot]; this module
//! holds the text renderings.

pub mod unweave;

pub use unweave::{render_value, unweave, ToSource};
