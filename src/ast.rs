//! AST node model
//!
//!     A single closed node type covers every construct of the supported languages: the
//!     arithmetic expression family (program, assign, add...), the configuration family
//!     (object, pair, array, directive, ucl_program) and shared literals.
//!
//!     Node {
//!         kind:      NodeKind          closed tag
//!         value:     Option<Value>     payload, admitted per kind
//!         children:  Vec<Node>         ordered, count admitted per kind
//!         metadata:  Metadata          String -> Scalar side table
//!     }
//!
//! Construction
//!
//!     Two ways in. The per-variant constructors ([Node::identifier], [Node::binary]...)
//!     cannot produce an invalid node. The generic [Node::build] takes a kind, a value and
//!     children and checks them against the kind, failing with [NodeError]. Values are
//!     never coerced, except that number text is parsed (see [node::parse_number]) unless
//!     the raw flag asks to keep it.
//!
//! Immutability
//!
//!     Nodes are never modified after construction. Rewrites go through
//!     [Node::transform], which allocates replacement nodes and leaves the input intact,
//!     so a tree can be shared by several readers while rewritten copies are produced.

pub mod error;
pub mod kind;
pub mod node;
pub mod pattern;
pub mod snapshot;
pub mod value;

pub use error::NodeError;
pub use kind::{BinaryOp, NodeKind};
pub use node::{Metadata, Node, PreOrder, RAW_KEY};
pub use pattern::{PatternCategory, UnknownCategory};
pub use snapshot::NodeSnapshot;
pub use value::{DirectiveInfo, Value};
