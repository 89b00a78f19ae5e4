//! Engines that consume a finished tree: the [Analyzer] measures it, the [Transformer]
//! produces rewritten copies of it.

pub mod analyzer;
pub mod transformer;

pub use analyzer::{count_nodes, tree_depth, AnalysisReport, Analyzer};
pub use transformer::Transformer;
