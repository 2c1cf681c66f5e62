//! Output formats
//!
//!     filter_string: canonical text of a filter tree, the inverse of the filter grammar.
//!     treeviz: one-line-per-node dump of block, inline and filter trees.
//!
//!     JSON and YAML come straight from the serde derives on the AST and are produced by the
//!     binary.

pub mod filter_string;
pub mod treeviz;

pub use filter_string::filter_to_string;
pub use treeviz::{to_treeviz_str, TreevizOptions};
