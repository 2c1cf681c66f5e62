//! AST
//!
//!     The parser produces three families of nodes, all sharing the same base fields:
//!
//!         start, end: half-open offsets relative to the text handed to the parse call. For
//!             [parse_blocks_split](crate::tmark::parsing::Parser::parse_blocks_split) that text
//!             is the block's own substring, so offsets restart at 0 for every block.
//!         indent: nesting depth in half-tab units (2 spaces by default).
//!
//!     Blocks ([AstBlock]) are the line-structured units: paragraphs, headers, lists, tables,
//!     raw blocks, separators and meta blocks. Inlines ([AstInline]) are styled spans inside
//!     paragraphs. Filters ([AstFilter]) are the boolean query trees of the filter language.
//!
//!     The tree is immutable once built. The one designed mutation point is the
//!     [MetaConfig] of a meta block: consumers may edit it, render it back with
//!     [MetaConfig::to_markup] and re-parse to get a consistent tree again.
//!
//!     [AstNode] is a borrowed, uniform view over any node, used by the position lookup in
//!     [lookup] to walk blocks and inlines together.

pub mod blocks;
pub mod filters;
pub mod inlines;
pub mod lookup;
pub mod meta;
pub mod node;

pub use blocks::{AstBlock, BlockKind, CellSpan, TableCellConfig};
pub use filters::{AstFilter, FilterKind};
pub use inlines::{AstInline, InlineKind};
pub use lookup::{idx_to_ast_path, idx_to_node_path};
pub use meta::{Admonition, MetaConfig, MetaImage};
pub use node::AstNode;
