//! # tmark
//!
//! Lexer and parsers for the tmark task markup.
//!
//! The markup is a small, indentation-aware dialect used to write todo items: every top-level
//! block is a self-contained text unit (often a `[...]` meta block describing one task), and a
//! separate filter language queries those tasks. Both grammars share one lexer.
//!
//! File Layout
//!
//! src/tmark
//!   ├── lexing     Base tokenization (logos) and the ring-buffer lexer
//!   ├── ast        Node types, meta config and the offset → node path lookup
//!   ├── parsing    Block, inline, table, meta and filter grammars
//!   ├── formats    Text renderings of the AST (filter strings, treeviz)
//!   ├── filter     Filter evaluation against tasks
//!   └── config     Embedded defaults layered with user files
//!
//! For testing helpers, see the [testing module](tmark::testing).

pub mod tmark;
