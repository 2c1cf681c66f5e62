//! Main module for tmark library functionality

pub mod ast;
pub mod config;
pub mod error;
pub mod filter;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod testing;

pub use ast::{AstBlock, AstFilter, AstInline, AstNode, MetaConfig};
pub use parsing::{parse_filter, Parser, ParserOptions};
