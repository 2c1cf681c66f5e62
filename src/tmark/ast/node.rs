//! Borrowed view over any AST node

use crate::tmark::ast::blocks::AstBlock;
use crate::tmark::ast::filters::AstFilter;
use crate::tmark::ast::inlines::AstInline;
use serde::Serialize;

/// A reference to a block, inline or filter node.
///
/// Lets traversals (position lookup, tree dumps) walk mixed block/inline trees without caring
/// which family a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AstNode<'a> {
    Block(&'a AstBlock),
    Inline(&'a AstInline),
    Filter(&'a AstFilter),
}

impl<'a> AstNode<'a> {
    pub fn start(&self) -> usize {
        match self {
            AstNode::Block(b) => b.start,
            AstNode::Inline(i) => i.start,
            AstNode::Filter(f) => f.start,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            AstNode::Block(b) => b.end,
            AstNode::Inline(i) => i.end,
            AstNode::Filter(f) => f.end,
        }
    }

    pub fn indent(&self) -> usize {
        match self {
            AstNode::Block(b) => b.indent,
            AstNode::Inline(i) => i.indent,
            AstNode::Filter(f) => f.indent,
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            AstNode::Block(b) => b.node_type(),
            AstNode::Inline(i) => i.node_type(),
            AstNode::Filter(f) => f.node_type(),
        }
    }

    /// Children in source order. Blocks contribute their nested blocks and their inlines.
    pub fn children(&self) -> Vec<AstNode<'a>> {
        match *self {
            AstNode::Block(b) => b
                .block_children()
                .iter()
                .map(AstNode::Block)
                .chain(b.inline_children().iter().map(AstNode::Inline))
                .collect(),
            AstNode::Inline(i) => i.children().iter().map(AstNode::Inline).collect(),
            AstNode::Filter(f) => f.children().into_iter().map(AstNode::Filter).collect(),
        }
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.start() <= idx && idx < self.end()
    }

    pub fn as_block(&self) -> Option<&'a AstBlock> {
        match *self {
            AstNode::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_inline(&self) -> Option<&'a AstInline> {
        match *self {
            AstNode::Inline(i) => Some(i),
            _ => None,
        }
    }
}

impl<'a> From<&'a AstBlock> for AstNode<'a> {
    fn from(block: &'a AstBlock) -> Self {
        AstNode::Block(block)
    }
}

impl<'a> From<&'a AstInline> for AstNode<'a> {
    fn from(inline: &'a AstInline) -> Self {
        AstNode::Inline(inline)
    }
}

impl<'a> From<&'a AstFilter> for AstNode<'a> {
    fn from(filter: &'a AstFilter) -> Self {
        AstNode::Filter(filter)
    }
}
