//! Fluent assertions over parsed blocks
//!
//!     Tests read better when they state the shape they expect instead of matching nested enums
//!     by hand:
//!
//!         assert_blocks(&blocks)
//!             .count(1)
//!             .block(0, |list| {
//!                 list.is("List")
//!                     .child_count(2)
//!                     .child(0, |item| item.is("ListItem").text("first"));
//!             });
//!
//!     Every failure message carries the path of the node being checked, e.g.
//!     `blocks[0].children[1].inlines[0]`.

use crate::tmark::ast::{AstBlock, AstInline, InlineKind, MetaConfig};

pub fn assert_blocks(blocks: &[AstBlock]) -> BlocksAssertion<'_> {
    BlocksAssertion { blocks }
}

fn summarize(blocks: &[AstBlock]) -> String {
    blocks
        .iter()
        .map(AstBlock::node_type)
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct BlocksAssertion<'a> {
    blocks: &'a [AstBlock],
}

impl<'a> BlocksAssertion<'a> {
    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.blocks.len(),
            expected,
            "Expected {} blocks, found {}: [{}]",
            expected,
            self.blocks.len(),
            summarize(self.blocks)
        );
        self
    }

    /// Top-level node types, in order.
    pub fn types(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.blocks.iter().map(AstBlock::node_type).collect();
        assert_eq!(actual, expected, "Top-level block types differ");
        self
    }

    pub fn block<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        assert!(
            index < self.blocks.len(),
            "Block index {} out of bounds ({} blocks: [{}])",
            index,
            self.blocks.len(),
            summarize(self.blocks)
        );
        assertion(BlockAssertion {
            block: &self.blocks[index],
            context: format!("blocks[{}]", index),
        });
        self
    }
}

pub struct BlockAssertion<'a> {
    block: &'a AstBlock,
    context: String,
}

impl<'a> BlockAssertion<'a> {
    pub fn is(self, node_type: &str) -> Self {
        assert_eq!(
            self.block.node_type(),
            node_type,
            "{}: expected {}, found {}",
            self.context,
            node_type,
            self.block.node_type()
        );
        self
    }

    pub fn span(self, start: usize, end: usize) -> Self {
        assert_eq!(
            (self.block.start, self.block.end),
            (start, end),
            "{}: span mismatch",
            self.context
        );
        self
    }

    pub fn indent(self, expected: usize) -> Self {
        assert_eq!(
            self.block.indent, expected,
            "{}: expected indent {}, found {}",
            self.context, expected, self.block.indent
        );
        self
    }

    /// Compare the plain text (markup stripped, blocks joined by newlines).
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.block.plain_text(),
            expected,
            "{}: text mismatch",
            self.context
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let children = self.block.block_children();
        assert_eq!(
            children.len(),
            expected,
            "{}: expected {} children, found {}: [{}]",
            self.context,
            expected,
            children.len(),
            summarize(children)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let children = self.block.block_children();
        assert!(
            index < children.len(),
            "{}: child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(BlockAssertion {
            block: &children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }

    /// Node types of the inline children, in order.
    pub fn inline_types(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self
            .block
            .inline_children()
            .iter()
            .map(AstInline::node_type)
            .collect();
        assert_eq!(actual, expected, "{}: inline types differ", self.context);
        self
    }

    pub fn inline<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(InlineAssertion<'a>),
    {
        let inlines = self.block.inline_children();
        assert!(
            index < inlines.len(),
            "{}: inline index {} out of bounds ({} inlines)",
            self.context,
            index,
            inlines.len()
        );
        assertion(InlineAssertion {
            inline: &inlines[index],
            context: format!("{}.inlines[{}]", self.context, index),
        });
        self
    }

    pub fn meta<F>(self, assertion: F) -> Self
    where
        F: FnOnce(&'a MetaConfig),
    {
        match self.block.meta_config() {
            Some(config) => assertion(config),
            None => panic!(
                "{}: expected a Meta block, found {}",
                self.context,
                self.block.node_type()
            ),
        }
        self
    }
}

pub struct InlineAssertion<'a> {
    inline: &'a AstInline,
    context: String,
}

impl<'a> InlineAssertion<'a> {
    pub fn is(self, node_type: &str) -> Self {
        assert_eq!(
            self.inline.node_type(),
            node_type,
            "{}: expected {}, found {}",
            self.context,
            node_type,
            self.inline.node_type()
        );
        self
    }

    pub fn span(self, start: usize, end: usize) -> Self {
        assert_eq!(
            (self.inline.start, self.inline.end),
            (start, end),
            "{}: span mismatch",
            self.context
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.inline.plain_text(),
            expected,
            "{}: text mismatch",
            self.context
        );
        self
    }

    pub fn link(self, link: &str, alias: Option<&str>) -> Self {
        match &self.inline.kind {
            InlineKind::Link {
                link: actual,
                alias: actual_alias,
            } => {
                assert_eq!(actual, link, "{}: link mismatch", self.context);
                assert_eq!(
                    actual_alias.as_deref(),
                    alias,
                    "{}: alias mismatch",
                    self.context
                );
            }
            _ => panic!(
                "{}: expected Link, found {}",
                self.context,
                self.inline.node_type()
            ),
        }
        self
    }

    pub fn monospace(self, expected: bool) -> Self {
        match &self.inline.kind {
            InlineKind::RawInline { monospace, .. } => assert_eq!(
                *monospace, expected,
                "{}: monospace mismatch",
                self.context
            ),
            _ => panic!(
                "{}: expected RawInline, found {}",
                self.context,
                self.inline.node_type()
            ),
        }
        self
    }

    pub fn child_types(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self
            .inline
            .children()
            .iter()
            .map(AstInline::node_type)
            .collect();
        assert_eq!(actual, expected, "{}: child types differ", self.context);
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(InlineAssertion<'a>),
    {
        let children = self.inline.children();
        assert!(
            index < children.len(),
            "{}: child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(InlineAssertion {
            inline: &children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }
}
