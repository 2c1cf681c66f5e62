//! Block nodes

use crate::tmark::ast::inlines::AstInline;
use crate::tmark::ast::meta::MetaConfig;
use serde::Serialize;

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstBlock {
    pub start: usize,
    pub end: usize,
    pub indent: usize,
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// Block variants and their payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum BlockKind {
    /// Stand-in for a document without any blocks.
    Dummy,
    /// `- ` items. Children are `ListItem`s.
    List { children: Vec<AstBlock> },
    /// `<n>. ` items numbered sequentially from `first`. Children are `ListItem`s.
    OrderedList { first: u32, children: Vec<AstBlock> },
    ListItem { children: Vec<AstBlock> },
    /// `===`
    Separator,
    /// `> ` block; a single Text child holding the verbatim content.
    RawBlock { children: Vec<AstInline> },
    /// `#` to `#####`; the child is a single-line paragraph.
    Header { size: u8, child: Box<AstBlock> },
    Paragraph { children: Vec<AstInline> },
    /// Children are `TableRow`s. `header` is set when a `|-` line closes the first row.
    Table { header: bool, children: Vec<AstBlock> },
    /// Children are `TableCell`s. `divider` is set when the row was closed by a `|-` line.
    TableRow { divider: bool, children: Vec<AstBlock> },
    TableCell {
        config: TableCellConfig,
        children: Vec<AstBlock>,
    },
    /// `[directives] body`: one task.
    Meta {
        config: MetaConfig,
        children: Vec<AstBlock>,
    },
}

/// Span of a table cell along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellSpan {
    Count(u32),
    /// `*`: take whatever is left.
    Fill,
}

impl Default for CellSpan {
    fn default() -> Self {
        CellSpan::Count(1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCellConfig {
    pub width: CellSpan,
    pub height: CellSpan,
    pub invisible: bool,
}

impl AstBlock {
    pub fn new(start: usize, end: usize, indent: usize, kind: BlockKind) -> Self {
        Self {
            start,
            end,
            indent,
            kind,
        }
    }

    pub fn node_type(&self) -> &'static str {
        match &self.kind {
            BlockKind::Dummy => "Dummy",
            BlockKind::List { .. } => "List",
            BlockKind::OrderedList { .. } => "OrderedList",
            BlockKind::ListItem { .. } => "ListItem",
            BlockKind::Separator => "Separator",
            BlockKind::RawBlock { .. } => "RawBlock",
            BlockKind::Header { .. } => "Header",
            BlockKind::Paragraph { .. } => "Paragraph",
            BlockKind::Table { .. } => "Table",
            BlockKind::TableRow { .. } => "TableRow",
            BlockKind::TableCell { .. } => "TableCell",
            BlockKind::Meta { .. } => "Meta",
        }
    }

    /// Nested blocks. Empty for blocks whose children are inlines.
    pub fn block_children(&self) -> &[AstBlock] {
        match &self.kind {
            BlockKind::List { children }
            | BlockKind::OrderedList { children, .. }
            | BlockKind::ListItem { children }
            | BlockKind::Table { children, .. }
            | BlockKind::TableRow { children, .. }
            | BlockKind::TableCell { children, .. }
            | BlockKind::Meta { children, .. } => children,
            BlockKind::Header { child, .. } => std::slice::from_ref(child.as_ref()),
            BlockKind::Dummy
            | BlockKind::Separator
            | BlockKind::RawBlock { .. }
            | BlockKind::Paragraph { .. } => &[],
        }
    }

    /// Inline children of paragraphs and raw blocks.
    pub fn inline_children(&self) -> &[AstInline] {
        match &self.kind {
            BlockKind::Paragraph { children } | BlockKind::RawBlock { children } => children,
            _ => &[],
        }
    }

    pub fn meta_config(&self) -> Option<&MetaConfig> {
        match &self.kind {
            BlockKind::Meta { config, .. } => Some(config),
            _ => None,
        }
    }

    /// The only mutable part of a built tree.
    pub fn meta_config_mut(&mut self) -> Option<&mut MetaConfig> {
        match &mut self.kind {
            BlockKind::Meta { config, .. } => Some(config),
            _ => None,
        }
    }

    /// Text content with markup stripped, blocks separated by newlines.
    pub fn plain_text(&self) -> String {
        let inlines = self.inline_children();
        if !inlines.is_empty() {
            return inlines.iter().map(AstInline::plain_text).collect();
        }
        self.block_children()
            .iter()
            .map(AstBlock::plain_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Shift every offset in the subtree so that `origin` becomes 0.
    pub(crate) fn rebase(&mut self, origin: usize) {
        self.start -= origin;
        self.end -= origin;
        match &mut self.kind {
            BlockKind::List { children }
            | BlockKind::OrderedList { children, .. }
            | BlockKind::ListItem { children }
            | BlockKind::Table { children, .. }
            | BlockKind::TableRow { children, .. }
            | BlockKind::TableCell { children, .. }
            | BlockKind::Meta { children, .. } => {
                children.iter_mut().for_each(|child| child.rebase(origin))
            }
            BlockKind::Header { child, .. } => child.rebase(origin),
            BlockKind::Paragraph { children } | BlockKind::RawBlock { children } => {
                children.iter_mut().for_each(|child| child.rebase(origin))
            }
            BlockKind::Dummy | BlockKind::Separator => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmark::ast::inlines::InlineKind;

    fn text(start: usize, value: &str) -> AstInline {
        AstInline::new(
            start,
            start + value.len(),
            0,
            InlineKind::Text {
                text: value.to_string(),
            },
        )
    }

    #[test]
    fn test_rebase_shifts_whole_subtree() {
        let paragraph = AstBlock::new(
            12,
            17,
            1,
            BlockKind::Paragraph {
                children: vec![text(12, "hello")],
            },
        );
        let mut item = AstBlock::new(
            10,
            17,
            0,
            BlockKind::ListItem {
                children: vec![paragraph],
            },
        );
        item.rebase(10);
        assert_eq!((item.start, item.end), (0, 7));
        let child = &item.block_children()[0];
        assert_eq!((child.start, child.end), (2, 7));
        assert_eq!(child.inline_children()[0].start, 2);
    }

    #[test]
    fn test_plain_text_joins_blocks() {
        let first = AstBlock::new(
            0,
            1,
            0,
            BlockKind::Paragraph {
                children: vec![text(0, "a")],
            },
        );
        let second = AstBlock::new(
            2,
            3,
            0,
            BlockKind::Paragraph {
                children: vec![text(2, "b")],
            },
        );
        let item = AstBlock::new(
            0,
            3,
            0,
            BlockKind::ListItem {
                children: vec![first, second],
            },
        );
        assert_eq!(item.plain_text(), "a\nb");
    }

    #[test]
    fn test_cell_config_defaults() {
        let config = TableCellConfig::default();
        assert_eq!(config.width, CellSpan::Count(1));
        assert_eq!(config.height, CellSpan::Count(1));
        assert!(!config.invisible);
    }
}
