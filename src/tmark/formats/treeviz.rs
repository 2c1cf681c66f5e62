//! Treeviz formatter for AST nodes
//!
//! Treeviz is a one line per node dump of a tree, quick to scan and stable enough for snapshot
//! tests. Nesting is drawn with box connectors, two columns per level:
//!
//!     ⧉ 2 blocks
//!     ├─ ☐ [x #1] 0..16
//!     │ └─ ¶ buy milk 7..16
//!     │   └─ ◦ buy milk 7..15
//!     └─ ☰ 1 items 16..19
//!       └─ • - 16..19
//!         └─ ¶ a 18..19
//!           └─ ◦ a 18..19
//!
//! Icons
//!     Blocks:
//!         Paragraph: ¶
//!         Header: ⊤
//!         List / OrderedList: ☰
//!         ListItem: •
//!         Table: ▦   TableRow: ═   TableCell: ▭
//!         RawBlock: 𝒱
//!         Separator: ―
//!         Meta: ☐
//!     Inlines:
//!         Text: ◦
//!         Italic: 𝐼   Bold: 𝐁   Highlight: ✎   Strike: ∼   Sub: ₓ   Sup: ˣ
//!         RawInline: ƒ
//!         Link: ⊕
//!         TagRef: @
//!     Filters:
//!         any operator or predicate: ⋄

use crate::tmark::ast::{AstNode, BlockKind, CellSpan, InlineKind};
use crate::tmark::formats::filter_string::filter_to_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreevizOptions {
    /// Labels longer than this many characters are cut and get `...` appended.
    pub truncate: usize,
    pub show_offsets: bool,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        Self {
            truncate: 40,
            show_offsets: true,
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Paragraph" => "¶",
        "Header" => "⊤",
        "List" | "OrderedList" => "☰",
        "ListItem" => "•",
        "Table" => "▦",
        "TableRow" => "═",
        "TableCell" => "▭",
        "RawBlock" => "𝒱",
        "Separator" => "―",
        "Meta" => "☐",
        "Text" => "◦",
        "Italic" => "𝐼",
        "Bold" => "𝐁",
        "Highlight" => "✎",
        "Strike" => "∼",
        "Sub" => "ₓ",
        "Sup" => "ˣ",
        "RawInline" => "ƒ",
        "Link" => "⊕",
        "TagRef" => "@",
        "Dummy" => "∅",
        _ => "⋄",
    }
}

fn span_label(span: CellSpan) -> String {
    match span {
        CellSpan::Count(n) => n.to_string(),
        CellSpan::Fill => "*".to_string(),
    }
}

/// Single-line summary of a node.
fn label(node: &AstNode<'_>) -> String {
    let text = match *node {
        AstNode::Block(block) => match &block.kind {
            BlockKind::Dummy => "empty".to_string(),
            BlockKind::List { children } => format!("{} items", children.len()),
            BlockKind::OrderedList { first, children } => {
                format!("{} items from {}", children.len(), first)
            }
            BlockKind::ListItem { .. } => "-".to_string(),
            BlockKind::Separator => "===".to_string(),
            BlockKind::Header { size, child } => format!("h{} {}", size, child.plain_text()),
            BlockKind::Table { header, children } => {
                let suffix = if *header { " with header" } else { "" };
                format!("{} rows{}", children.len(), suffix)
            }
            BlockKind::TableRow { divider, children } => {
                let suffix = if *divider { " |-" } else { "" };
                format!("{} cells{}", children.len(), suffix)
            }
            BlockKind::TableCell { config, .. } => {
                let mut text = format!("{}:{}", span_label(config.width), span_label(config.height));
                if config.invisible {
                    text.push_str(" hidden");
                }
                text
            }
            BlockKind::Meta { config, .. } => config.to_markup(),
            BlockKind::RawBlock { .. } | BlockKind::Paragraph { .. } => block.plain_text(),
        },
        AstNode::Inline(inline) => match &inline.kind {
            InlineKind::Link { link, alias } => match alias {
                Some(alias) => format!("{link}; {alias}"),
                None => link.clone(),
            },
            _ => inline.plain_text(),
        },
        AstNode::Filter(filter) => format!("{} {}", filter.node_type(), filter_to_string(filter)),
    };
    text.replace('\n', "↵")
}

fn format_node(
    node: &AstNode<'_>,
    prefix: &str,
    is_last: bool,
    options: &TreevizOptions,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(node.node_type());
    output.push_str(&format!(
        "{}{} {} {}",
        prefix,
        connector,
        icon,
        truncate(&label(node), options.truncate)
    ));
    if options.show_offsets {
        output.push_str(&format!(" {}..{}", node.start(), node.end()));
    }
    output.push('\n');

    let children = node.children();
    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    for (i, child) in children.iter().enumerate() {
        format_node(child, &child_prefix, i == children.len() - 1, options, output);
    }
}

/// Dump a list of sibling nodes (usually the top-level blocks of a document).
pub fn to_treeviz_str(nodes: &[AstNode<'_>], options: &TreevizOptions) -> String {
    let noun = if nodes.len() == 1 { "block" } else { "blocks" };
    let mut output = format!("⧉ {} {}\n", nodes.len(), noun);
    for (i, node) in nodes.iter().enumerate() {
        format_node(node, "", i == nodes.len() - 1, options, &mut output);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmark::parsing::Parser;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn test_dump_document() {
        let blocks: Vec<_> = Parser::new("[x #1] buy milk\n- a").parse_blocks().collect();
        let nodes: Vec<_> = blocks.iter().map(AstNode::Block).collect();
        let output = to_treeviz_str(&nodes, &TreevizOptions::default());
        insta::assert_snapshot!(output.trim_end(), @r###"
        ⧉ 2 blocks
        ├─ ☐ [x #1] 0..16
        │ └─ ¶ buy milk 7..16
        │   └─ ◦ buy milk 7..15
        └─ ☰ 1 items 16..19
          └─ • - 16..19
            └─ ¶ a 18..19
              └─ ◦ a 18..19
        "###);
    }
}
