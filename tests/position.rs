//! Offset to node-path lookup

use tmark::tmark::ast::{
    idx_to_ast_path, idx_to_node_path, AstBlock, AstInline, AstNode, BlockKind, InlineKind,
};
use tmark::tmark::{parse_filter, Parser};

fn paragraph(start: usize, end: usize) -> AstBlock {
    let text = AstInline::new(
        start,
        end,
        0,
        InlineKind::Text {
            text: "x".repeat(end - start),
        },
    );
    AstBlock::new(
        start,
        end,
        0,
        BlockKind::Paragraph {
            children: vec![text],
        },
    )
}

fn siblings() -> Vec<AstBlock> {
    vec![paragraph(0, 10), paragraph(10, 20), paragraph(20, 30)]
}

fn spans(path: &[AstNode<'_>]) -> Vec<(&'static str, usize, usize)> {
    path.iter()
        .map(|node| (node.node_type(), node.start(), node.end()))
        .collect()
}

#[test]
fn test_negative_offset_resolves_to_the_end() {
    let blocks = siblings();
    assert_eq!(
        spans(&idx_to_ast_path(-1, &blocks)),
        vec![("Paragraph", 20, 30), ("Text", 20, 30)]
    );
}

#[test]
fn test_offset_inside_a_sibling() {
    let blocks = siblings();
    assert_eq!(
        spans(&idx_to_ast_path(15, &blocks)),
        vec![("Paragraph", 10, 20), ("Text", 10, 20)]
    );
    // Ends are exclusive: 10 belongs to the second sibling.
    assert_eq!(idx_to_ast_path(10, &blocks)[0].start(), 10);
}

#[test]
fn test_offset_past_the_end_is_the_last_sibling() {
    let blocks = siblings();
    assert_eq!(
        spans(&idx_to_ast_path(10_000, &blocks)),
        vec![("Paragraph", 20, 30)]
    );
}

#[test]
fn test_empty_siblings() {
    assert!(idx_to_ast_path(0, &[]).is_empty());
    assert!(idx_to_ast_path(-5, &[]).is_empty());
}

#[test]
fn test_gap_resolves_to_the_following_sibling() {
    let blocks = vec![paragraph(0, 5), paragraph(10, 20)];
    assert_eq!(
        spans(&idx_to_ast_path(7, &blocks)),
        vec![("Paragraph", 10, 20)]
    );
}

#[test]
fn test_path_through_a_parsed_document() {
    let blocks: Vec<_> = Parser::new("- a\n- **b**").parse_blocks().collect();
    let types: Vec<_> = idx_to_ast_path(8, &blocks)
        .iter()
        .map(AstNode::node_type)
        .collect();
    assert_eq!(types, vec!["List", "ListItem", "Paragraph", "Bold", "Text"]);
}

#[test]
fn test_lookup_over_filter_nodes() {
    let filter = parse_filter("pin | @a & @b").unwrap();
    let path = idx_to_node_path(7, &[AstNode::Filter(&filter)]);
    assert_eq!(
        spans(&path),
        vec![("Or", 0, 13), ("And", 6, 13), ("Tag", 6, 8)]
    );
}
