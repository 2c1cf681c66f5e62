//! Tables: rows, header detection, cell configs and nested cell content

use tmark::tmark::ast::{AstBlock, BlockKind, CellSpan};
use tmark::tmark::testing::assert_blocks;
use tmark::tmark::Parser;

fn parse(source: &str) -> Vec<AstBlock> {
    Parser::new(source).parse_blocks().collect()
}

fn table_flags(block: &AstBlock) -> (bool, Vec<bool>) {
    match &block.kind {
        BlockKind::Table { header, children } => {
            let dividers = children
                .iter()
                .map(|row| match &row.kind {
                    BlockKind::TableRow { divider, .. } => *divider,
                    other => panic!("expected a row, got {:?}", other),
                })
                .collect();
            (*header, dividers)
        }
        other => panic!("expected a table, got {:?}", other),
    }
}

#[test]
fn test_header_row_and_body() {
    let blocks = parse("|a|b\n|-\n|c|d");
    assert_blocks(&blocks).count(1).block(0, |table| {
        table
            .is("Table")
            .child_count(2)
            .child(0, |row| {
                row.is("TableRow")
                    .child_count(2)
                    .child(0, |cell| {
                        cell.is("TableCell").text("a");
                    })
                    .child(1, |cell| {
                        cell.text("b");
                    });
            })
            .child(1, |row| {
                row.child_count(2).text("c\nd");
            });
    });
    assert_eq!(table_flags(&blocks[0]), (true, vec![true, false]));
}

#[test]
fn test_multi_line_first_row_is_not_a_header() {
    let blocks = parse("|a\n|b\n|-\n|c");
    assert_eq!(table_flags(&blocks[0]), (false, vec![true, false]));
    assert_blocks(&blocks).block(0, |table| {
        table.child(0, |row| {
            row.child_count(2);
        });
    });
}

#[test]
fn test_last_cell_takes_nested_blocks() {
    let blocks = parse("| a\n  - x\n  - y\n| b");
    assert_blocks(&blocks).count(1).block(0, |table| {
        table.child_count(1).child(0, |row| {
            row.child_count(2).child(0, |cell| {
                cell.child_count(2).child(1, |list| {
                    list.is("List").indent(1).child_count(2);
                });
            });
        });
    });
    assert_eq!(table_flags(&blocks[0]), (false, vec![false]));
}

#[test]
fn test_cell_configs() {
    let blocks = parse("|[2:*] wide|[#]");
    let row = &blocks[0].block_children()[0];
    let configs: Vec<_> = row
        .block_children()
        .iter()
        .map(|cell| match &cell.kind {
            BlockKind::TableCell { config, .. } => *config,
            other => panic!("expected a cell, got {:?}", other),
        })
        .collect();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0].width, CellSpan::Count(2));
    assert_eq!(configs[0].height, CellSpan::Fill);
    assert!(!configs[0].invisible);
    assert!(configs[1].invisible);
    assert_eq!(row.block_children()[0].plain_text(), "wide");
    assert!(row.block_children()[1].block_children().is_empty());
}

#[test]
fn test_table_ends_at_a_non_table_line() {
    assert_blocks(&parse("|a\nafter"))
        .types(&["Table", "Paragraph"])
        .block(1, |para| {
            para.text("after");
        });
}
