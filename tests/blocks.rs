//! Block grammar: dispatch, nesting and offsets of top-level blocks

use rstest::rstest;
use tmark::tmark::ast::{AstBlock, BlockKind};
use tmark::tmark::testing::assert_blocks;
use tmark::tmark::parsing::MAX_BLOCK_DEPTH;
use tmark::tmark::{Parser, ParserOptions};

fn parse(source: &str) -> Vec<AstBlock> {
    Parser::new(source).parse_blocks().collect()
}

#[rstest]
#[case("# Title", "Header")]
#[case("[x] done", "Meta")]
#[case("- item", "List")]
#[case("3. item", "OrderedList")]
#[case("| cell", "Table")]
#[case("=====", "Separator")]
#[case("> raw", "RawBlock")]
#[case("just text", "Paragraph")]
#[case("-not a list", "Paragraph")]
#[case("####### too deep", "Paragraph")]
fn test_dispatch(#[case] source: &str, #[case] node_type: &str) {
    assert_blocks(&parse(source)).count(1).types(&[node_type]);
}

#[test]
fn test_empty_document_is_a_single_dummy() {
    assert_blocks(&parse("\n\n   \n"))
        .count(1)
        .block(0, |block| {
            block.is("Dummy").span(0, 0);
        });
}

#[test]
fn test_paragraphs_split_on_blank_lines() {
    assert_blocks(&parse("one\ntwo\n\nthree"))
        .count(2)
        .block(0, |block| {
            block.is("Paragraph").text("one\ntwo").span(0, 8);
        })
        .block(1, |block| {
            block.is("Paragraph").text("three").span(9, 14);
        });
}

#[test]
fn test_header_takes_one_line() {
    assert_blocks(&parse("## Title\nbody"))
        .types(&["Header", "Paragraph"])
        .block(0, |header| {
            header.span(0, 9).text("Title").child(0, |child| {
                child.is("Paragraph").text("Title");
            });
        });
    match &parse("### x")[0].kind {
        BlockKind::Header { size, .. } => assert_eq!(*size, 3),
        other => panic!("expected a header, got {:?}", other),
    }
}

#[test]
fn test_list_items_hold_nested_blocks() {
    let source = "- first\n  continued\n  - inner\n- second";
    assert_blocks(&parse(source)).count(1).block(0, |list| {
        list.is("List")
            .child_count(2)
            .child(0, |item| {
                item.is("ListItem")
                    .child_count(2)
                    .child(0, |para| {
                        para.is("Paragraph").indent(1).text("first\ncontinued");
                    })
                    .child(1, |inner| {
                        inner.is("List").indent(1).text("inner");
                    });
            })
            .child(1, |item| {
                item.is("ListItem").text("second");
            });
    });
}

#[test]
fn test_ordered_list_needs_consecutive_numbers() {
    let blocks = parse("1. a\n3. b\n");
    assert_blocks(&blocks)
        .types(&["OrderedList", "OrderedList"])
        .block(0, |list| {
            list.child_count(1).span(0, 5).text("a");
        })
        .block(1, |list| {
            list.child_count(1).span(5, 10).text("b");
        });
    match &blocks[1].kind {
        BlockKind::OrderedList { first, .. } => assert_eq!(*first, 3),
        other => panic!("expected an ordered list, got {:?}", other),
    }

    assert_blocks(&parse("4. a\n5. b\n6. c"))
        .count(1)
        .block(0, |list| {
            list.is("OrderedList").child_count(3);
        });
}

#[test]
fn test_lists_of_different_kinds_do_not_merge() {
    assert_blocks(&parse("- a\n1. b")).types(&["List", "OrderedList"]);
}

#[test]
fn test_separator_between_paragraphs() {
    assert_blocks(&parse("above\n===\nbelow"))
        .types(&["Paragraph", "Separator", "Paragraph"])
        .block(1, |sep| {
            sep.span(6, 9);
        });
}

#[test]
fn test_raw_block_keeps_markup_verbatim() {
    assert_blocks(&parse("> **not bold**"))
        .count(1)
        .block(0, |raw| {
            raw.is("RawBlock")
                .inline_types(&["Text"])
                .text("**not bold**");
        });
}

#[test]
fn test_raw_block_continues_on_deeper_lines() {
    let source = "> first\n  second\n\n    third\nafter";
    assert_blocks(&parse(source))
        .types(&["RawBlock", "Paragraph"])
        .block(0, |raw| {
            raw.text("first\nsecond\n\n  third");
        })
        .block(1, |para| {
            para.text("after");
        });
}

#[test]
fn test_blank_lines_do_not_end_nested_blocks() {
    assert_blocks(&parse("- a\n\n  b\n- c"))
        .count(1)
        .block(0, |list| {
            list.child_count(2).child(0, |item| {
                item.child_count(2);
            });
        });
}

#[test]
fn test_top_level_blocks_do_not_overlap() {
    let source = "# h\n[x] a\n  b\n- c\n| d\n===\n> e\nf";
    let blocks = parse(source);
    assert_eq!(blocks.len(), 7);
    for pair in blocks.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
    }
    assert!(blocks.last().unwrap().end <= source.len());
}

/// Containers of `node_type` along the first-child chain of `block`, and the innermost block.
fn nesting<'a>(mut block: &'a AstBlock, node_type: &str) -> (usize, &'a AstBlock) {
    let mut depth = 0;
    loop {
        if block.node_type() == node_type {
            depth += 1;
        }
        match block.block_children().first() {
            Some(child) => block = child,
            None => return (depth, block),
        }
    }
}

#[rstest]
#[case("- ", "List")]
#[case("1. ", "OrderedList")]
#[case("[x] ", "Meta")]
fn test_chained_markers_stop_nesting_at_the_depth_limit(
    #[case] marker: &str,
    #[case] node_type: &str,
) {
    let source = format!("{}x", marker.repeat(3000));
    let blocks = parse(&source);
    assert_eq!(blocks.len(), 1);

    let (depth, innermost) = nesting(&blocks[0], node_type);
    assert_eq!(depth, MAX_BLOCK_DEPTH);
    assert_eq!(innermost.node_type(), "Paragraph");
    let text = innermost.plain_text();
    assert!(text.starts_with(marker.trim_end()));
    assert!(text.ends_with('x'));
    assert_eq!(blocks[0].end, source.len());
}

#[test]
fn test_depth_limit_is_configurable() {
    let options = ParserOptions {
        max_depth: 1,
        ..ParserOptions::default()
    };
    let blocks: Vec<_> = Parser::with_options("- - - a\n- b", options)
        .parse_blocks()
        .collect();
    assert_blocks(&blocks).count(1).block(0, |list| {
        list.is("List").child_count(2).child(0, |item| {
            item.is("ListItem").child(0, |body| {
                body.is("Paragraph").text("- - a");
            });
        });
    });
}
