//! Offset to node-path lookup
//!
//!     Maps a cursor offset in the source text to the chain of nodes around it, outermost first.
//!     Editors use this to keep a preview in sync with the caret.
//!
//!     The lookup is total. For any integer offset and any sibling list it returns a path:
//!
//!         - empty siblings: empty path.
//!         - negative offset: treated as the last valid offset (`end - 1` of the last sibling).
//!         - offset in a gap between siblings: the path is just the following sibling.
//!         - offset before the first sibling: just the first sibling.
//!         - offset past all siblings: just the last sibling.
//!
//!     Inside a node the lookup only descends into children that actually contain the offset, so
//!     the path stops at the innermost enclosing node.

use crate::tmark::ast::blocks::AstBlock;
use crate::tmark::ast::node::AstNode;

/// Path of nodes containing `idx` among top-level `siblings`, outermost first.
pub fn idx_to_ast_path(idx: isize, siblings: &[AstBlock]) -> Vec<AstNode<'_>> {
    let nodes: Vec<AstNode<'_>> = siblings.iter().map(AstNode::Block).collect();
    idx_to_node_path(idx, &nodes)
}

/// Same as [idx_to_ast_path] over an arbitrary list of sibling nodes.
pub fn idx_to_node_path<'a>(idx: isize, siblings: &[AstNode<'a>]) -> Vec<AstNode<'a>> {
    let Some(last) = siblings.last() else {
        return Vec::new();
    };
    let idx = usize::try_from(idx).unwrap_or_else(|_| last.end().saturating_sub(1));

    let node = siblings
        .iter()
        .find(|node| idx < node.end())
        .unwrap_or(last);
    let mut path = vec![*node];
    if idx < node.start() {
        return path;
    }

    let mut current = *node;
    while let Some(child) = current
        .children()
        .into_iter()
        .find(|child| child.contains(idx))
    {
        path.push(child);
        current = child;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmark::ast::blocks::BlockKind;
    use crate::tmark::ast::inlines::{AstInline, InlineKind};

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

    fn types(path: &[AstNode<'_>]) -> Vec<(&'static str, usize)> {
        path.iter().map(|n| (n.node_type(), n.start())).collect()
    }

    #[test]
    fn test_descends_into_containing_children() {
        let siblings = vec![paragraph(0, 4), paragraph(5, 9)];
        let path = idx_to_ast_path(6, &siblings);
        assert_eq!(types(&path), vec![("Paragraph", 5), ("Text", 5)]);
    }

    #[test]
    fn test_gap_selects_following_sibling_only() {
        let siblings = vec![paragraph(0, 4), paragraph(6, 9)];
        let path = idx_to_ast_path(5, &siblings);
        assert_eq!(types(&path), vec![("Paragraph", 6)]);
    }

    #[test]
    fn test_before_first() {
        let siblings = vec![paragraph(3, 6)];
        let path = idx_to_ast_path(1, &siblings);
        assert_eq!(types(&path), vec![("Paragraph", 3)]);
    }

    #[test]
    fn test_negative_is_last_offset() {
        let siblings = vec![paragraph(0, 4), paragraph(5, 9)];
        let path = idx_to_ast_path(-7, &siblings);
        assert_eq!(types(&path), vec![("Paragraph", 5), ("Text", 5)]);
    }

    #[test]
    fn test_empty() {
        assert!(idx_to_ast_path(0, &[]).is_empty());
        assert!(idx_to_ast_path(-1, &[]).is_empty());
    }
}
