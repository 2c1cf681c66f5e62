//! Filter stringifier
//!
//! Binary operators are always parenthesized, except at the top level, so the output never
//! depends on precedence rules. Parsing the output gives back a tree of the same shape.

use crate::tmark::ast::{AstFilter, FilterKind};

/// Canonical text for a filter.
pub fn filter_to_string(filter: &AstFilter) -> String {
    match &filter.kind {
        FilterKind::And { op1, op2 } => binary(op1, "&", op2),
        FilterKind::Or { op1, op2 } => binary(op1, "|", op2),
        _ => render(filter),
    }
}

fn binary(op1: &AstFilter, operator: &str, op2: &AstFilter) -> String {
    format!("{} {} {}", render(op1), operator, render(op2))
}

fn render(filter: &AstFilter) -> String {
    match &filter.kind {
        FilterKind::Any => "*".to_string(),
        FilterKind::Due => "due".to_string(),
        FilterKind::Done => "x".to_string(),
        FilterKind::Pin => "pin".to_string(),
        FilterKind::Hide => "hide".to_string(),
        FilterKind::Tag { tag } => format!("@{}", tag.as_deref().unwrap_or_default()),
        FilterKind::Track { id: Some(id) } => format!("track:{id}"),
        FilterKind::Track { id: None } => "track".to_string(),
        FilterKind::Priority {
            priority: Some(priority),
        } => format!("#{priority}"),
        FilterKind::Priority { priority: None } => "#".to_string(),
        FilterKind::String { needle } => quote(needle, '\''),
        FilterKind::Fuzzy { needle } => quote(needle, '/'),
        FilterKind::Not { op } => format!("!{}", render(op)),
        FilterKind::And { op1, op2 } => format!("({})", binary(op1, "&", op2)),
        FilterKind::Or { op1, op2 } => format!("({})", binary(op1, "|", op2)),
    }
}

fn quote(needle: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push(delimiter);
    for ch in needle.chars() {
        if ch == delimiter || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push(delimiter);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmark::parsing::parse_filter;

    fn canonical(query: &str) -> String {
        filter_to_string(&parse_filter(query).unwrap())
    }

    #[test]
    fn test_canonical_forms() {
        assert_eq!(canonical("@work&!done"), "@work & !x");
        assert_eq!(canonical("((pin))"), "pin");
        assert_eq!(canonical("pin | @a & @b"), "pin | (@a & @b)");
        assert_eq!(canonical("!(pin | due)"), "!(pin | due)");
        assert_eq!(canonical("(x | pin) | due"), "(x | pin) | due");
    }

    #[test]
    fn test_literals_are_escaped() {
        assert_eq!(canonical(r"'a\'b'"), r"'a\'b'");
        assert_eq!(canonical(r"/a\\b/"), r"/a\\b/");
    }
}
