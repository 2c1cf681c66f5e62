//! Filter expression nodes

use serde::Serialize;

/// A node of a filter expression tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstFilter {
    pub start: usize,
    pub end: usize,
    pub indent: usize,
    #[serde(flatten)]
    pub kind: FilterKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum FilterKind {
    /// `*`
    Any,
    /// `due`
    Due,
    /// `x`
    Done,
    /// `pin`
    Pin,
    /// `hide`
    Hide,
    /// `@tag`; `None` for a bare `@` (has any tag).
    Tag { tag: Option<String> },
    /// `track:n`; `None` for a bare `track` (tracked at all).
    Track { id: Option<u32> },
    /// `/needle/`
    Fuzzy { needle: String },
    /// `'needle'`
    String { needle: String },
    /// `#n`; `None` for a bare `#` (has any priority).
    Priority { priority: Option<u32> },
    Not { op: Box<AstFilter> },
    And {
        op1: Box<AstFilter>,
        op2: Box<AstFilter>,
    },
    Or {
        op1: Box<AstFilter>,
        op2: Box<AstFilter>,
    },
}

impl AstFilter {
    pub fn new(start: usize, end: usize, indent: usize, kind: FilterKind) -> Self {
        Self {
            start,
            end,
            indent,
            kind,
        }
    }

    pub fn node_type(&self) -> &'static str {
        match &self.kind {
            FilterKind::Any => "Any",
            FilterKind::Due => "Due",
            FilterKind::Done => "Done",
            FilterKind::Pin => "Pin",
            FilterKind::Hide => "Hide",
            FilterKind::Tag { .. } => "Tag",
            FilterKind::Track { .. } => "Track",
            FilterKind::Fuzzy { .. } => "Fuzzy",
            FilterKind::String { .. } => "String",
            FilterKind::Priority { .. } => "Priority",
            FilterKind::Not { .. } => "Not",
            FilterKind::And { .. } => "And",
            FilterKind::Or { .. } => "Or",
        }
    }

    pub fn children(&self) -> Vec<&AstFilter> {
        match &self.kind {
            FilterKind::Not { op } => vec![op.as_ref()],
            FilterKind::And { op1, op2 } | FilterKind::Or { op1, op2 } => {
                vec![op1.as_ref(), op2.as_ref()]
            }
            _ => Vec::new(),
        }
    }

    /// Compare two trees ignoring offsets.
    pub fn same_structure(&self, other: &AstFilter) -> bool {
        match (&self.kind, &other.kind) {
            (FilterKind::Not { op: a }, FilterKind::Not { op: b }) => a.same_structure(b),
            (FilterKind::And { op1: a1, op2: a2 }, FilterKind::And { op1: b1, op2: b2 })
            | (FilterKind::Or { op1: a1, op2: a2 }, FilterKind::Or { op1: b1, op2: b2 }) => {
                a1.same_structure(b1) && a2.same_structure(b2)
            }
            (a, b) => a == b,
        }
    }
}
