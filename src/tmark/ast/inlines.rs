//! Inline nodes

use serde::Serialize;

/// An inline node inside a paragraph or raw block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstInline {
    pub start: usize,
    pub end: usize,
    pub indent: usize,
    #[serde(flatten)]
    pub kind: InlineKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum InlineKind {
    /// Literal text. Escapes are resolved and line breaks are kept as `\n`, so `text` can differ
    /// from the source slice `start..end`.
    Text { text: String },
    /// `**x**`
    Bold { children: Vec<AstInline> },
    /// `*x*`
    Italic { children: Vec<AstInline> },
    /// `~~x~~`
    Strike { children: Vec<AstInline> },
    /// `***x***`
    Highlight { children: Vec<AstInline> },
    /// `~x~`
    Sub { children: Vec<AstInline> },
    /// `^x^`
    Sup { children: Vec<AstInline> },
    /// `` `x` `` or, with `monospace`, ``` ``x`` ```. Markup inside is not interpreted.
    RawInline {
        monospace: bool,
        children: Vec<AstInline>,
    },
    /// `<link>` or `<link; alias>`
    Link { link: String, alias: Option<String> },
    /// `@tag`; the child is the Text of the tag name.
    TagRef { child: Box<AstInline> },
}

impl AstInline {
    pub fn new(start: usize, end: usize, indent: usize, kind: InlineKind) -> Self {
        Self {
            start,
            end,
            indent,
            kind,
        }
    }

    pub fn node_type(&self) -> &'static str {
        match &self.kind {
            InlineKind::Text { .. } => "Text",
            InlineKind::Bold { .. } => "Bold",
            InlineKind::Italic { .. } => "Italic",
            InlineKind::Strike { .. } => "Strike",
            InlineKind::Highlight { .. } => "Highlight",
            InlineKind::Sub { .. } => "Sub",
            InlineKind::Sup { .. } => "Sup",
            InlineKind::RawInline { .. } => "RawInline",
            InlineKind::Link { .. } => "Link",
            InlineKind::TagRef { .. } => "TagRef",
        }
    }

    pub fn children(&self) -> &[AstInline] {
        match &self.kind {
            InlineKind::Bold { children }
            | InlineKind::Italic { children }
            | InlineKind::Strike { children }
            | InlineKind::Highlight { children }
            | InlineKind::Sub { children }
            | InlineKind::Sup { children }
            | InlineKind::RawInline { children, .. } => children,
            InlineKind::TagRef { child } => std::slice::from_ref(child.as_ref()),
            InlineKind::Text { .. } | InlineKind::Link { .. } => &[],
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            InlineKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Visible text: Text content, link aliases (or links), and tag names with their `@`.
    pub fn plain_text(&self) -> String {
        match &self.kind {
            InlineKind::Text { text } => text.clone(),
            InlineKind::Link { link, alias } => alias.clone().unwrap_or_else(|| link.clone()),
            InlineKind::TagRef { child } => format!("@{}", child.plain_text()),
            _ => self.children().iter().map(AstInline::plain_text).collect(),
        }
    }

    pub(crate) fn rebase(&mut self, origin: usize) {
        self.start -= origin;
        self.end -= origin;
        match &mut self.kind {
            InlineKind::Bold { children }
            | InlineKind::Italic { children }
            | InlineKind::Strike { children }
            | InlineKind::Highlight { children }
            | InlineKind::Sub { children }
            | InlineKind::Sup { children }
            | InlineKind::RawInline { children, .. } => {
                children.iter_mut().for_each(|child| child.rebase(origin))
            }
            InlineKind::TagRef { child } => child.rebase(origin),
            InlineKind::Text { .. } | InlineKind::Link { .. } => {}
        }
    }
}
