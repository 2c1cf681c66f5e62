//! Inline grammar
//!
//!     Paragraph content is parsed by one loop that accumulates plain text and opens a nested
//!     loop for every styled span. Each open span pushes its style onto a stop list:
//!
//!         - a delimiter matching the innermost stop closes that span.
//!         - a delimiter matching an outer stop ends the inner spans unterminated, so the outer
//!           one can close.
//!         - any other delimiter opens a new span.
//!
//!     Sub and Sup are single-line and end at the next newline. The other styles follow their
//!     paragraph across lines. Raw inlines, links and tag references are read token by token
//!     without nesting.
//!
//!     Nothing here fails: a span that never sees its closing delimiter just ends where its
//!     content ended.

use super::Parser;
use crate::tmark::ast::{AstBlock, AstInline, BlockKind, InlineKind};
use crate::tmark::lexing::{Token, TokenTag};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// Whether `text` is a valid tag name.
pub fn is_tag(text: &str) -> bool {
    TAG_REGEX.is_match(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    Italic,
    Bold,
    Highlight,
    Sub,
    Strike,
    Sup,
}

impl Style {
    fn single_line(self) -> bool {
        matches!(self, Style::Sub | Style::Sup)
    }

    fn into_kind(self, children: Vec<AstInline>) -> InlineKind {
        match self {
            Style::Italic => InlineKind::Italic { children },
            Style::Bold => InlineKind::Bold { children },
            Style::Highlight => InlineKind::Highlight { children },
            Style::Sub => InlineKind::Sub { children },
            Style::Strike => InlineKind::Strike { children },
            Style::Sup => InlineKind::Sup { children },
        }
    }
}

const ASTERISK_STYLES: &[(Style, usize)] = &[
    (Style::Italic, 1),
    (Style::Bold, 2),
    (Style::Highlight, 3),
];
const TILDE_STYLES: &[(Style, usize)] = &[(Style::Sub, 1), (Style::Strike, 2)];
const CARET_STYLES: &[(Style, usize)] = &[(Style::Sup, 1)];

/// How a paragraph ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParagraphMode {
    /// Continues over following lines at the same or deeper indent.
    Block,
    /// Ends at the newline, which is left in place.
    SingleLine,
    /// Single line that also ends at `|`.
    CellLine,
}

#[derive(Debug, Default)]
pub(crate) struct InlineState {
    stops: Vec<Style>,
    single_line_depth: usize,
    multiline: bool,
    cell_line: bool,
    /// Set once the paragraph is over; every open loop unwinds without peeking.
    done: bool,
    indent: usize,
}

/// Why an inline loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    /// The innermost span's delimiter is next, `count` tokens long.
    Close(usize),
    /// An outer span's delimiter is next.
    Interrupt,
    /// Newline inside a single-line span.
    LineEnd,
    Done,
}

/// Pending plain text.
#[derive(Debug, Default)]
struct TextBuf {
    start: Option<usize>,
    end: usize,
    text: String,
}

impl TextBuf {
    fn push(&mut self, token: &Token, text: &str) {
        self.start.get_or_insert(token.start);
        self.end = token.end;
        self.text.push_str(text);
    }

    fn flush(&mut self, nodes: &mut Vec<AstInline>, indent: usize) {
        if let Some(start) = self.start.take() {
            let text = std::mem::take(&mut self.text);
            nodes.push(AstInline::new(start, self.end, indent, InlineKind::Text { text }));
        }
    }
}

impl<'src> Parser<'src> {
    pub(crate) fn parse_paragraph(&mut self, indent: usize, mode: ParagraphMode) -> AstBlock {
        let start = self.lexer.peek_token(0).start;
        self.inline = InlineState {
            multiline: mode == ParagraphMode::Block,
            cell_line: mode == ParagraphMode::CellLine,
            indent,
            ..InlineState::default()
        };
        let (children, _) = self.parse_inlines();
        self.inline = InlineState::default();

        let end = children
            .iter()
            .map(|child| child.end)
            .fold(self.end_from(start), usize::max);
        AstBlock::new(start, end, indent, BlockKind::Paragraph { children })
    }

    fn parse_inlines(&mut self) -> (Vec<AstInline>, Stop) {
        let indent = self.inline.indent;
        let mut nodes = Vec::new();
        let mut text = TextBuf::default();

        let stop = loop {
            if self.inline.done {
                break Stop::Done;
            }
            let token = self.lexer.peek_token(0);
            match token.tag {
                TokenTag::Eof => {
                    self.inline.done = true;
                    break Stop::Done;
                }
                TokenTag::Newline => {
                    if self.inline.single_line_depth > 0 {
                        break Stop::LineEnd;
                    }
                    if !self.inline.multiline || !self.continue_paragraph(&mut text) {
                        self.inline.done = true;
                        break Stop::Done;
                    }
                }
                TokenTag::Pipe if self.inline.cell_line => {
                    self.inline.done = true;
                    break Stop::Done;
                }
                TokenTag::Backslash => self.parse_escape(&mut text),
                TokenTag::Asterisk | TokenTag::Tilde | TokenTag::Caret => {
                    let (style, count) = self.delimiter_at(&token);
                    if self.inline.stops.last() == Some(&style) {
                        break Stop::Close(count);
                    }
                    if self.inline.stops.contains(&style) {
                        break Stop::Interrupt;
                    }
                    text.flush(&mut nodes, indent);
                    let span = self.parse_span(style, count);
                    nodes.push(span);
                }
                TokenTag::Backtick => {
                    text.flush(&mut nodes, indent);
                    let raw = self.parse_raw_inline(&token);
                    nodes.push(raw);
                }
                TokenTag::LeftAngle if self.link_ahead() => {
                    text.flush(&mut nodes, indent);
                    let link = self.parse_link();
                    nodes.push(link);
                }
                TokenTag::At if self.tag_ahead() => {
                    text.flush(&mut nodes, indent);
                    let tag = self.parse_tag_ref();
                    nodes.push(tag);
                }
                _ => {
                    let token = self.lexer.eat_token();
                    text.push(&token, self.lexer.get_token_text(&token));
                }
            }
        };

        text.flush(&mut nodes, indent);
        (nodes, stop)
    }

    /// At a newline inside a multi-line paragraph: eat it and decide whether the next line
    /// continues the paragraph.
    ///
    /// The newline always belongs to the paragraph. On continuation it becomes a `\n` in the
    /// pending text.
    fn continue_paragraph(&mut self, text: &mut TextBuf) -> bool {
        let newline = self.lexer.eat_token();
        let measured = self.measure_indent();
        if self.lexer.peek_token(0).tag.ends_line() {
            return false;
        }
        self.cursor_mut().line_indent = Some(measured);
        if measured < self.inline.indent {
            return false;
        }
        if self.dispatch() != super::blocks::BlockStart::Paragraph {
            return false;
        }
        text.push(&newline, "\n");
        true
    }

    /// `\` makes the next token literal. A trailing backslash is kept as text.
    fn parse_escape(&mut self, text: &mut TextBuf) {
        let backslash = self.lexer.eat_token();
        let next = self.lexer.peek_token(0);
        if next.tag.ends_line() {
            text.push(&backslash, "\\");
            return;
        }
        let escaped = self.lexer.eat_token();
        text.push(&backslash, "");
        text.push(&escaped, self.lexer.get_token_text(&escaped));
    }

    /// Style and delimiter length for a run of `*`, `~` or `^`.
    ///
    /// An open style whose delimiter length equals the run wins, then the innermost open style
    /// that fits in the run, then the longest style that fits.
    fn delimiter_at(&self, token: &Token) -> (Style, usize) {
        let run = self.lexer.get_token_repeats(token);
        let family = match token.tag {
            TokenTag::Asterisk => ASTERISK_STYLES,
            TokenTag::Tilde => TILDE_STYLES,
            _ => CARET_STYLES,
        };
        let open = |style: &Style| family.iter().find(|(s, _)| s == style).copied();

        let stops = self.inline.stops.iter().rev();
        if let Some(found) = stops
            .clone()
            .filter_map(open)
            .find(|(_, count)| *count == run)
        {
            return found;
        }
        if let Some(found) = stops.filter_map(open).find(|(_, count)| *count <= run) {
            return found;
        }
        family
            .iter()
            .rev()
            .find(|(_, count)| *count <= run)
            .copied()
            .unwrap_or(family[0])
    }

    fn parse_span(&mut self, style: Style, count: usize) -> AstInline {
        let indent = self.inline.indent;
        let start = self.lexer.peek_token(0).start;
        self.lexer.eat_tokens(count);
        let opened_end = self.end_from(start);

        self.inline.stops.push(style);
        if style.single_line() {
            self.inline.single_line_depth += 1;
        }
        let (children, stop) = self.parse_inlines();
        self.inline.stops.pop();
        if style.single_line() {
            self.inline.single_line_depth -= 1;
        }

        let end = match stop {
            Stop::Close(count) => {
                self.lexer.eat_tokens(count);
                self.cursor().last_end
            }
            _ => children.last().map_or(opened_end, |child| child.end),
        };
        AstInline::new(start, end, indent, style.into_kind(children))
    }

    /// `` `raw` `` or ``` ``monospace`` ```, closed by a backtick run of the same length.
    fn parse_raw_inline(&mut self, token: &Token) -> AstInline {
        let indent = self.inline.indent;
        let count = if self.lexer.get_token_repeats(token) >= 2 {
            2
        } else {
            1
        };
        self.lexer.eat_tokens(count);
        let mut end = token.start + count;
        let mut text = TextBuf::default();
        loop {
            let next = self.lexer.peek_token(0);
            if next.tag.ends_line() {
                break;
            }
            if next.tag == TokenTag::Backtick && self.lexer.get_token_repeats(&next) >= count {
                self.lexer.eat_tokens(count);
                end = next.start + count;
                break;
            }
            let next = self.lexer.eat_token();
            text.push(&next, self.lexer.get_token_text(&next));
            end = next.end;
        }
        let mut children = Vec::new();
        text.flush(&mut children, indent);
        AstInline::new(
            token.start,
            end,
            indent,
            InlineKind::RawInline {
                monospace: count == 2,
                children,
            },
        )
    }

    fn link_ahead(&mut self) -> bool {
        let next = self.lexer.peek_token(1).tag;
        !(next.is_inline_space() || next.ends_line() || next == TokenTag::RightAngle)
    }

    /// `<link>` or `<link; alias>`. Ends at the line end when `>` is missing.
    fn parse_link(&mut self) -> AstInline {
        let open = self.lexer.eat_token();
        let link = self.read_until(|tag| matches!(tag, TokenTag::Semicolon | TokenTag::RightAngle));
        let mut alias = None;
        if self.lexer.try_eat_token(TokenTag::Semicolon).is_some() {
            self.lexer
                .eat_tokens_until(|token| !token.tag.is_inline_space());
            let text = self.read_until(|tag| tag == TokenTag::RightAngle);
            let text = text.trim_end();
            if !text.is_empty() {
                alias = Some(text.to_string());
            }
        }
        self.lexer.try_eat_token(TokenTag::RightAngle);
        let end = self.end_from(open.start);
        AstInline::new(
            open.start,
            end,
            self.inline.indent,
            InlineKind::Link {
                link: link.trim_end().to_string(),
                alias,
            },
        )
    }

    /// Raw source text up to (not including) a token matching `stop` or the line end.
    fn read_until(&mut self, stop: impl Fn(TokenTag) -> bool) -> String {
        let mut text = String::new();
        loop {
            let next = self.lexer.peek_token(0);
            if next.tag.ends_line() || stop(next.tag) {
                return text;
            }
            let next = self.lexer.eat_token();
            text.push_str(self.lexer.get_token_text(&next));
        }
    }

    fn tag_ahead(&mut self) -> bool {
        if !self.cursor().word_start {
            return false;
        }
        let next = self.lexer.peek_token(1);
        matches!(next.tag, TokenTag::Word | TokenTag::Number)
            && is_tag(self.lexer.get_token_text(&next))
    }

    fn parse_tag_ref(&mut self) -> AstInline {
        let indent = self.inline.indent;
        let at = self.lexer.eat_token();
        let word = self.lexer.eat_token();
        let child = AstInline::new(
            word.start,
            word.end,
            indent,
            InlineKind::Text {
                text: self.lexer.get_token_text(&word).to_string(),
            },
        );
        AstInline::new(
            at.start,
            word.end,
            indent,
            InlineKind::TagRef {
                child: Box::new(child),
            },
        )
    }
}
