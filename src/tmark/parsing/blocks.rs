//! Block grammar
//!
//!     Block dispatch looks at the first tokens of a line, after indentation:
//!
//!         `#`..`#####` + space      Header
//!         `[` (exactly one)         Meta
//!         `-` + space               List item
//!         `|`                       Table
//!         `===` (3+)                Separator
//!         `>`                       Raw block
//!         `<n>.` + space            Ordered list item
//!         anything else             Paragraph
//!
//!     List, ordered list and meta items hold a block sequence one unit deeper than the marker.
//!     The rest of the marker line is the first line of that sequence, so one line of chained
//!     markers nests as deep as an indented outline would. Bodies nested `max_depth` deep no
//!     longer open containers: their markers dispatch as paragraphs.

use super::inlines::ParagraphMode;
use super::Parser;
use crate::tmark::ast::{AstBlock, AstInline, BlockKind, InlineKind};
use crate::tmark::lexing::TokenTag;
use tracing::debug;

/// Outcome of asking for the next block of a sequence.
#[derive(Debug)]
pub(crate) enum Step {
    Block(AstBlock),
    /// The current line is indented less than wanted.
    Unindent,
    End,
}

/// What the current line starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockStart {
    Header(u8),
    Meta,
    List,
    Ordered(u32),
    Table,
    Separator,
    Raw,
    Paragraph,
}

impl BlockStart {
    fn opens_body(self) -> bool {
        matches!(
            self,
            BlockStart::Meta | BlockStart::List | BlockStart::Ordered(_) | BlockStart::Table
        )
    }
}

impl<'src> Parser<'src> {
    pub(crate) fn parse_block_seq(&mut self, wanted: usize) -> Vec<AstBlock> {
        let mut blocks = Vec::new();
        while let Step::Block(block) = self.next_block(wanted) {
            blocks.push(block);
        }
        blocks
    }

    /// Block sequence of a container body at `indent`, one nesting level down.
    pub(crate) fn parse_body(&mut self, indent: usize) -> Vec<AstBlock> {
        self.depth += 1;
        let blocks = self.parse_block_seq(indent);
        self.depth -= 1;
        blocks
    }

    pub(crate) fn next_block(&mut self, wanted: usize) -> Step {
        let Some(measured) = self.line_start() else {
            return Step::End;
        };
        if measured < wanted {
            return Step::Unindent;
        }
        let start = self.dispatch();
        debug!(?start, indent = wanted, "block");
        Step::Block(self.parse_block(start, wanted))
    }

    fn parse_block(&mut self, start: BlockStart, indent: usize) -> AstBlock {
        match start {
            BlockStart::Header(size) => self.parse_header(size, indent),
            BlockStart::Meta => self.parse_meta(indent),
            BlockStart::List => self.parse_list(indent, None),
            BlockStart::Ordered(first) => self.parse_list(indent, Some(first)),
            BlockStart::Table => self.parse_table(indent),
            BlockStart::Separator => self.parse_separator(indent),
            BlockStart::Raw => self.parse_raw_block(indent),
            BlockStart::Paragraph => self.parse_paragraph(indent, ParagraphMode::Block),
        }
    }

    /// Move to the first token of the next non-blank line and return its measured indent.
    ///
    /// Returns `None` at eof. Skipped blank lines do not count towards any node.
    pub(crate) fn line_start(&mut self) -> Option<usize> {
        loop {
            if self.lexer.at_eof() {
                return None;
            }
            if let Some(measured) = self.cursor().line_indent {
                return Some(measured);
            }
            let measured = self.measure_indent();
            match self.lexer.peek_token(0).tag {
                TokenTag::Eof => return None,
                TokenTag::Newline => {
                    self.cursor_mut().paused = true;
                    self.lexer.eat_token();
                    self.cursor_mut().paused = false;
                }
                _ => {
                    self.cursor_mut().line_indent = Some(measured);
                    return Some(measured);
                }
            }
        }
    }

    /// Eat leading spaces and tabs, returning the indent in units.
    pub(crate) fn measure_indent(&mut self) -> usize {
        self.indent_columns() / self.indent_width
    }

    /// Eat leading spaces and tabs, returning their width in columns.
    pub(crate) fn indent_columns(&mut self) -> usize {
        self.cursor_mut().paused = true;
        let mut columns = 0;
        loop {
            let token = self.lexer.peek_token(0);
            match token.tag {
                TokenTag::Spaces => columns += token.len(),
                TokenTag::Tab => columns += 2 * self.indent_width,
                _ => break,
            }
            self.lexer.eat_token();
        }
        self.cursor_mut().paused = false;
        columns
    }

    /// Classify the line at the current position without consuming anything.
    pub(crate) fn dispatch(&mut self) -> BlockStart {
        let start = self.classify_line();
        if self.depth >= self.max_depth && start.opens_body() {
            BlockStart::Paragraph
        } else {
            start
        }
    }

    fn classify_line(&mut self) -> BlockStart {
        let token = self.lexer.peek_token(0);
        match token.tag {
            TokenTag::Hash => {
                let size = self.lexer.get_token_repeats(&token);
                if (1..=5).contains(&size) && self.lexer.peek_token(size).tag.is_inline_space() {
                    return BlockStart::Header(size as u8);
                }
            }
            TokenTag::LeftBracket if self.lexer.get_token_repeats(&token) == 1 => {
                return BlockStart::Meta;
            }
            TokenTag::Dash if self.lexer.get_token_repeats(&token) == 1 => {
                if ends_marker(self.lexer.peek_token(1).tag) {
                    return BlockStart::List;
                }
            }
            TokenTag::Pipe => return BlockStart::Table,
            TokenTag::Equals if self.lexer.get_token_repeats(&token) >= 3 => {
                return BlockStart::Separator;
            }
            TokenTag::RightAngle => return BlockStart::Raw,
            TokenTag::Number => {
                if self.lexer.peek_token(1).tag == TokenTag::Dot
                    && ends_marker(self.lexer.peek_token(2).tag)
                {
                    return BlockStart::Ordered(token.value.unwrap_or_default());
                }
            }
            _ => {}
        }
        BlockStart::Paragraph
    }

    /// Eat inline spaces after a marker and prepare the body sequence at `body_indent`.
    ///
    /// When the marker line has more content, that content is treated as a line already
    /// measured at `body_indent`.
    pub(crate) fn enter_body(&mut self, body_indent: usize) {
        self.lexer
            .eat_tokens_until(|token| !token.tag.is_inline_space());
        let rest_blank = self.lexer.peek_token(0).tag.ends_line();
        self.cursor_mut().line_indent = if rest_blank {
            None
        } else {
            Some(body_indent)
        };
    }

    fn parse_header(&mut self, size: u8, indent: usize) -> AstBlock {
        let start = self.lexer.peek_token(0).start;
        self.lexer.eat_tokens(size as usize);
        self.lexer
            .eat_tokens_until(|token| !token.tag.is_inline_space());
        let child = self.parse_paragraph(indent, ParagraphMode::SingleLine);
        self.lexer.try_eat_token(TokenTag::Newline);
        let end = self.end_from(start).max(child.end);
        AstBlock::new(
            start,
            end,
            indent,
            BlockKind::Header {
                size,
                child: Box::new(child),
            },
        )
    }

    /// Parse a list (`first` is `None`) or an ordered list starting at `first`.
    fn parse_list(&mut self, indent: usize, first: Option<u32>) -> AstBlock {
        let start = self.lexer.peek_token(0).start;
        let mut items = Vec::new();
        loop {
            items.push(self.parse_list_item(indent, first.is_some()));

            let Some(measured) = self.line_start() else {
                break;
            };
            if measured != indent {
                break;
            }
            let continues = match (self.dispatch(), first) {
                (BlockStart::List, None) => true,
                (BlockStart::Ordered(n), Some(first)) => {
                    u64::from(n) == u64::from(first) + items.len() as u64
                }
                _ => false,
            };
            if !continues {
                break;
            }
        }
        let end = self.end_covering(start, &items);
        let kind = match first {
            Some(first) => BlockKind::OrderedList {
                first,
                children: items,
            },
            None => BlockKind::List { children: items },
        };
        AstBlock::new(start, end, indent, kind)
    }

    fn parse_list_item(&mut self, indent: usize, ordered: bool) -> AstBlock {
        let start = self.lexer.peek_token(0).start;
        if ordered {
            // number and dot
            self.lexer.eat_tokens(2);
        } else {
            self.lexer.eat_token();
        }
        self.enter_body(indent + 1);
        let children = self.parse_body(indent + 1);
        let end = self.end_covering(start, &children);
        AstBlock::new(start, end, indent, BlockKind::ListItem { children })
    }

    fn parse_separator(&mut self, indent: usize) -> AstBlock {
        let token = self.lexer.peek_token(0);
        let run = self.lexer.get_token_repeats(&token);
        self.lexer.eat_tokens(run);
        let end = self.end_from(token.start);
        self.lexer.eat_line();
        AstBlock::new(token.start, end, indent, BlockKind::Separator)
    }

    /// `> text` followed by lines indented one unit deeper, kept verbatim.
    fn parse_raw_block(&mut self, indent: usize) -> AstBlock {
        let marker = self.lexer.eat_token();
        let source = self.lexer.source();
        let text_start = if source[marker.end..].starts_with(' ') {
            marker.end + 1
        } else {
            marker.end
        };
        let mut text = String::new();
        let mut line_from = text_start;
        let base_columns = (indent + 1) * self.indent_width;

        loop {
            self.lexer.eat_tokens_until(|token| token.tag == TokenTag::Newline);
            let line_end = self.end_from(line_from);
            text.push_str(&source[line_from..line_end]);
            if self.lexer.try_eat_token(TokenTag::Newline).is_none() {
                break;
            }

            let mut blank_lines = 0;
            let columns = loop {
                let columns = self.indent_columns();
                if self.lexer.peek_token(0).tag != TokenTag::Newline {
                    break columns;
                }
                self.cursor_mut().paused = true;
                self.lexer.eat_token();
                self.cursor_mut().paused = false;
                blank_lines += 1;
            };
            if self.lexer.peek_token(0).tag == TokenTag::Eof {
                break;
            }
            let measured = columns / self.indent_width;
            self.cursor_mut().line_indent = Some(measured);
            if measured <= indent {
                break;
            }
            // Inner lines keep their indentation beyond the block's own.
            self.cursor_mut().line_indent = None;
            text.push_str(&"\n".repeat(1 + blank_lines));
            text.push_str(&" ".repeat(columns.saturating_sub(base_columns)));
            line_from = self.lexer.peek_token(0).start;
        }

        let text_end = self.end_from(text_start);
        let child = AstInline::new(text_start, text_end, indent, InlineKind::Text { text });
        let end = self.end_from(marker.start);
        AstBlock::new(
            marker.start,
            end,
            indent,
            BlockKind::RawBlock {
                children: vec![child],
            },
        )
    }
}

/// A list marker must be followed by whitespace or the end of the line.
fn ends_marker(tag: TokenTag) -> bool {
    tag.is_inline_space() || tag.ends_line()
}
