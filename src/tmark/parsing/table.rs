//! Tables
//!
//!     | a | b
//!     |-
//!     | [2:1] wide
//!       - nested list in the last cell
//!     |-
//!
//!     Every `|` starts a cell and a line may hold several. The first line of a cell is a
//!     single-line paragraph ending at the next `|`. The last cell of a line may continue with
//!     blocks indented one unit deeper. A `|-` line closes the current row, and when it comes
//!     right after a single-line first row it marks that row as the header.
//!
//!     A cell may open with a config: `[#]` hides it, `[w:h]` spans `w` columns and `h` rows,
//!     with `*` meaning "the rest".

use super::blocks::BlockStart;
use super::inlines::ParagraphMode;
use super::Parser;
use crate::tmark::ast::{AstBlock, BlockKind, CellSpan, TableCellConfig};
use crate::tmark::lexing::{Token, TokenTag};

/// How a table line ended.
enum LineEnd {
    /// A `|-` divider closed the row.
    Divider,
    /// The line ended; `nested` is set when its last cell took indented blocks.
    Done { nested: bool },
}

impl<'src> Parser<'src> {
    pub(crate) fn parse_table(&mut self, indent: usize) -> AstBlock {
        let start = self.lexer.peek_token(0).start;
        let mut rows = Vec::new();
        let mut header = false;

        let mut cells = Vec::new();
        let mut row_start = start;
        let mut cell_lines = 0;
        let mut nested = false;

        loop {
            if cells.is_empty() {
                row_start = self.lexer.peek_token(0).start;
            }
            match self.parse_table_line(indent, &mut cells) {
                LineEnd::Divider => {
                    if !cells.is_empty() {
                        if rows.is_empty() && cell_lines <= 1 && !nested {
                            header = true;
                        }
                        let end = self.end_covering(row_start, &cells);
                        rows.push(row(row_start, end, indent, true, std::mem::take(&mut cells)));
                    }
                    cell_lines = 0;
                    nested = false;
                }
                LineEnd::Done { nested: took_blocks } => {
                    cell_lines += 1;
                    nested |= took_blocks;
                }
            }

            let Some(measured) = self.line_start() else {
                break;
            };
            if measured != indent || self.dispatch() != BlockStart::Table {
                break;
            }
        }
        if !cells.is_empty() {
            let end = self.end_covering(row_start, &cells);
            rows.push(row(row_start, end, indent, false, cells));
        }

        let end = self.end_covering(start, &rows);
        AstBlock::new(
            start,
            end,
            indent,
            BlockKind::Table {
                header,
                children: rows,
            },
        )
    }

    /// Parse cells from a `|` to the end of its line (and the last cell's nested blocks).
    fn parse_table_line(&mut self, indent: usize, cells: &mut Vec<AstBlock>) -> LineEnd {
        loop {
            let pipe = self.lexer.eat_token();
            if self.lexer.peek_token(0).tag == TokenTag::Dash {
                self.lexer.eat_line();
                return LineEnd::Divider;
            }
            let config = self.parse_cell_config();
            self.lexer
                .eat_tokens_until(|token| !token.tag.is_inline_space());

            let mut children = Vec::new();
            let next = self.lexer.peek_token(0).tag;
            if !next.ends_line() && next != TokenTag::Pipe {
                children.push(self.parse_paragraph(indent + 1, ParagraphMode::CellLine));
            }

            match self.lexer.peek_token(0).tag {
                TokenTag::Pipe => {
                    cells.push(self.cell(pipe, indent, config, children));
                }
                TokenTag::Newline => {
                    self.lexer.eat_token();
                    let blocks = self.parse_body(indent + 1);
                    let took_blocks = !blocks.is_empty();
                    children.extend(blocks);
                    cells.push(self.cell(pipe, indent, config, children));
                    return LineEnd::Done {
                        nested: took_blocks,
                    };
                }
                _ => {
                    cells.push(self.cell(pipe, indent, config, children));
                    return LineEnd::Done { nested: false };
                }
            }
        }
    }

    fn cell(
        &self,
        pipe: Token,
        indent: usize,
        config: TableCellConfig,
        children: Vec<AstBlock>,
    ) -> AstBlock {
        let end = self.end_covering(pipe.start, &children);
        AstBlock::new(
            pipe.start,
            end,
            indent,
            BlockKind::TableCell { config, children },
        )
    }

    /// `[#]` or `[w:h]` right after the `|`, optionally after one run of spaces.
    fn parse_cell_config(&mut self) -> TableCellConfig {
        let at = usize::from(self.lexer.peek_token(0).tag.is_inline_space());
        let mut config = TableCellConfig::default();
        if self.lexer.peek_token(at).tag != TokenTag::LeftBracket {
            return config;
        }

        if self.lexer.peek_token(at + 1).tag == TokenTag::Hash
            && self.lexer.peek_token(at + 2).tag == TokenTag::RightBracket
        {
            config.invisible = true;
            self.lexer.eat_tokens(at + 3);
            return config;
        }

        let width = self.lexer.peek_token(at + 1);
        let height = self.lexer.peek_token(at + 3);
        if let (Some(width), Some(height)) = (cell_span(&width), cell_span(&height)) {
            if self.lexer.peek_token(at + 2).tag == TokenTag::Colon
                && self.lexer.peek_token(at + 4).tag == TokenTag::RightBracket
            {
                config.width = width;
                config.height = height;
                self.lexer.eat_tokens(at + 5);
            }
        }
        config
    }
}

fn cell_span(token: &Token) -> Option<CellSpan> {
    match token.tag {
        TokenTag::Number => Some(CellSpan::Count(token.value.unwrap_or(1))),
        TokenTag::Asterisk => Some(CellSpan::Fill),
        _ => None,
    }
}

fn row(start: usize, end: usize, indent: usize, divider: bool, children: Vec<AstBlock>) -> AstBlock {
    AstBlock::new(start, end, indent, BlockKind::TableRow { divider, children })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(text: &str) -> TableCellConfig {
        let mut parser = Parser::new(text);
        parser.lexer.eat_token();
        parser.parse_cell_config()
    }

    #[test]
    fn test_cell_config() {
        assert!(config("| [#] a").invisible);
        assert_eq!(config("|[2:*] a").width, CellSpan::Count(2));
        assert_eq!(config("|[2:*] a").height, CellSpan::Fill);
        assert_eq!(config("| [2] a"), TableCellConfig::default());
        assert_eq!(config("| a"), TableCellConfig::default());
    }
}
