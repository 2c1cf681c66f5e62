//! Parser
//!
//!     Three grammars share one [Lexer]: the block grammar (line structure and indentation),
//!     the inline grammar (styled spans inside paragraphs) and the filter grammar (boolean task
//!     queries). The [Parser] owns the lexer and drives the first two; the filter grammar takes
//!     the lexer by reference (see [filter]) so it can run on a fresh lexer over a standalone
//!     query or embedded at the parser's current position.
//!
//! Indentation
//!
//!     Nesting is measured in half-tab units, `indent_width` spaces each (2 by default, a tab
//!     counts as two units). Every block sequence has a wanted indent. A line measured below it
//!     ends the sequence and hands control back to the enclosing construct, a line at or above
//!     it is dispatched as a block of that sequence. Blank lines are skipped and never end a
//!     nested construct.
//!
//!     The measured indent of the current line is cached on the [cursor::Cursor], so a line that
//!     ends several nested constructs is measured once and every level can compare against it
//!     without touching the lexer again.
//!
//! Offsets
//!
//!     A node starts at its first token and ends after the last token eaten for it. Tokens eaten
//!     while trimming indentation or skipping blank lines do not move the end, so block ends
//!     never include leading whitespace of the following line.
//!
//! Leniency
//!
//!     Block parsing never fails. Unterminated inline spans end where parsing stopped, malformed
//!     meta directives are skipped, and a document without blocks yields a single `Dummy`.

pub mod blocks;
pub mod cursor;
pub mod filter;
pub mod inlines;
pub mod meta;
pub mod table;

pub use filter::{parse_filter, try_parse_filter, FilterParser};

use crate::tmark::ast::{AstBlock, AstFilter, BlockKind};
use crate::tmark::lexing::{Lexer, MAX_TOKEN_PEEK_COUNT};
use std::iter::FusedIterator;
use cursor::Cursor;
use inlines::InlineState;

/// Deepest block nesting before markers are read as paragraph text.
pub const MAX_BLOCK_DEPTH: usize = 32;

/// Knobs exposed through the `[parser]` and `[lexer]` config sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Spaces per half-tab unit.
    pub indent_width: usize,
    /// Container bodies (list items, meta blocks, table cells) nested deeper than this stop
    /// opening new containers.
    pub max_depth: usize,
    /// Progress guard threshold handed to the lexer.
    pub max_peek_count: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_depth: MAX_BLOCK_DEPTH,
            max_peek_count: MAX_TOKEN_PEEK_COUNT,
        }
    }
}

/// Block and inline parser over one source text.
pub struct Parser<'src> {
    lexer: Lexer<'src, Cursor>,
    indent_width: usize,
    depth: usize,
    max_depth: usize,
    inline: InlineState,
    finished: bool,
    yielded_any: bool,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: &'src str, options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::with_observer(source, Cursor::default())
                .with_peek_limit(options.max_peek_count),
            indent_width: options.indent_width.max(1),
            depth: 0,
            max_depth: options.max_depth,
            inline: InlineState::default(),
            finished: false,
            yielded_any: false,
        }
    }

    pub fn source(&self) -> &'src str {
        self.lexer.source()
    }

    /// Lazily parse top-level blocks.
    ///
    /// The sequence is finite. A document with no blocks at all yields one `Dummy` at `0..0`.
    pub fn parse_blocks(&mut self) -> Blocks<'_, 'src> {
        Blocks { parser: self }
    }

    /// Like [Parser::parse_blocks], pairing every block with its source text.
    ///
    /// Offsets inside each returned block are relative to its own text.
    pub fn parse_blocks_split(&mut self) -> SplitBlocks<'_, 'src> {
        SplitBlocks {
            source: self.lexer.source(),
            blocks: self.parse_blocks(),
        }
    }

    /// Parse a filter expression at the current position. See [try_parse_filter].
    pub fn try_parse_filter(&mut self, min_precedence: u8) -> Option<AstFilter> {
        try_parse_filter(&mut self.lexer, min_precedence)
    }

    fn next_top_level(&mut self) -> Option<AstBlock> {
        if self.finished {
            return None;
        }
        match self.next_block(0) {
            blocks::Step::Block(block) => {
                self.yielded_any = true;
                Some(block)
            }
            blocks::Step::Unindent | blocks::Step::End => {
                self.finished = true;
                if self.yielded_any {
                    None
                } else {
                    self.yielded_any = true;
                    Some(AstBlock::new(0, 0, 0, BlockKind::Dummy))
                }
            }
        }
    }

    fn cursor(&self) -> &Cursor {
        self.lexer.observer()
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        self.lexer.observer_mut()
    }

    /// End offset for a node that started at `start`.
    fn end_from(&self, start: usize) -> usize {
        self.cursor().last_end.max(start)
    }

    /// End offset for a container, covering its children.
    fn end_covering(&self, start: usize, children: &[AstBlock]) -> usize {
        children
            .iter()
            .map(|child| child.end)
            .fold(self.end_from(start), usize::max)
    }
}

/// Top-level blocks of a [Parser], see [Parser::parse_blocks].
pub struct Blocks<'p, 'src> {
    parser: &'p mut Parser<'src>,
}

impl Iterator for Blocks<'_, '_> {
    type Item = AstBlock;

    fn next(&mut self) -> Option<AstBlock> {
        self.parser.next_top_level()
    }
}

impl FusedIterator for Blocks<'_, '_> {}

/// Top-level blocks with their source text, see [Parser::parse_blocks_split].
pub struct SplitBlocks<'p, 'src> {
    source: &'src str,
    blocks: Blocks<'p, 'src>,
}

impl Iterator for SplitBlocks<'_, '_> {
    type Item = (String, AstBlock);

    fn next(&mut self) -> Option<(String, AstBlock)> {
        let mut block = self.blocks.next()?;
        let origin = block.start;
        let text = self.source[block.start..block.end].to_string();
        block.rebase(origin);
        Some((text, block))
    }
}

impl FusedIterator for SplitBlocks<'_, '_> {}
