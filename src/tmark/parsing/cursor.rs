//! Offset and line bookkeeping fed by the lexer.

use crate::tmark::lexing::{EatObserver, Token, TokenTag};

/// State the parser derives from eaten tokens.
#[derive(Debug, Clone)]
pub struct Cursor {
    /// End of the last eaten token that counts towards node offsets.
    pub last_end: usize,
    /// While set, eaten tokens do not move `last_end` (indentation, blank lines).
    pub paused: bool,
    /// True right after whitespace, a newline, or at the start of input.
    pub word_start: bool,
    /// Measured indent of the current line, once known. Cleared by every newline.
    pub line_indent: Option<usize>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            last_end: 0,
            paused: false,
            word_start: true,
            line_indent: None,
        }
    }
}

impl EatObserver for Cursor {
    fn on_eat(&mut self, token: &Token) {
        if token.tag == TokenTag::Eof {
            return;
        }
        if !self.paused {
            self.last_end = token.end;
        }
        self.word_start = matches!(
            token.tag,
            TokenTag::Spaces | TokenTag::Tab | TokenTag::Newline
        );
        if token.tag == TokenTag::Newline {
            self.line_indent = None;
        }
    }
}
