//! Token types shared by the block, inline and filter grammars.

use serde::Serialize;

/// The closed set of token kinds.
///
/// Each special character has its own tag. `Spaces`, `Number` and `Word` cover runs of
/// characters, and `Eof` is the sentinel returned for every peek past the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenTag {
    Backslash,
    Asterisk,
    Tilde,
    Backtick,
    Caret,
    LeftAngle,
    RightAngle,
    Semicolon,
    At,
    Hash,
    LeftBracket,
    RightBracket,
    Dash,
    Pipe,
    Equals,
    Dot,
    Colon,
    LeftParen,
    RightParen,
    Bang,
    Ampersand,
    Quote,
    Slash,
    Comma,
    Newline,
    Tab,
    Spaces,
    Number,
    Word,
    Eof,
}

impl TokenTag {
    /// The character a single-character tag stands for.
    pub fn special_char(self) -> Option<char> {
        let ch = match self {
            TokenTag::Backslash => '\\',
            TokenTag::Asterisk => '*',
            TokenTag::Tilde => '~',
            TokenTag::Backtick => '`',
            TokenTag::Caret => '^',
            TokenTag::LeftAngle => '<',
            TokenTag::RightAngle => '>',
            TokenTag::Semicolon => ';',
            TokenTag::At => '@',
            TokenTag::Hash => '#',
            TokenTag::LeftBracket => '[',
            TokenTag::RightBracket => ']',
            TokenTag::Dash => '-',
            TokenTag::Pipe => '|',
            TokenTag::Equals => '=',
            TokenTag::Dot => '.',
            TokenTag::Colon => ':',
            TokenTag::LeftParen => '(',
            TokenTag::RightParen => ')',
            TokenTag::Bang => '!',
            TokenTag::Ampersand => '&',
            TokenTag::Quote => '\'',
            TokenTag::Slash => '/',
            TokenTag::Comma => ',',
            TokenTag::Newline => '\n',
            TokenTag::Tab => '\t',
            TokenTag::Spaces | TokenTag::Number | TokenTag::Word | TokenTag::Eof => return None,
        };
        Some(ch)
    }

    /// Spaces and tabs. Newlines are not included.
    pub fn is_inline_space(self) -> bool {
        matches!(self, TokenTag::Spaces | TokenTag::Tab)
    }

    /// Newline or end of input.
    pub fn ends_line(self) -> bool {
        matches!(self, TokenTag::Newline | TokenTag::Eof)
    }
}

/// A token: a tag plus the half-open byte range it covers.
///
/// `value` is only set for `Number` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub tag: TokenTag,
    pub start: usize,
    pub end: usize,
    pub value: Option<u32>,
}

impl Token {
    pub fn new(tag: TokenTag, start: usize, end: usize) -> Self {
        Self {
            tag,
            start,
            end,
            value: None,
        }
    }

    pub fn eof(offset: usize) -> Self {
        Self::new(TokenTag::Eof, offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is(&self, tag: TokenTag) -> bool {
        self.tag == tag
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::eof(0)
    }
}
