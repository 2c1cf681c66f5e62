//! Core tokenization using the logos lexer
//!
//! Every special character is its own token. Whitespace other than plain spaces (newlines and
//! tabs) is special too, so indentation and line structure survive tokenization untouched.
//! Everything else collapses into the longest possible run: spaces, digits or words.
//!
//! Digit runs longer than eight characters are not numbers. Logos picks the longest match, so
//! a nine digit run is matched by the word pattern instead, which keeps numeric values inside
//! `u32` without any overflow handling.

use crate::tmark::lexing::token::{Token, TokenTag};
use logos::Logos;

/// Raw tokens produced by logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[token("\\")]
    Backslash,
    #[token("*")]
    Asterisk,
    #[token("~")]
    Tilde,
    #[token("`")]
    Backtick,
    #[token("^")]
    Caret,
    #[token("<")]
    LeftAngle,
    #[token(">")]
    RightAngle,
    #[token(";")]
    Semicolon,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("-")]
    Dash,
    #[token("|")]
    Pipe,
    #[token("=")]
    Equals,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("!")]
    Bang,
    #[token("&")]
    Ampersand,
    #[token("'")]
    Quote,
    #[token("/")]
    Slash,
    #[token(",")]
    Comma,
    #[token("\n")]
    Newline,
    #[token("\t")]
    Tab,

    #[regex(r" +")]
    Spaces,

    // Same-length matches with Word resolve to Number.
    #[regex(r"[0-9]{1,8}", priority = 3)]
    Number,

    #[regex(r"[^\\*~`^<>;@#\[\]\-|=.:()!&'/, \t\n]+")]
    Word,
}

impl From<RawToken> for TokenTag {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Backslash => TokenTag::Backslash,
            RawToken::Asterisk => TokenTag::Asterisk,
            RawToken::Tilde => TokenTag::Tilde,
            RawToken::Backtick => TokenTag::Backtick,
            RawToken::Caret => TokenTag::Caret,
            RawToken::LeftAngle => TokenTag::LeftAngle,
            RawToken::RightAngle => TokenTag::RightAngle,
            RawToken::Semicolon => TokenTag::Semicolon,
            RawToken::At => TokenTag::At,
            RawToken::Hash => TokenTag::Hash,
            RawToken::LeftBracket => TokenTag::LeftBracket,
            RawToken::RightBracket => TokenTag::RightBracket,
            RawToken::Dash => TokenTag::Dash,
            RawToken::Pipe => TokenTag::Pipe,
            RawToken::Equals => TokenTag::Equals,
            RawToken::Dot => TokenTag::Dot,
            RawToken::Colon => TokenTag::Colon,
            RawToken::LeftParen => TokenTag::LeftParen,
            RawToken::RightParen => TokenTag::RightParen,
            RawToken::Bang => TokenTag::Bang,
            RawToken::Ampersand => TokenTag::Ampersand,
            RawToken::Quote => TokenTag::Quote,
            RawToken::Slash => TokenTag::Slash,
            RawToken::Comma => TokenTag::Comma,
            RawToken::Newline => TokenTag::Newline,
            RawToken::Tab => TokenTag::Tab,
            RawToken::Spaces => TokenTag::Spaces,
            RawToken::Number => TokenTag::Number,
            RawToken::Word => TokenTag::Word,
        }
    }
}

/// Build a [Token] from a raw logos match.
///
/// Logos never fails on this token set (the word pattern accepts anything that is not special),
/// but an error slice is still surfaced as a word rather than dropped so offsets stay contiguous.
pub(crate) fn to_token(raw: Result<RawToken, ()>, span: std::ops::Range<usize>, slice: &str) -> Token {
    match raw {
        Ok(RawToken::Number) => Token {
            tag: TokenTag::Number,
            start: span.start,
            end: span.end,
            value: slice.parse().ok(),
        },
        Ok(raw) => Token::new(raw.into(), span.start, span.end),
        Err(()) => Token::new(TokenTag::Word, span.start, span.end),
    }
}

/// Tokenize a whole string. Mostly useful for tests and tooling; the parsers pull tokens lazily
/// through [Lexer](crate::tmark::lexing::Lexer).
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();
    while let Some(raw) = lexer.next() {
        tokens.push(to_token(raw, lexer.span(), lexer.slice()));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(source: &str) -> Vec<TokenTag> {
        tokenize(source).into_iter().map(|t| t.tag).collect()
    }

    #[test]
    fn test_specials_are_single_tokens() {
        assert_eq!(
            tags("**[#]"),
            vec![
                TokenTag::Asterisk,
                TokenTag::Asterisk,
                TokenTag::LeftBracket,
                TokenTag::Hash,
                TokenTag::RightBracket,
            ]
        );
    }

    #[test]
    fn test_space_runs_collapse() {
        let tokens = tokenize("a    b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].tag, TokenTag::Spaces);
        assert_eq!((tokens[1].start, tokens[1].end), (1, 5));
    }

    #[test]
    fn test_numbers_carry_values() {
        let tokens = tokenize("#12345678");
        assert_eq!(tokens[1].tag, TokenTag::Number);
        assert_eq!(tokens[1].value, Some(12_345_678));
    }

    #[test]
    fn test_long_digit_runs_are_words() {
        let tokens = tokenize("123456789");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].tag, TokenTag::Word);
        assert_eq!(tokens[0].value, None);
    }

    #[test]
    fn test_words_stop_at_specials() {
        assert_eq!(
            tags("due:2024-1-5"),
            vec![
                TokenTag::Word,
                TokenTag::Colon,
                TokenTag::Number,
                TokenTag::Dash,
                TokenTag::Number,
                TokenTag::Dash,
                TokenTag::Number,
            ]
        );
    }

    #[test]
    fn test_newlines_and_tabs() {
        assert_eq!(
            tags("a\n\tb"),
            vec![
                TokenTag::Word,
                TokenTag::Newline,
                TokenTag::Tab,
                TokenTag::Word
            ]
        );
    }

    #[test]
    fn test_unicode_words() {
        let tokens = tokenize("héllo wörld");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].end, "héllo".len());
    }
}
