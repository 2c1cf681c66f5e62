//! Recoverable parse errors
//!
//! Neither error type escapes the public parsing API. Filter errors turn into `None` at
//! [try_parse_filter](crate::tmark::parsing::Parser::try_parse_filter), directive errors make
//! the meta parser skip to the next directive.

use crate::tmark::lexing::TokenTag;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unexpected {found:?} at offset {offset}")]
    UnexpectedToken { found: TokenTag, offset: usize },

    #[error("unterminated {delimiter} literal starting at offset {offset}")]
    UnterminatedLiteral { delimiter: char, offset: usize },

    #[error("missing tracker id after `track:` at offset {offset}")]
    MissingTrackerId { offset: usize },

    #[error("unclosed parenthesis opened at offset {offset}")]
    UnclosedParen { offset: usize },

    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },

    #[error("filter nested too deeply at offset {offset}")]
    TooDeep { offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("unknown directive at offset {offset}")]
    Unknown { offset: usize },

    #[error("invalid date at offset {offset}")]
    InvalidDate { offset: usize },

    #[error("missing value for `{directive}` at offset {offset}")]
    MissingValue {
        directive: &'static str,
        offset: usize,
    },

    #[error("`{tag}` is not a valid tag")]
    InvalidTag { tag: String },

    #[error("directive at offset {offset} is not followed by a delimiter")]
    NoDelimiter { offset: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = FilterError::MissingTrackerId { offset: 6 };
        assert_eq!(err.to_string(), "missing tracker id after `track:` at offset 6");
        let err = DirectiveError::InvalidTag { tag: "a+b".into() };
        assert_eq!(err.to_string(), "`a+b` is not a valid tag");
    }
}
