//! Filter grammar
//!
//!     A precedence-climbing parser for task queries:
//!
//!         !       4   prefix
//!         &       3   left associative
//!         |       2   left associative
//!
//!     Primaries: `*` (any), `@tag` / `@` (any tag), `'text'`, `/fuzzy/`, `#n` / `#` (any
//!     priority), `x` or `done`, `due`, `pin`, `hide`, `track:n` / `track`, and parenthesized
//!     groups. Spaces between tokens are ignored.
//!
//!     The parser works on a borrowed [Lexer], so it can run on a fresh lexer over a query string
//!     or continue from wherever the block parser stopped. Internally every rule returns a
//!     [FilterError]; the public entry points log it and return `None`.

use crate::tmark::ast::{AstFilter, FilterKind};
use crate::tmark::error::FilterError;
use crate::tmark::lexing::{EatObserver, Lexer, Token, TokenTag};
use crate::tmark::parsing::inlines::is_tag;
use tracing::debug;

const NOT_PRECEDENCE: u8 = 4;
const AND_PRECEDENCE: u8 = 3;
const OR_PRECEDENCE: u8 = 2;

/// Deepest nesting of `(` and `!` a query may use.
pub const MAX_FILTER_DEPTH: usize = 64;

/// Parse one filter expression at the lexer's current position.
///
/// Operators bind only when their precedence is above `min_precedence`. On failure the lexer is
/// left wherever the failed rule stopped.
pub fn try_parse_filter<O: EatObserver>(
    lexer: &mut Lexer<'_, O>,
    min_precedence: u8,
) -> Option<AstFilter> {
    match FilterParser::new(lexer, 0).expression(min_precedence) {
        Ok(filter) => Some(filter),
        Err(err) => {
            debug!(%err, "filter rejected");
            None
        }
    }
}

/// Parse a whole query string. Only whitespace may follow the expression.
pub fn parse_filter(text: &str) -> Option<AstFilter> {
    let mut lexer = Lexer::new(text);
    let mut parser = FilterParser::new(&mut lexer, 0);
    let result = parser.expression(0).and_then(|filter| {
        parser.lexer.eat_whitespace();
        let rest = parser.lexer.peek_token(0);
        if rest.tag == TokenTag::Eof {
            Ok(filter)
        } else {
            Err(FilterError::TrailingInput { offset: rest.start })
        }
    });
    match result {
        Ok(filter) => Some(filter),
        Err(err) => {
            debug!(%err, query = text, "filter rejected");
            None
        }
    }
}

/// Filter parser over a borrowed lexer.
pub struct FilterParser<'a, 'src, O> {
    lexer: &'a mut Lexer<'src, O>,
    indent: usize,
    depth: usize,
}

impl<'a, 'src, O: EatObserver> FilterParser<'a, 'src, O> {
    /// `indent` is copied onto every produced node.
    pub fn new(lexer: &'a mut Lexer<'src, O>, indent: usize) -> Self {
        Self {
            lexer,
            indent,
            depth: 0,
        }
    }

    pub fn expression(&mut self, min_precedence: u8) -> Result<AstFilter, FilterError> {
        if self.depth >= MAX_FILTER_DEPTH {
            return Err(FilterError::TooDeep {
                offset: self.lexer.peek_token(0).start,
            });
        }
        self.depth += 1;
        let result = self.binary(min_precedence);
        self.depth -= 1;
        result
    }

    fn binary(&mut self, min_precedence: u8) -> Result<AstFilter, FilterError> {
        self.skip_spaces();
        let mut lhs = self.prefix()?;
        loop {
            self.skip_spaces();
            let precedence = match self.lexer.peek_token(0).tag {
                TokenTag::Ampersand => AND_PRECEDENCE,
                TokenTag::Pipe => OR_PRECEDENCE,
                _ => break,
            };
            if precedence <= min_precedence {
                break;
            }
            self.lexer.eat_token();
            let rhs = self.expression(precedence)?;
            let (start, end, indent) = (lhs.start, rhs.end, lhs.indent);
            let (op1, op2) = (Box::new(lhs), Box::new(rhs));
            let kind = if precedence == AND_PRECEDENCE {
                FilterKind::And { op1, op2 }
            } else {
                FilterKind::Or { op1, op2 }
            };
            lhs = AstFilter::new(start, end, indent, kind);
        }
        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<AstFilter, FilterError> {
        let token = self.lexer.peek_token(0);
        match token.tag {
            TokenTag::Bang => {
                self.lexer.eat_token();
                let op = self.expression(NOT_PRECEDENCE)?;
                Ok(self.node(token.start, op.end, FilterKind::Not { op: Box::new(op) }))
            }
            TokenTag::Asterisk => Ok(self.leaf(FilterKind::Any)),
            TokenTag::At => {
                self.lexer.eat_token();
                let next = self.lexer.peek_token(0);
                let text = self.lexer.get_token_text(&next);
                if matches!(next.tag, TokenTag::Word | TokenTag::Number) && is_tag(text) {
                    self.lexer.eat_token();
                    let tag = Some(text.to_string());
                    Ok(self.node(token.start, next.end, FilterKind::Tag { tag }))
                } else {
                    Ok(self.node(token.start, token.end, FilterKind::Tag { tag: None }))
                }
            }
            TokenTag::Hash => {
                self.lexer.eat_token();
                match self.lexer.try_eat_token(TokenTag::Number) {
                    Some(number) => Ok(self.node(
                        token.start,
                        number.end,
                        FilterKind::Priority {
                            priority: number.value,
                        },
                    )),
                    None => Ok(self.node(
                        token.start,
                        token.end,
                        FilterKind::Priority { priority: None },
                    )),
                }
            }
            TokenTag::Quote => {
                let (needle, end) = self.literal(token)?;
                Ok(self.node(token.start, end, FilterKind::String { needle }))
            }
            TokenTag::Slash => {
                let (needle, end) = self.literal(token)?;
                Ok(self.node(token.start, end, FilterKind::Fuzzy { needle }))
            }
            TokenTag::LeftParen => {
                self.lexer.eat_token();
                let mut inner = self.expression(0)?;
                self.skip_spaces();
                let close = self
                    .lexer
                    .try_eat_token(TokenTag::RightParen)
                    .ok_or(FilterError::UnclosedParen {
                        offset: token.start,
                    })?;
                inner.start = token.start;
                inner.end = close.end;
                Ok(inner)
            }
            TokenTag::Word => match self.lexer.get_token_text(&token) {
                "x" | "done" => Ok(self.leaf(FilterKind::Done)),
                "due" => Ok(self.leaf(FilterKind::Due)),
                "pin" => Ok(self.leaf(FilterKind::Pin)),
                "hide" => Ok(self.leaf(FilterKind::Hide)),
                "track" => self.track(token),
                _ => Err(self.unexpected(token)),
            },
            _ => Err(self.unexpected(token)),
        }
    }

    fn track(&mut self, token: Token) -> Result<AstFilter, FilterError> {
        self.lexer.eat_token();
        if self.lexer.try_eat_token(TokenTag::Colon).is_none() {
            return Ok(self.node(token.start, token.end, FilterKind::Track { id: None }));
        }
        let number = self
            .lexer
            .try_eat_token(TokenTag::Number)
            .ok_or(FilterError::MissingTrackerId {
                offset: token.start,
            })?;
        Ok(self.node(
            token.start,
            number.end,
            FilterKind::Track { id: number.value },
        ))
    }

    /// Text between two `open` delimiters. `\` makes the next token literal.
    fn literal(&mut self, open: Token) -> Result<(String, usize), FilterError> {
        self.lexer.eat_token();
        let unterminated = || FilterError::UnterminatedLiteral {
            delimiter: open.tag.special_char().unwrap_or('\''),
            offset: open.start,
        };
        let mut text = String::new();
        loop {
            let token = self.lexer.peek_token(0);
            if token.tag.ends_line() {
                return Err(unterminated());
            }
            self.lexer.eat_token();
            if token.tag == open.tag {
                return Ok((text, token.end));
            }
            if token.tag == TokenTag::Backslash {
                let escaped = self.lexer.peek_token(0);
                if escaped.tag.ends_line() {
                    return Err(unterminated());
                }
                self.lexer.eat_token();
                text.push_str(self.lexer.get_token_text(&escaped));
            } else {
                text.push_str(self.lexer.get_token_text(&token));
            }
        }
    }

    fn leaf(&mut self, kind: FilterKind) -> AstFilter {
        let token = self.lexer.eat_token();
        self.node(token.start, token.end, kind)
    }

    fn node(&self, start: usize, end: usize, kind: FilterKind) -> AstFilter {
        AstFilter::new(start, end, self.indent, kind)
    }

    fn unexpected(&self, token: Token) -> FilterError {
        FilterError::UnexpectedToken {
            found: token.tag,
            offset: token.start,
        }
    }

    fn skip_spaces(&mut self) {
        self.lexer
            .eat_tokens_until(|token| !token.tag.is_inline_space());
    }
}
