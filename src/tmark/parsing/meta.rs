//! Meta blocks
//!
//!     `[directive directive ...] body`. The directive list is read on the marker line, the body
//!     is a block sequence one unit deeper, starting with the rest of the marker line.
//!
//!     Directives:
//!
//!         @tag                      tag (letters, digits, `_`)
//!         #n                        priority
//!         x                         done
//!         hide, pin                 flags
//!         due:Y-M-D, created:Y-M-D  dates, validated against the calendar
//!         track:n                   time tracker id
//!         image [width] path        `\` escapes spaces and `]` in the path
//!         tip, note, warning, important
//!
//!     A directive must be followed by whitespace, `]` or the line end. Anything malformed is
//!     logged at trace level and skipped up to the next such delimiter.

use super::inlines::is_tag;
use super::Parser;
use crate::tmark::ast::{Admonition, AstBlock, BlockKind, MetaConfig, MetaImage};
use crate::tmark::error::DirectiveError;
use crate::tmark::lexing::{Token, TokenTag};
use chrono::NaiveDate;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Tag(String),
    Priority(u32),
    Done,
    Hide,
    Pin,
    Due(NaiveDate),
    Created(NaiveDate),
    Track(u32),
    Image(MetaImage),
    Admonition(Admonition),
}

impl Directive {
    fn apply(self, config: &mut MetaConfig) {
        match self {
            Directive::Tag(tag) => {
                config.tags.insert(tag);
            }
            Directive::Priority(priority) => config.priority = Some(priority),
            Directive::Done => config.done = true,
            Directive::Hide => config.hide = true,
            Directive::Pin => config.pin = true,
            Directive::Due(date) => config.due = Some(date),
            Directive::Created(date) => config.created = Some(date),
            Directive::Track(id) => config.track = Some(id),
            Directive::Image(image) => config.image = Some(image),
            Directive::Admonition(admonition) => config.admonition = Some(admonition),
        }
    }
}

fn is_delimiter(tag: TokenTag) -> bool {
    tag.is_inline_space() || tag.ends_line() || tag == TokenTag::RightBracket
}

impl<'src> Parser<'src> {
    pub(crate) fn parse_meta(&mut self, indent: usize) -> AstBlock {
        let open = self.lexer.eat_token();
        let config = self.parse_meta_config();
        self.enter_body(indent + 1);
        let children = self.parse_body(indent + 1);
        let end = self.end_covering(open.start, &children);
        AstBlock::new(open.start, end, indent, BlockKind::Meta { config, children })
    }

    /// Read directives up to and including `]`. An unclosed list ends at the line end.
    fn parse_meta_config(&mut self) -> MetaConfig {
        let mut config = MetaConfig::default();
        loop {
            self.lexer
                .eat_tokens_until(|token| !token.tag.is_inline_space());
            let token = self.lexer.peek_token(0);
            match token.tag {
                TokenTag::RightBracket => {
                    self.lexer.eat_token();
                    break;
                }
                TokenTag::Newline | TokenTag::Eof => break,
                _ => {}
            }
            match self.parse_directive() {
                Ok(directive) => directive.apply(&mut config),
                Err(err) => {
                    trace!(%err, "skipping meta directive");
                    self.lexer
                        .eat_tokens_until(|token| is_delimiter(token.tag));
                }
            }
        }
        config
    }

    fn parse_directive(&mut self) -> Result<Directive, DirectiveError> {
        let token = self.lexer.peek_token(0);
        let directive = match token.tag {
            TokenTag::At => {
                self.lexer.eat_token();
                let word = self.expect_value("@", &[TokenTag::Word, TokenTag::Number])?;
                let tag = self.lexer.get_token_text(&word);
                if !is_tag(tag) {
                    return Err(DirectiveError::InvalidTag {
                        tag: tag.to_string(),
                    });
                }
                Directive::Tag(tag.to_string())
            }
            TokenTag::Hash => {
                self.lexer.eat_token();
                let number = self.expect_value("#", &[TokenTag::Number])?;
                Directive::Priority(number.value.unwrap_or_default())
            }
            TokenTag::Word => match self.lexer.get_token_text(&token) {
                "x" => self.keyword(Directive::Done),
                "hide" => self.keyword(Directive::Hide),
                "pin" => self.keyword(Directive::Pin),
                "due" => {
                    self.lexer.eat_token();
                    self.expect_value("due", &[TokenTag::Colon])?;
                    Directive::Due(self.parse_date()?)
                }
                "created" => {
                    self.lexer.eat_token();
                    self.expect_value("created", &[TokenTag::Colon])?;
                    Directive::Created(self.parse_date()?)
                }
                "track" => {
                    self.lexer.eat_token();
                    self.expect_value("track", &[TokenTag::Colon])?;
                    let number = self.expect_value("track", &[TokenTag::Number])?;
                    Directive::Track(number.value.unwrap_or_default())
                }
                "image" => {
                    self.lexer.eat_token();
                    Directive::Image(self.parse_image()?)
                }
                word => match Admonition::from_keyword(word) {
                    Some(admonition) => self.keyword(Directive::Admonition(admonition)),
                    None => return Err(DirectiveError::Unknown { offset: token.start }),
                },
            },
            _ => return Err(DirectiveError::Unknown { offset: token.start }),
        };

        let next = self.lexer.peek_token(0);
        if !is_delimiter(next.tag) {
            return Err(DirectiveError::NoDelimiter { offset: next.start });
        }
        Ok(directive)
    }

    fn keyword(&mut self, directive: Directive) -> Directive {
        self.lexer.eat_token();
        directive
    }

    /// Eat the next token if its tag is one of `tags`.
    fn expect_value(
        &mut self,
        directive: &'static str,
        tags: &[TokenTag],
    ) -> Result<Token, DirectiveError> {
        let token = self.lexer.peek_token(0);
        if !tags.contains(&token.tag) {
            return Err(DirectiveError::MissingValue {
                directive,
                offset: token.start,
            });
        }
        Ok(self.lexer.eat_token())
    }

    /// `Y-M-D` with unpadded or padded parts.
    fn parse_date(&mut self) -> Result<NaiveDate, DirectiveError> {
        let offset = self.lexer.peek_token(0).start;
        let invalid = || DirectiveError::InvalidDate { offset };
        let year = self.lexer.try_eat_token(TokenTag::Number).ok_or_else(invalid)?;
        self.lexer.try_eat_token(TokenTag::Dash).ok_or_else(invalid)?;
        let month = self.lexer.try_eat_token(TokenTag::Number).ok_or_else(invalid)?;
        self.lexer.try_eat_token(TokenTag::Dash).ok_or_else(invalid)?;
        let day = self.lexer.try_eat_token(TokenTag::Number).ok_or_else(invalid)?;

        let year = i32::try_from(year.value.unwrap_or_default()).map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(
            year,
            month.value.unwrap_or_default(),
            day.value.unwrap_or_default(),
        )
        .ok_or_else(invalid)
    }

    /// `[width] path` after the `image` keyword.
    fn parse_image(&mut self) -> Result<MetaImage, DirectiveError> {
        let token = self.lexer.peek_token(0);
        if !token.tag.is_inline_space() {
            return Err(DirectiveError::MissingValue {
                directive: "image",
                offset: token.start,
            });
        }
        self.lexer
            .eat_tokens_until(|token| !token.tag.is_inline_space());

        let mut width = None;
        let first = self.lexer.peek_token(0);
        if first.tag == TokenTag::Number && self.lexer.peek_token(1).tag.is_inline_space() {
            self.lexer.eat_token();
            width = first.value;
            self.lexer
                .eat_tokens_until(|token| !token.tag.is_inline_space());
        }

        let mut path = String::new();
        loop {
            let next = self.lexer.peek_token(0);
            if is_delimiter(next.tag) {
                break;
            }
            self.lexer.eat_token();
            if next.tag == TokenTag::Backslash {
                let escaped = self.lexer.peek_token(0);
                if escaped.tag.ends_line() {
                    break;
                }
                self.lexer.eat_token();
                path.push_str(self.lexer.get_token_text(&escaped));
            } else {
                path.push_str(self.lexer.get_token_text(&next));
            }
        }
        if path.is_empty() {
            return Err(DirectiveError::MissingValue {
                directive: "image",
                offset: first.start,
            });
        }
        Ok(MetaImage { path, width })
    }
}
