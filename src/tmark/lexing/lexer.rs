//! Pull-based lexer with bounded lookahead.

use crate::tmark::lexing::base_tokenization::{to_token, RawToken};
use crate::tmark::lexing::token::{Token, TokenTag};
use logos::Logos;
use tracing::trace;

/// Number of token slots in the ring. Valid lookahead is `0..MAX_LOOKAHEAD`.
pub const MAX_LOOKAHEAD: usize = 16;

/// Peeks allowed since the last consumed token before the lexer gives up.
pub const MAX_TOKEN_PEEK_COUNT: usize = 100;

/// Receives every token the lexer eats.
///
/// The parser uses this to keep line and offset bookkeeping in one place, no matter which
/// lexer primitive did the eating.
pub trait EatObserver {
    fn on_eat(&mut self, token: &Token);
}

impl EatObserver for () {
    fn on_eat(&mut self, _token: &Token) {}
}

/// Token cursor over a source string.
pub struct Lexer<'src, O = ()> {
    source: &'src str,
    raw: logos::Lexer<'src, RawToken>,
    ring: [Token; MAX_LOOKAHEAD],
    head: usize,
    buffered: usize,
    peeks: usize,
    max_peeks: usize,
    observer: O,
}

impl<'src> Lexer<'src, ()> {
    pub fn new(source: &'src str) -> Self {
        Self::with_observer(source, ())
    }
}

impl<'src, O: EatObserver> Lexer<'src, O> {
    pub fn with_observer(source: &'src str, observer: O) -> Self {
        Self {
            source,
            raw: RawToken::lexer(source),
            ring: [Token::default(); MAX_LOOKAHEAD],
            head: 0,
            buffered: 0,
            peeks: 0,
            max_peeks: MAX_TOKEN_PEEK_COUNT,
            observer,
        }
    }

    /// Override the progress guard threshold.
    pub fn with_peek_limit(mut self, limit: usize) -> Self {
        self.max_peeks = limit.max(1);
        self
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn pull(&mut self) -> Token {
        let token = match self.raw.next() {
            Some(raw) => to_token(raw, self.raw.span(), self.raw.slice()),
            None => Token::eof(self.source.len()),
        };
        trace!(tag = ?token.tag, start = token.start, end = token.end, "pulled token");
        token
    }

    fn slot(&self, n: usize) -> usize {
        (self.head + n) % MAX_LOOKAHEAD
    }

    /// Return the token `n` positions ahead without consuming anything.
    ///
    /// # Panics
    ///
    /// When `n >= MAX_LOOKAHEAD`, or when the peek limit is reached without any token being
    /// eaten. Both are grammar defects.
    pub fn peek_token(&mut self, n: usize) -> Token {
        if n >= MAX_LOOKAHEAD {
            panic!("lexer lookahead {n} is out of range (max {MAX_LOOKAHEAD})");
        }
        self.peeks += 1;
        if self.peeks >= self.max_peeks {
            panic!(
                "lexer is not advancing: {} peeks without consuming a token at offset {}",
                self.peeks,
                self.offset_hint()
            );
        }
        while self.buffered <= n {
            let token = self.pull();
            let slot = self.slot(self.buffered);
            self.ring[slot] = token;
            self.buffered += 1;
        }
        self.ring[self.slot(n)]
    }

    fn offset_hint(&self) -> usize {
        if self.buffered > 0 {
            self.ring[self.head].start
        } else {
            self.raw.span().end
        }
    }

    /// True when the next token is already known to be the eof sentinel.
    ///
    /// This only inspects the buffer, so it does not count as a peek. It returns false when
    /// nothing has been buffered yet.
    pub fn at_eof(&self) -> bool {
        self.buffered > 0 && self.ring[self.head].tag == TokenTag::Eof
    }

    /// Consume the next token and hand it to the observer.
    pub fn eat_token(&mut self) -> Token {
        let token = self.peek_token(0);
        self.head = self.slot(1);
        self.buffered -= 1;
        if token.tag != TokenTag::Eof {
            self.peeks = 0;
        }
        self.observer.on_eat(&token);
        token
    }

    pub fn try_peek_token(&mut self, tag: TokenTag, n: usize) -> Option<Token> {
        let token = self.peek_token(n);
        (token.tag == tag).then_some(token)
    }

    pub fn try_eat_token(&mut self, tag: TokenTag) -> Option<Token> {
        self.try_peek_token(tag, 0)?;
        Some(self.eat_token())
    }

    /// Check that the next tokens match `tags` in order.
    pub fn try_peek_tokens(&mut self, tags: &[TokenTag]) -> bool {
        tags.iter()
            .enumerate()
            .all(|(n, tag)| self.peek_token(n).tag == *tag)
    }

    /// Count how many times the token's character repeats contiguously, starting at the token.
    ///
    /// Works on the source text directly, so long runs never touch the lookahead ring.
    /// Multi-character tokens and eof count as 1.
    pub fn get_token_repeats(&self, token: &Token) -> usize {
        let Some(ch) = token.tag.special_char() else {
            return 1;
        };
        if token.len() != 1 {
            return 1;
        }
        self.source[token.start..]
            .chars()
            .take_while(|c| *c == ch)
            .count()
    }

    pub fn eat_tokens(&mut self, n: usize) {
        for _ in 0..n {
            self.eat_token();
        }
    }

    /// Eat tokens until `stop` matches the next one (which is left in place) or eof.
    pub fn eat_tokens_until(&mut self, mut stop: impl FnMut(&Token) -> bool) {
        loop {
            let token = self.peek_token(0);
            if token.tag == TokenTag::Eof || stop(&token) {
                return;
            }
            self.eat_token();
        }
    }

    /// Eat the rest of the line, including the newline.
    pub fn eat_line(&mut self) {
        self.eat_tokens_until(|t| t.tag == TokenTag::Newline);
        self.try_eat_token(TokenTag::Newline);
    }

    /// Eat spaces, tabs and newlines.
    pub fn eat_whitespace(&mut self) {
        self.eat_tokens_until(|t| !matches!(t.tag, TokenTag::Spaces | TokenTag::Tab | TokenTag::Newline));
    }

    /// Copy of the source text covered by a token.
    pub fn get_token_text(&self, token: &Token) -> &'src str {
        &self.source[token.start..token.end]
    }
}
