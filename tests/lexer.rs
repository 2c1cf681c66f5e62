//! Lexer behavior through the public API
//!
//! The ring buffer must hand out exactly the token stream the base tokenizer produces, no
//! matter how far ahead the caller peeks before eating.

use proptest::prelude::*;
use tmark::tmark::lexing::{tokenize, Lexer, Token, TokenTag, MAX_LOOKAHEAD};

fn drain(source: &str, lookahead: usize) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        lexer.peek_token(lookahead);
        let token = lexer.eat_token();
        if token.is(TokenTag::Eof) {
            return tokens;
        }
        tokens.push(token);
    }
}

#[test]
fn test_meta_line_tokens() {
    let tags: Vec<_> = tokenize("[x #12 @work]")
        .into_iter()
        .map(|t| t.tag)
        .collect();
    assert_eq!(
        tags,
        vec![
            TokenTag::LeftBracket,
            TokenTag::Word,
            TokenTag::Spaces,
            TokenTag::Hash,
            TokenTag::Number,
            TokenTag::Spaces,
            TokenTag::At,
            TokenTag::Word,
            TokenTag::RightBracket,
        ]
    );
}

#[test]
fn test_word_beats_number_on_longer_match() {
    let tokens = tokenize("1a 12");
    assert_eq!(tokens[0].tag, TokenTag::Word);
    assert_eq!(tokens[2].tag, TokenTag::Number);
    assert_eq!(tokens[2].value, Some(12));
}

#[test]
fn test_repeats_count_from_source() {
    let mut lexer = Lexer::new("***");
    let token = lexer.peek_token(0);
    assert_eq!(lexer.get_token_repeats(&token), 3);

    let mut lexer = Lexer::new("*a*");
    let token = lexer.peek_token(0);
    assert_eq!(lexer.get_token_repeats(&token), 1);

    // A run longer than the ring still counts in full.
    let source = "=".repeat(MAX_LOOKAHEAD * 2);
    let mut lexer = Lexer::new(&source);
    let token = lexer.peek_token(0);
    assert_eq!(lexer.get_token_repeats(&token), MAX_LOOKAHEAD * 2);
}

#[test]
fn test_peek_then_eat_keeps_source_order() {
    let source = "[x] *a* b\n- c";
    let mut lexer = Lexer::new(source);
    let peeked: Vec<_> = (0..5).map(|n| lexer.peek_token(n)).collect();
    let eaten: Vec<_> = (0..5).map(|_| lexer.eat_token()).collect();
    assert_eq!(peeked, eaten);
    assert_eq!(eaten[0].start, 0);
    for pair in eaten.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(lexer.get_token_text(&eaten[4]), "*");
    assert_eq!(lexer.peek_token(0).tag, TokenTag::Word);
}

#[test]
fn test_eof_offset_is_source_length() {
    let mut lexer = Lexer::new("héllo");
    lexer.eat_token();
    assert_eq!(lexer.peek_token(0), Token::eof("héllo".len()));
    assert!(lexer.at_eof());
}

#[test]
fn test_eat_tokens_until_stops_before_match() {
    let mut lexer = Lexer::new("a b;c");
    lexer.eat_tokens_until(|t| t.tag == TokenTag::Semicolon);
    assert_eq!(lexer.peek_token(0).tag, TokenTag::Semicolon);
    lexer.eat_tokens_until(|_| false);
    assert!(lexer.peek_token(0).is(TokenTag::Eof));
}

proptest! {
    #[test]
    fn ring_matches_tokenizer(
        source in "[a-c 0-9*~^`<>;@#\\[\\]|=.:()!&'/,\\-\\\\\n\t]{0,120}",
        lookahead in 0usize..MAX_LOOKAHEAD,
    ) {
        prop_assert_eq!(drain(&source, lookahead), tokenize(&source));
    }

    #[test]
    fn tokens_tile_the_source(source in "\\PC{0,80}") {
        let tokens = tokenize(&source);
        let mut offset = 0;
        for token in &tokens {
            prop_assert_eq!(token.start, offset);
            prop_assert!(token.end > token.start);
            offset = token.end;
        }
        prop_assert_eq!(offset, source.len());
    }
}
