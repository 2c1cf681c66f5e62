//! Lexer
//!
//!     Tokenization happens in two layers. The base layer is a vanilla logos lexer (see
//!     [base_tokenization]) that splits the source into raw tokens: one token per markup special
//!     character, collapsed runs of spaces, short digit runs and words. The second layer is the
//!     [Lexer], a pull-based cursor over those tokens that the grammars drive directly.
//!
//! Lookahead
//!
//!     Parsing never needs to see more than a handful of tokens ahead, so the lexer keeps a
//!     fixed ring of [MAX_LOOKAHEAD] token slots. Tokens are pulled from logos only when a peek
//!     reaches past what is buffered, and slots are reused as tokens are eaten. Tokens are plain
//!     `Copy` values: keeping one around is fine, but its text has to be fetched through
//!     [Lexer::get_token_text] while the source is alive.
//!
//! Progress Guard
//!
//!     Hand-written recursive descent code can easily spin on a token it never consumes. The
//!     lexer counts peeks since the last eaten token and aborts once [MAX_TOKEN_PEEK_COUNT] is
//!     reached. Eating the eof sentinel does not count as progress. Both this guard and an out
//!     of range lookahead indicate a grammar defect, not bad input, and panic.

pub mod base_tokenization;
pub mod lexer;
pub mod token;

pub use base_tokenization::{tokenize, RawToken};
pub use lexer::{EatObserver, Lexer, MAX_LOOKAHEAD, MAX_TOKEN_PEEK_COUNT};
pub use token::{Token, TokenTag};
