//! Tokenizer and token model for `termcalc` expressions.
//!
//! Parsing is a two step process. The [`tokenizer`] splits the input into [`Lexeme`]s using
//! [`logos`]; [`parse_tokens`] then converts each meaningful lexeme into a [`Token`], dropping
//! whitespace and any unrecognized characters.
//!
//! ```
//! use termcalc_parser::{parse_tokens, token::Token};
//!
//! let tokens = parse_tokens("2(x + 1)").unwrap();
//! assert_eq!(tokens, vec![
//!     Token::Number(2.0),
//!     Token::ParenOpen,
//!     Token::function("x"),
//!     Token::Add,
//!     Token::Number(1.0),
//!     Token::ParenClose,
//! ]);
//! ```
//!
//! [`Lexeme`]: tokenizer::Lexeme

pub mod error;
pub mod token;
pub mod tokenizer;

use error::{kind::InvalidNumber, Error};
use token::Token;
use tokenizer::{tokenize_complete, Lexeme, TokenKind};

/// Converts a single lexeme into a token. Returns [`None`] for lexemes that are dropped.
fn convert(lexeme: &Lexeme) -> Result<Option<Token>, Error> {
    Ok(Some(match lexeme.kind {
        TokenKind::Whitespace | TokenKind::Symbol => return Ok(None),
        TokenKind::Add => Token::Add,
        TokenKind::Sub => Token::Subtract,
        TokenKind::Mul => Token::Multiply,
        TokenKind::Div => Token::Divide,
        TokenKind::Exp => Token::Exponentiate,
        TokenKind::Equal => Token::Equal,
        TokenKind::Comma => Token::Separator,
        TokenKind::OpenParen => Token::ParenOpen,
        TokenKind::CloseParen => Token::ParenClose,
        TokenKind::Number => {
            let value = lexeme.text.parse::<f64>().map_err(|_| {
                Error::new(vec![lexeme.span.clone()], InvalidNumber {
                    lexeme: lexeme.text.to_string(),
                })
            })?;
            Token::Number(value)
        },
        TokenKind::Name => Token::function(lexeme.text),
    }))
}

/// Parses the given input into a sequence of tokens.
///
/// A malformed number (such as `1.2.3`) fails the whole parse.
pub fn parse_tokens(input: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    for lexeme in tokenize_complete(input).iter() {
        if let Some(token) = convert(lexeme)? {
            tokens.push(token);
        }
    }
    Ok(tokens)
}
