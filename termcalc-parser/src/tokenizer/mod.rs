pub mod token;

use logos::{Lexer, Logos};
pub use token::{Lexeme, TokenKind};

/// Returns an iterator over the lexeme kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the lexemes produced by the tokenizer, including
/// whitespace and unrecognized symbols.
pub fn tokenize_complete(input: &str) -> Box<[Lexeme]> {
    let mut lexer = tokenize(input);
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        lexemes.push(Lexeme {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            text: lexer.slice(),
        });
    }

    lexemes.into_boxed_slice()
}
