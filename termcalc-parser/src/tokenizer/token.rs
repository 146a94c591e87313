use logos::Logos;
use std::ops::Range;

/// The different kinds of lexemes that can be produced by the tokenizer.
///
/// Operators, parentheses, the separator and the equals sign are single-character lexemes; two
/// consecutive `+` characters are two lexemes, never one. Numbers and names are matched with
/// maximal munch.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("=")]
    Equal,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9.]+")]
    Number,

    #[regex(r"[A-Za-z]+")]
    Name,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if lexemes of this kind carry no meaning and are dropped by the parser.
    pub fn is_ignored(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Symbol)
    }
}

/// A lexeme produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme<'source> {
    /// The region of the source code that this lexeme originated from.
    pub span: Range<usize>,

    /// The kind of lexeme.
    pub kind: TokenKind,

    /// The raw text of the lexeme.
    pub text: &'source str,
}

impl Lexeme<'_> {
    /// Returns true if the lexeme is dropped by the parser.
    pub fn is_ignored(&self) -> bool {
        self.kind.is_ignored()
    }
}
