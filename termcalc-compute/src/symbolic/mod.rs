//! Symbolic manipulation of expressions.
//!
//! The transforms in this module work directly on token sequences. An expression is partitioned
//! at its top-level operators with [`split_by_top_level`], each piece is rewritten, and the
//! pieces are joined again with [`merge`]. The result is a new, unevaluated [`Expression`] that
//! can be evaluated like any other:
//!
//! ```
//! use termcalc_compute::{parse, symbolic::derivative};
//!
//! let expr = parse("x^3+4").unwrap();
//! let result = derivative(&expr).evaluate();
//! assert_eq!(result.human_readable(false), "3*x^2");
//! ```
//!
//! [`Expression`]: crate::expr::Expression

pub mod derivative;
pub mod expand;
pub mod tangent;

pub use derivative::derivative;
pub use expand::multiply_out;
pub use tangent::tangent;

use std::mem::discriminant;
use termcalc_parser::token::Token;

/// A piece of a partitioned token sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    /// Tokens between two split points. May be empty.
    Content(Vec<Token>),

    /// The token the sequence was split at.
    SplitPoint(Token),
}

/// Partitions `tokens` at every token whose type is in `split_types` and that is not nested in
/// parentheses.
///
/// Only the variant of each entry of `split_types` is compared, so `Token::Number(0.0)` splits at
/// every number. The result always starts and ends with a [`Chunk::Content`], and alternates
/// between content and split points.
pub fn split_by_top_level(tokens: &[Token], split_types: &[Token]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;

    for token in tokens {
        match token {
            Token::ParenOpen => depth += 1,
            Token::ParenClose => depth = depth.saturating_sub(1),
            _ => (),
        }

        let splits = depth == 0
            && split_types.iter().any(|split| discriminant(split) == discriminant(token));
        if splits {
            chunks.push(Chunk::Content(std::mem::take(&mut current)));
            chunks.push(Chunk::SplitPoint(token.clone()));
        } else {
            current.push(token.clone());
        }
    }

    chunks.push(Chunk::Content(current));
    chunks
}

/// Joins partitioned chunks back into one token sequence.
pub fn merge(chunks: Vec<Chunk>) -> Vec<Token> {
    chunks
        .into_iter()
        .flat_map(|chunk| match chunk {
            Chunk::Content(tokens) => tokens,
            Chunk::SplitPoint(token) => vec![token],
        })
        .collect()
}
