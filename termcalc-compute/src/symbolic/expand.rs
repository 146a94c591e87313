use crate::expr::{Expression, Status};
use crate::numerical::{
    error::{kind::{MultiplyOutNeedsTwoGroups, TokensOutsideOfGroups}, EvalError},
    eval::find_pair,
};
use super::{split_by_top_level, Chunk};
use termcalc_parser::token::Token;
use tracing::debug;

/// Splits a sum into its terms, each with its sign. `true` means the term is subtracted.
fn signed_terms(tokens: &[Token]) -> Vec<(bool, Vec<Token>)> {
    let mut terms = Vec::new();
    let mut negative = false;
    for chunk in split_by_top_level(tokens, &[Token::Add, Token::Subtract]) {
        match chunk {
            Chunk::Content(term) if term.is_empty() => (),
            Chunk::Content(term) => {
                terms.push((negative, term));
                negative = false;
            },
            Chunk::SplitPoint(Token::Subtract) => negative = !negative,
            Chunk::SplitPoint(_) => (),
        }
    }
    terms
}

/// Wraps a term containing a division in parentheses, so that it stays one factor of a product.
fn factor(term: &[Token]) -> Vec<Token> {
    if term.contains(&Token::Divide) {
        let mut wrapped = Vec::with_capacity(term.len() + 2);
        wrapped.push(Token::ParenOpen);
        wrapped.extend_from_slice(term);
        wrapped.push(Token::ParenClose);
        wrapped
    } else {
        term.to_vec()
    }
}

/// Multiplies out a product of two parenthesized groups, like `(a+b)*(c-d) -> a*c-a*d+b*c-b*d`.
///
/// Every term of the first group is multiplied with every term of the second group, and the
/// sign of each product follows from the signs of its terms.
///
/// If the expression does not contain two groups, the result is a failed expression with
/// [`MultiplyOutNeedsTwoGroups`]. If anything other than a `*` between the groups lies outside
/// of them, it fails with [`TokensOutsideOfGroups`] pointing at those tokens. A failed
/// expression is returned as is.
///
/// ```
/// use termcalc_compute::{parse, symbolic::multiply_out};
///
/// let result = multiply_out(&parse("(2-6)*(x)").unwrap()).evaluate();
/// assert_eq!(result.human_readable(false), "2*x-6*x");
/// ```
pub fn multiply_out(expr: &Expression) -> Expression {
    if expr.status() == Status::Fail {
        return expr.clone();
    }

    let tokens = expr.tokens();
    let first = find_pair(tokens, 0);
    let second = first.and_then(|(_, close)| find_pair(tokens, close + 1));
    let ((open_a, close_a), (open_b, close_b)) = match (first, second) {
        (Some(a), Some(b)) => (a, b),
        (first, _) => {
            let found = usize::from(first.is_some());
            return expr.failed(EvalError::new(
                MultiplyOutNeedsTwoGroups { found },
                (0..tokens.len()).collect(),
            ));
        },
    };

    let stray = (0..open_a)
        .chain(close_a + 1..open_b)
        .chain(close_b + 1..tokens.len())
        .filter(|&i| !(i == close_a + 1 && i + 1 == open_b && tokens[i] == Token::Multiply))
        .collect::<Vec<_>>();
    if !stray.is_empty() {
        return expr.failed(EvalError::new(TokensOutsideOfGroups, stray));
    }

    let left = signed_terms(&tokens[open_a + 1..close_a]);
    let right = signed_terms(&tokens[open_b + 1..close_b]);

    let mut result = Vec::new();
    for (negative_a, term_a) in &left {
        for (negative_b, term_b) in &right {
            let negative = negative_a != negative_b;
            if negative {
                result.push(Token::Subtract);
            } else if !result.is_empty() {
                result.push(Token::Add);
            }
            result.extend(factor(term_a));
            result.push(Token::Multiply);
            result.extend(factor(term_b));
        }
    }

    let result = Expression::with_funcs(result, expr.funcs().clone());
    debug!(input = %expr, output = %result, "multiplied out");
    result
}
