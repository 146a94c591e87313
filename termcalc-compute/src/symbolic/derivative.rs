use crate::expr::{Expression, Status};
use crate::numerical::ctxt::Funcs;
use super::{merge, split_by_top_level, Chunk};
use termcalc_parser::token::Token;
use tracing::debug;

/// Returns true if the token is the variable of differentiation, which is any name without a
/// registered function or constant.
fn is_variable(token: &Token, funcs: &Funcs) -> bool {
    token
        .name()
        .map(|name| !funcs.contains(name, usize::MAX))
        .unwrap_or(false)
}

/// Applies the power rule to every variable in a single term.
///
/// A variable without an exponent gets the exponent `1`. Each `x^n` with a numeric `n` becomes
/// `n*x^(n-1)`. A term with no such rewrite is constant and becomes `0`.
fn power_rule(mut term: Vec<Token>, funcs: &Funcs) -> Vec<Token> {
    let mut rewrote = false;
    let mut i = 0;
    while i < term.len() {
        if !is_variable(&term[i], funcs) {
            i += 1;
            continue;
        }

        if term.get(i + 1) != Some(&Token::Exponentiate) {
            term.splice(i + 1..i + 1, [Token::Exponentiate, Token::Number(1.0)]);
        }

        match term.get(i + 2) {
            Some(&Token::Number(n)) => {
                term.splice(i..i, [Token::Number(n), Token::Multiply]);
                term[i + 4] = Token::Number(n - 1.0);
                rewrote = true;
                i += 5;
            },
            _ => i += 1,
        }
    }

    if rewrote {
        term
    } else {
        vec![Token::Number(0.0)]
    }
}

/// Differentiates the expression with respect to its unassigned names, using the power rule on
/// each top-level term.
///
/// The result is a new, unevaluated expression with the same function table. A failed expression
/// is returned as is.
///
/// ```
/// use termcalc_compute::{parse, symbolic::derivative};
///
/// let result = derivative(&parse("x^2").unwrap()).evaluate();
/// assert_eq!(result.human_readable(false), "2*x");
///
/// let result = derivative(&parse("5").unwrap()).evaluate();
/// assert_eq!(result.numeric_value().unwrap(), 0.0);
/// ```
pub fn derivative(expr: &Expression) -> Expression {
    if expr.status() == Status::Fail {
        return expr.clone();
    }

    let funcs = expr.funcs();
    let chunks = split_by_top_level(expr.tokens(), &[Token::Add, Token::Subtract])
        .into_iter()
        .map(|chunk| match chunk {
            Chunk::Content(term) if !term.is_empty() => Chunk::Content(power_rule(term, funcs)),
            other => other,
        })
        .collect::<Vec<_>>();

    let result = Expression::with_funcs(merge(chunks), funcs.clone());
    debug!(input = %expr, output = %result, "differentiated");
    result
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn derive(input: &str) -> String {
        derivative(&parse(input).unwrap()).human_readable(false)
    }

    #[test]
    fn power_rule_rewrite() {
        assert_eq!(derive("x^3"), "3*x^2");
        assert_eq!(derive("4x"), "4 1*x^0");
    }

    #[test]
    fn constant_terms() {
        assert_eq!(derive("x^2+7-pi"), "2*x^1+0-0");
    }

    #[test]
    fn signs_are_kept() {
        assert_eq!(derive("-x^2"), "-2*x^1");
    }

    #[test]
    fn evaluated_results() {
        let result = derivative(&parse("3x^2 - 4x + 1").unwrap()).evaluate();
        assert_eq!(result.human_readable(false), "6*x-4");

        let mut result = derivative(&parse("x^3").unwrap());
        result.bind_constant("x", 2.0);
        assert_eq!(result.evaluate().numeric_value().unwrap(), 12.0);
    }

    #[test]
    fn failed_input() {
        let failed = parse("(x").unwrap().evaluate();
        assert_eq!(derivative(&failed), failed);
    }
}
