use crate::expr::Expression;
use crate::symbolic::{merge, split_by_top_level, Chunk};
use crate::numerical::options::EvalOptions;
use super::paren::is_group;
use termcalc_parser::token::Token;
use tracing::debug;

/// Joins factors with [`Token::Multiply`].
fn product(factors: Vec<Vec<Token>>) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (i, factor) in factors.into_iter().enumerate() {
        if i > 0 {
            tokens.push(Token::Multiply);
        }
        tokens.extend(factor);
    }
    tokens
}

/// Multiplies the single-number factors of a product term together. Returns [`None`] if the
/// term does not change.
fn merge_term(term: &[Token]) -> Option<Vec<Token>> {
    let factors = split_by_top_level(term, &[Token::Multiply])
        .into_iter()
        .filter_map(|chunk| match chunk {
            Chunk::Content(factor) => Some(factor),
            Chunk::SplitPoint(_) => None,
        })
        .collect::<Vec<_>>();
    if factors.len() < 2 || factors.iter().any(Vec::is_empty) {
        return None;
    }

    let (numbers, others): (Vec<_>, Vec<_>) = factors
        .into_iter()
        .partition(|factor| matches!(factor.as_slice(), [Token::Number(_)]));
    if numbers.is_empty() {
        return None;
    }

    let value = numbers.iter().filter_map(|factor| factor[0].number()).product::<f64>();
    if value == 0.0 {
        return Some(vec![Token::Number(0.0)]);
    }
    if numbers.len() < 2 && value != 1.0 {
        return None;
    }

    let mut merged = Vec::with_capacity(others.len() + 1);
    if value != 1.0 || others.is_empty() {
        merged.push(vec![Token::Number(value)]);
    }
    merged.extend(others);
    Some(product(merged))
}

impl Expression {
    /// Simplifies a successfully reduced top-level expression until nothing changes.
    ///
    /// Each round elides trivial exponents, merges numeric factors and terms and drops zero
    /// terms. If anything changed, the reduction passes run again, so a group that became
    /// numeric is evaluated.
    pub(crate) fn simplify(&mut self, options: &EvalOptions) {
        while self.is_evaluating() {
            let unwrapped = self.unwrap_outer_group();
            let elided = self.elide_exponents();
            let factors = self.merge_constant_factors();
            let terms = self.merge_constant_terms();
            let dropped = self.drop_zero_terms();
            if !(unwrapped || elided || factors || terms || dropped) {
                break;
            }

            debug!(tokens = %self, "simplified");
            self.run_passes(options);
        }
    }

    /// Removes parentheses around the whole expression.
    fn unwrap_outer_group(&mut self) -> bool {
        if !is_group(&self.tokens) {
            return false;
        }
        self.tokens.pop();
        self.tokens.remove(0);
        true
    }

    /// Rewrites `x^1` to `x` and `x^0` to `1`, where `x` is a name.
    ///
    /// A parenthesized base is a whole sub-expression and is left alone. `x^0` is also left alone
    /// when `x` is itself an exponent, since `a^x^0` means `(a^x)^0`.
    fn elide_exponents(&mut self) -> bool {
        let mut changed = false;
        let mut i = 1;
        while i + 1 < self.tokens.len() {
            if self.tokens[i] != Token::Exponentiate || !self.tokens[i - 1].is_name() {
                i += 1;
                continue;
            }

            match self.tokens[i + 1] {
                Token::Number(n) if n == 1.0 => {
                    self.tokens.drain(i..=i + 1);
                    changed = true;
                },
                Token::Number(n) if n == 0.0
                    && !(i >= 2 && self.tokens[i - 2] == Token::Exponentiate) => {
                    self.tokens.splice(i - 1..=i + 1, [Token::Number(1.0)]);
                    changed = true;
                },
                _ => i += 1,
            }
        }
        changed
    }

    /// Multiplies the numeric factors of each top-level term together. A product of `1` is
    /// dropped when other factors remain, and a product of `0` collapses the term to `0`.
    fn merge_constant_factors(&mut self) -> bool {
        let mut changed = false;
        let chunks = split_by_top_level(&self.tokens, &[Token::Add, Token::Subtract])
            .into_iter()
            .map(|chunk| match chunk {
                Chunk::Content(term) => match merge_term(&term) {
                    Some(merged) => {
                        changed = true;
                        Chunk::Content(merged)
                    },
                    None => Chunk::Content(term),
                },
                split => split,
            })
            .collect::<Vec<_>>();

        if changed {
            self.tokens = merge(chunks);
        }
        changed
    }

    /// Sums the top-level terms that are single numbers into one term at the end, if there are at
    /// least two of them and some other term keeps them from being folded.
    fn merge_constant_terms(&mut self) -> bool {
        let mut sign = Token::Add;
        let mut total = 0.0;
        let mut constants = 0;
        let mut others = Vec::new();
        for chunk in split_by_top_level(&self.tokens, &[Token::Add, Token::Subtract]) {
            match chunk {
                Chunk::SplitPoint(token) => sign = token,
                Chunk::Content(term) if term.is_empty() => (),
                Chunk::Content(term) => match term.as_slice() {
                    &[Token::Number(n)] => {
                        constants += 1;
                        total += if sign == Token::Subtract { -n } else { n };
                    },
                    _ => others.push((sign.clone(), term)),
                },
            }
        }
        if constants < 2 || others.is_empty() {
            return false;
        }

        let mut tokens = Vec::with_capacity(self.tokens.len());
        for (i, (sign, term)) in others.into_iter().enumerate() {
            if i > 0 || sign == Token::Subtract {
                tokens.push(sign);
            }
            tokens.extend(term);
        }
        if total != 0.0 {
            tokens.push(if total < 0.0 { Token::Subtract } else { Token::Add });
            tokens.push(Token::Number(total.abs()));
        }
        self.tokens = tokens;
        true
    }

    /// Removes top-level terms that are exactly `0`, along with the sign in front of them. The
    /// expression `0` itself is kept.
    fn drop_zero_terms(&mut self) -> bool {
        let chunks = split_by_top_level(&self.tokens, &[Token::Add, Token::Subtract]);
        if chunks.len() < 3 {
            return false;
        }

        let is_zero = |chunk: &Chunk| matches!(chunk, Chunk::Content(term) if term == &[Token::Number(0.0)]);
        if !chunks.iter().any(is_zero) {
            return false;
        }

        let mut kept = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            if is_zero(&chunk) {
                // the sign in front of the zero term goes with it; a leading zero leaves its
                // following sign as a leading operator
                if matches!(kept.last(), Some(Chunk::SplitPoint(_))) {
                    kept.pop();
                } else {
                    kept.push(Chunk::Content(Vec::new()));
                }
            } else {
                kept.push(chunk);
            }
        }

        // a leading `+` carries no meaning
        if let [Chunk::Content(first), Chunk::SplitPoint(Token::Add), ..] = kept.as_slice() {
            if first.is_empty() {
                kept.drain(0..2);
            }
        }

        let tokens = merge(kept);
        self.tokens = if tokens.is_empty() { vec![Token::Number(0.0)] } else { tokens };
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::Status;
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(input: &str) -> String {
        let mut expr = Expression::new(termcalc_parser::parse_tokens(input).unwrap());
        expr.status = Status::Evaluating;
        expr.retype_variables();
        expr.simplify(&EvalOptions::default());
        expr.human_readable(false)
    }

    #[test]
    fn exponent_one() {
        assert_eq!(simplified("2*x^1"), "2*x");
    }

    #[test]
    fn exponent_zero() {
        assert_eq!(simplified("3*x^0"), "3");
    }

    #[test]
    fn exponent_of_exponent() {
        assert_eq!(simplified("2^x^0"), "2^x^0");
    }

    #[test]
    fn parenthesized_base() {
        assert_eq!(simplified("(x+1)^1*y"), "(x+1)^1*y");
    }

    #[test]
    fn numeric_factors() {
        assert_eq!(simplified("x*2*y^2*3+z"), "6*x*y^2+z");
        assert_eq!(simplified("1*x"), "x");
        assert_eq!(simplified("0*x^2-y"), "-y");
    }

    #[test]
    fn zero_terms() {
        assert_eq!(simplified("x^2+0"), "x^2");
        assert_eq!(simplified("0+x-0"), "x");
        assert_eq!(simplified("0-0"), "0");
    }

    #[test]
    fn numeric_terms() {
        assert_eq!(simplified("x-2+3"), "x+1");
        assert_eq!(simplified("2-x+1"), "-x+3");
        assert_eq!(simplified("x+1-1"), "x");
        assert_eq!(simplified("1+x*y-4+y"), "x*y+y-3");
        assert_eq!(simplified("x-(-4)"), "x-(-4)");
    }

    #[test]
    fn group_becomes_numeric() {
        assert_eq!(simplified("(x^0+1)^2"), "4");
        assert_eq!(simplified("2*(3+x^0)"), "8");
    }

    #[test]
    fn outer_group() {
        assert_eq!(simplified("(x+1)"), "x+1");
    }
}
