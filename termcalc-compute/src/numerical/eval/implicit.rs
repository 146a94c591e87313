use crate::expr::Expression;
use super::paren::find_pair;
use termcalc_parser::token::Token;

/// Returns true if the token can end a factor.
fn ends_factor(token: &Token) -> bool {
    matches!(token, Token::Number(_) | Token::Function(_) | Token::Variable(_) | Token::ParenClose)
}

/// Returns true if the token can start a factor.
fn starts_factor(token: &Token) -> bool {
    matches!(token, Token::Number(_) | Token::Function(_) | Token::Variable(_) | Token::ParenOpen)
}

/// Returns the index of the last argument of the function at `index`, where every argument is a
/// single token or a parenthesized group. Returns `index` if no argument follows.
fn last_argument(tokens: &[Token], index: usize, arity: usize) -> usize {
    let mut end = index;
    for _ in 0..arity {
        match tokens.get(end + 1) {
            Some(Token::ParenOpen) => match find_pair(tokens, end + 1) {
                Some((_, close)) => end = close,
                None => break,
            },
            Some(token) if starts_factor(token) => end += 1,
            _ => break,
        }
    }
    end
}

impl Expression {
    /// Inserts a [`Token::Multiply`] between every two adjacent factors, so that `2(x+1)` and
    /// `2x` read as products.
    ///
    /// A function that takes arguments is not a factor of the token after it, and its arguments
    /// are not multiplied together.
    pub(crate) fn insert_implicit_multiplication(&mut self) {
        if !self.is_evaluating() {
            return;
        }

        let mut i = 0;
        while i + 1 < self.tokens.len() {
            let arity = match &self.tokens[i] {
                Token::Function(name) => self.funcs.get(name).map(|func| func.arity()).unwrap_or(0),
                _ => 0,
            };
            if arity > 0 {
                let last = last_argument(&self.tokens, i, arity);
                if last > i {
                    i = last;
                    continue;
                }
            }

            if ends_factor(&self.tokens[i]) && starts_factor(&self.tokens[i + 1]) && arity == 0 {
                self.tokens.insert(i + 1, Token::Multiply);
                i += 2;
            } else {
                i += 1;
            }
        }
    }
}
