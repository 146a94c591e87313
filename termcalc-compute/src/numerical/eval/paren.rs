use crate::expr::{Expression, ParenSearch};
use crate::numerical::{
    error::{
        kind::{ClosingParenthesisWithoutOpeningParenthesis, OpeningParenthesisWithoutClosingParenthesis},
        EvalError,
    },
    options::EvalOptions,
};
use termcalc_parser::token::Token;
use tracing::debug;

/// Checks that every parenthesis in `tokens` is matched.
fn check_balance(tokens: &[Token]) -> Result<(), EvalError> {
    let mut opens = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::ParenOpen => opens.push(i),
            Token::ParenClose => {
                if opens.pop().is_none() {
                    return Err(EvalError::new(ClosingParenthesisWithoutOpeningParenthesis, vec![i]));
                }
            },
            _ => (),
        }
    }

    match opens.first() {
        Some(&open) => Err(EvalError::new(OpeningParenthesisWithoutClosingParenthesis, vec![open])),
        None => Ok(()),
    }
}

/// Finds the first matched parenthesis pair that starts at or after `start`, which must be a
/// position outside of any parentheses.
pub(crate) fn find_pair(tokens: &[Token], start: usize) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut open = None;
    for (i, token) in tokens.iter().enumerate().skip(start) {
        match token {
            Token::ParenOpen => {
                if depth == 0 {
                    open = Some(i);
                }
                depth += 1;
            },
            Token::ParenClose if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return open.map(|open| (open, i));
                }
            },
            _ => (),
        }
    }
    None
}

/// Returns true if `tokens` is a single parenthesized group, like `(x+1)`.
pub(crate) fn is_group(tokens: &[Token]) -> bool {
    tokens.len() >= 2 && find_pair(tokens, 0) == Some((0, tokens.len() - 1))
}

/// Splits the interior of a parenthesis pair at its top-level separators. Each argument is
/// returned along with its offset in `tokens`.
fn split_arguments(tokens: &[Token]) -> Vec<(usize, Vec<Token>)> {
    let mut args = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::ParenOpen => depth += 1,
            Token::ParenClose => depth = depth.saturating_sub(1),
            Token::Separator if depth == 0 => {
                args.push((start, tokens[start..i].to_vec()));
                start = i + 1;
            },
            _ => (),
        }
    }
    args.push((start, tokens[start..].to_vec()));
    args
}

impl Expression {
    /// Resolves every top-level parenthesis pair, left to right.
    ///
    /// The interior of each pair is evaluated one level deeper. A result of one token replaces
    /// the whole pair; a longer result is kept in parentheses so it stays grouped. The search
    /// for the next pair resumes after the replacement, so a kept group is never resolved twice.
    pub(crate) fn resolve_parentheses(&mut self, options: &EvalOptions) {
        if !self.is_evaluating() {
            return;
        }

        if let Err(error) = check_balance(&self.tokens) {
            self.fail(error);
            return;
        }

        self.paren_search = None;
        while self.is_evaluating() {
            let start = self.paren_search.map(|search| search.resume).unwrap_or(0);
            let Some((open, close)) = find_pair(&self.tokens, start) else {
                break;
            };

            match self.resolve_group(open, close, options) {
                Ok(replacement) => {
                    let resume = open + replacement.len();
                    debug!(depth = self.depth, open, close, ?replacement, "resolved parentheses");
                    self.tokens.splice(open..=close, replacement);
                    self.paren_search = Some(ParenSearch { open, close, resume });
                },
                Err(error) => self.fail(error),
            }
        }
    }

    /// Evaluates the interior of the pair at `open..=close`, argument by argument, and returns
    /// the tokens that replace the pair.
    fn resolve_group(
        &self,
        open: usize,
        close: usize,
        options: &EvalOptions,
    ) -> Result<Vec<Token>, EvalError> {
        let mut replacement = Vec::new();
        let args = split_arguments(&self.tokens[open + 1..close]);

        for (n, (offset, arg)) in args.into_iter().enumerate() {
            let mut sub = self.sub_expression(arg);
            sub.reduce(options);
            if let Some(error) = sub.error {
                return Err(error.offset(open + 1 + offset));
            }

            if n > 0 {
                replacement.push(Token::Separator);
            }
            if sub.tokens.len() > 1 && !is_group(&sub.tokens) {
                replacement.push(Token::ParenOpen);
                replacement.extend(sub.tokens);
                replacement.push(Token::ParenClose);
            } else {
                replacement.extend(sub.tokens);
            }
        }

        Ok(replacement)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        termcalc_parser::parse_tokens(input).unwrap()
    }

    #[test]
    fn first_pair() {
        assert_eq!(find_pair(&tokens("1+(2*(3))-(4)"), 0), Some((2, 8)));
        assert_eq!(find_pair(&tokens("1+(2*(3))-(4)"), 9), Some((10, 12)));
        assert_eq!(find_pair(&tokens("1+2"), 0), None);
    }

    #[test]
    fn groups() {
        assert!(is_group(&tokens("(x+1)")));
        assert!(is_group(&tokens("((x))")));
        assert!(!is_group(&tokens("(x)+(y)")));
        assert!(!is_group(&tokens("x")));
    }

    #[test]
    fn unbalanced() {
        let err = check_balance(&tokens("1)+(2")).unwrap_err();
        assert_eq!(err.indices, vec![1]);
        let err = check_balance(&tokens("((1)+2")).unwrap_err();
        assert_eq!(err.indices, vec![0]);
    }

    #[test]
    fn arguments() {
        let args = split_arguments(&tokens("1,add(2,3),x"));
        assert_eq!(args.iter().map(|(offset, _)| *offset).collect::<Vec<_>>(), vec![0, 2, 9]);
    }

    #[test]
    fn kept_group_is_stepped_over() {
        let mut expr = Expression::new(tokens("(x+1)+(2*3)"));
        expr.status = crate::expr::Status::Evaluating;
        expr.resolve_parentheses(&EvalOptions::default());
        assert_eq!(expr.human_readable(false), "(x+1)+6");
        assert_eq!(expr.paren_search.map(|search| search.resume), Some(7));
    }
}
