use crate::expr::Expression;
use crate::numerical::ctxt::Application;
use termcalc_parser::token::Token;

impl Expression {
    /// Removes every argument separator. Arguments are bound by position once the parentheses
    /// around them are resolved.
    pub(crate) fn remove_separators(&mut self) {
        if !self.is_evaluating() {
            return;
        }
        self.tokens.retain(|token| !matches!(token, Token::Separator));
    }

    /// Applies every function or constant with an arity of at most `max_arity`.
    ///
    /// Applying a rule changes the length of the sequence, so the scan restarts from the
    /// beginning after each application. Deferred functions are skipped.
    pub(crate) fn resolve_functions(&mut self, max_arity: usize) {
        let mut i = 0;
        while i < self.tokens.len() && self.is_evaluating() {
            let registered = self.tokens[i]
                .name()
                .map(|name| self.funcs.contains(name, max_arity))
                .unwrap_or(false);
            if !registered {
                i += 1;
                continue;
            }

            match self.funcs.apply(&mut self.tokens, i) {
                Ok(Application::Applied) => i = 0,
                Ok(Application::Deferred) => i += 1,
                Err(error) => self.fail(error),
            }
        }
    }

    /// Retypes every name without a registered rule as a [`Token::Variable`].
    pub(crate) fn retype_variables(&mut self) {
        if !self.is_evaluating() {
            return;
        }
        for token in self.tokens.iter_mut() {
            if let Token::Function(name) = token {
                if !self.funcs.contains(name, usize::MAX) {
                    *token = Token::Variable(std::mem::take(name));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::Status;
    use pretty_assertions::assert_eq;
    use super::*;

    fn evaluating(input: &str) -> Expression {
        let mut expr = Expression::new(termcalc_parser::parse_tokens(input).unwrap());
        expr.status = Status::Evaluating;
        expr
    }

    #[test]
    fn constants_before_functions() {
        let mut expr = evaluating("sin pi");
        expr.resolve_functions(0);
        assert_eq!(expr.tokens(), &[Token::function("sin"), Token::Number(std::f64::consts::PI)]);
        expr.resolve_functions(usize::MAX);
        assert_eq!(expr.len(), 1);
    }

    #[test]
    fn bound_constant() {
        let mut expr = evaluating("2 x");
        expr.bind_constant("x", 8.0);
        expr.resolve_functions(0);
        assert_eq!(expr.tokens(), &[Token::Number(2.0), Token::Number(8.0)]);
    }

    #[test]
    fn retype_unknown_names() {
        let mut expr = evaluating("sin x");
        expr.resolve_functions(usize::MAX);
        expr.retype_variables();
        assert_eq!(expr.tokens(), &[Token::function("sin"), Token::Variable("x".to_string())]);
    }

    #[test]
    fn missing_argument_fails() {
        let mut expr = evaluating("1+sin");
        expr.resolve_functions(usize::MAX);
        assert_eq!(expr.status(), Status::Fail);
        assert_eq!(expr.error().unwrap().indices, vec![2]);
    }
}
