//! The reduction engine.
//!
//! Evaluation rewrites the token sequence of an [`Expression`] in place, one pass at a time:
//!
//! 1. Parenthesized spans are evaluated recursively, one level deeper.
//! 2. Argument separators are removed.
//! 3. Constants are substituted, then functions are applied.
//! 4. Names without a registered rule become variables.
//! 5. `^` is folded, implicit multiplication is inserted, then `*` / `/` and `+` / `-` are
//!    folded, each left to right.
//! 6. At the top level, the result is simplified. Whenever simplification changes the tokens,
//!    passes 1 to 5 run again.
//!
//! Every pass is a no-op unless the expression is still [`Status::Evaluating`], so a failure in
//! one pass skips all later passes.

mod binary;
mod call;
mod implicit;
mod paren;
mod simplify;

pub(crate) use paren::find_pair;

use crate::expr::{Expression, Status};
use super::{
    error::{kind::MaximumDepthReached, EvalError},
    options::EvalOptions,
};
use termcalc_parser::token::BinOpKind;
use tracing::debug;

impl Expression {
    /// Evaluates the expression with the default [`EvalOptions`].
    ///
    /// On success, the status is [`Status::Success`] and the tokens hold the result: a single
    /// number, or a simplified symbolic form if the expression has unassigned names. On failure,
    /// the status is [`Status::Fail`] and [`Expression::error`] describes the failure.
    ///
    /// An expression that was already evaluated is returned unchanged.
    ///
    /// ```
    /// use termcalc_compute::{expr::Status, parse};
    ///
    /// let result = parse("2(3+4)").unwrap().evaluate();
    /// assert_eq!(result.status(), Status::Success);
    /// assert_eq!(result.numeric_value().unwrap(), 14.0);
    /// ```
    pub fn evaluate(self) -> Self {
        self.evaluate_with(&EvalOptions::default())
    }

    /// Evaluates the expression with the given options.
    pub fn evaluate_with(mut self, options: &EvalOptions) -> Self {
        self.reduce(options);
        self
    }

    /// Runs every reduction pass on the expression.
    pub(crate) fn reduce(&mut self, options: &EvalOptions) {
        if self.status.is_terminal() {
            return;
        }
        self.status = Status::Evaluating;
        debug!(depth = self.depth, tokens = %self, "evaluating");

        if self.depth > options.max_depth {
            self.fail(EvalError::new(
                MaximumDepthReached { max_depth: options.max_depth },
                (0..self.tokens.len()).collect(),
            ));
            return;
        }

        self.run_passes(options);

        if self.depth == 0 && self.is_evaluating() {
            self.simplify(options);
            if self.is_evaluating() {
                self.status = Status::Success;
            }
        }

        match &self.error {
            Some(error) => debug!(depth = self.depth, %error, "evaluation failed"),
            None => debug!(depth = self.depth, tokens = %self, "evaluated"),
        }
    }

    /// Runs the passes that rewrite the tokens at this level, in order.
    fn run_passes(&mut self, options: &EvalOptions) {
        self.resolve_parentheses(options);
        self.remove_separators();
        self.resolve_functions(0);
        self.resolve_functions(usize::MAX);
        self.retype_variables();
        self.fold(&[BinOpKind::Exp]);
        self.insert_implicit_multiplication();
        self.fold(&[BinOpKind::Mul, BinOpKind::Div]);
        self.fold(&[BinOpKind::Add, BinOpKind::Sub]);
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use crate::numerical::{error::EvalErrorKind, options::EvalOptionsBuilder};
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval(input: &str) -> Expression {
        parse(input).unwrap().evaluate()
    }

    fn value(input: &str) -> f64 {
        eval(input).numeric_value().unwrap()
    }

    #[test]
    fn precedence() {
        assert_eq!(value("1+2*3"), 7.0);
        assert_eq!(value("2*3^2"), 18.0);
        assert_eq!(value("10-4-3"), 3.0);
        assert_eq!(value("2^3^2"), 64.0);
        assert_eq!(value("-2^2"), -4.0);
    }

    #[test]
    fn parenthesized() {
        assert_eq!(value("((1+9)/5)*3"), 6.0);
        assert_eq!(value("(1+2)(3+4)"), 21.0);
        assert_eq!(value("2(-3)"), -6.0);
    }

    #[test]
    fn functions() {
        assert_float_absolute_eq!(value("sin(pi/2)"), 1.0);
        assert_float_absolute_eq!(value("2cos(0)+sqrt(16)"), 6.0);
        assert_eq!(value("add(1,2)*3"), 9.0);
        assert_eq!(value("add(add(1,2),3+4)"), 10.0);
    }

    #[test]
    fn bound_constants() {
        let mut expr = parse("3x^2+y").unwrap();
        expr.bind_constant("x", 2.0);
        expr.bind_constant("y", -1.0);
        assert_eq!(expr.evaluate().numeric_value().unwrap(), 11.0);
    }

    #[test]
    fn symbolic_result() {
        assert_eq!(eval("2x+3*4").human_readable(false), "2*x+12");
        assert_eq!(eval("x-2+3").human_readable(false), "x+1");
        assert_eq!(eval("2(x+1)").human_readable(false), "2*(x+1)");
        assert_eq!(eval("sin(x)").human_readable(false), "sin x");
    }

    #[test]
    fn group_that_becomes_numeric() {
        let expr = eval("(x^0+1)^2");
        assert_eq!(expr.status(), Status::Success);
        assert_eq!(expr.numeric_value().unwrap(), 4.0);
        assert_eq!(value("2*(3+x^0)"), 8.0);
        assert_eq!(value("sqrt(x^0+3)"), 2.0);
        assert_eq!(eval("(y^1+x^0)*2").human_readable(false), "(y+1)*2");
    }

    #[test]
    fn deferred_arguments_survive_simplification() {
        let expr = eval("add(1,x)+y^1");
        assert_eq!(expr.status(), Status::Success);
        assert_eq!(expr.human_readable(false), "add1x+y");
    }

    #[test]
    fn undefined_is_not_failure() {
        let expr = eval("5/0+1");
        assert_eq!(expr.status(), Status::Success);
        assert!(expr.numeric_value().unwrap().is_nan());
    }

    #[test]
    fn idempotent() {
        let once = eval("2(x+1)-4");
        let twice = once.clone().evaluate();
        assert_eq!(once, twice);
    }

    #[test]
    fn failure_indices_are_translated() {
        let expr = eval("1+(2*(3+))");
        assert_eq!(expr.status(), Status::Fail);
        let error = expr.error().unwrap();
        assert_eq!(error.indices, vec![7]);
        assert!(matches!(error.kind, EvalErrorKind::OperatorAtEndOfExpression(_)));
    }

    #[test]
    fn depth_limit() {
        let options = EvalOptionsBuilder::new().max_depth(2).build();
        let ok = parse("((1))").unwrap().evaluate_with(&options);
        assert_eq!(ok.numeric_value().unwrap(), 1.0);

        let deep = parse("(((1)))").unwrap().evaluate_with(&options);
        assert_eq!(deep.status(), Status::Fail);
        let error = deep.error().unwrap();
        assert!(matches!(error.kind, EvalErrorKind::MaximumDepthReached(_)));
        assert_eq!(error.indices, vec![3]);
    }
}
