use crate::expr::Expression;
use crate::numerical::options::EvalOptions;
use super::derivative;
use termcalc_parser::token::Token;

/// Returns the value of `expr` with `x` bound to the given value.
fn value_at(expr: &Expression, x: f64, options: &EvalOptions) -> Result<f64, Expression> {
    let mut expr = expr.unevaluated();
    expr.bind_constant("x", x);
    let result = expr.evaluate_with(options);
    result.numeric_value().map_err(|error| result.failed(error))
}

/// Builds the tangent line of `expr` at `x = x0`.
///
/// The line is `m*x-m*u+b`, where `m` is the slope at `x0`, `b` is the value of `expr` at `x0`,
/// and `u` is `x0`. The names `m`, `b` and `u` are bound as constants of the result, so
/// evaluating it leaves a line in `x`. If either value cannot be computed, the failed evaluation
/// is returned instead.
///
/// ```
/// use termcalc_compute::{parse, symbolic::tangent, EvalOptions};
///
/// let line = tangent(&parse("x^2+1").unwrap(), 1.0, &EvalOptions::default());
/// assert_eq!(line.evaluate().human_readable(false), "2*x");
/// ```
pub fn tangent(expr: &Expression, x0: f64, options: &EvalOptions) -> Expression {
    let slope = match value_at(&derivative(expr), x0, options) {
        Ok(slope) => slope,
        Err(failed) => return failed,
    };
    let value = match value_at(expr, x0, options) {
        Ok(value) => value,
        Err(failed) => return failed,
    };

    let mut line = Expression::with_funcs(vec![
        Token::function("m"),
        Token::Multiply,
        Token::function("x"),
        Token::Subtract,
        Token::function("m"),
        Token::Multiply,
        Token::function("u"),
        Token::Add,
        Token::function("b"),
    ], expr.funcs().clone());
    line.bind_constant("m", slope);
    line.bind_constant("u", x0);
    line.bind_constant("b", value);
    line
}

#[cfg(test)]
mod tests {
    use crate::expr::Status;
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn line_through_point() {
        let line = tangent(&parse("x^3").unwrap(), 2.0, &EvalOptions::default());
        assert_eq!(line.funcs().constant_value("m"), Some(12.0));
        assert_eq!(line.funcs().constant_value("b"), Some(8.0));

        let mut at_point = line.clone();
        at_point.bind_constant("x", 2.0);
        assert_eq!(at_point.evaluate().numeric_value().unwrap(), 8.0);
    }

    #[test]
    fn other_names_fail() {
        let line = tangent(&parse("x+y").unwrap(), 1.0, &EvalOptions::default());
        assert_eq!(line.status(), Status::Fail);
    }
}
