use crate::expr::Expression;
use crate::numerical::error::{
    kind::{OperationNeedsNumber, OperatorAtEndOfExpression, Side},
    EvalError,
};
use super::paren::find_pair;
use termcalc_parser::token::{BinOpKind, Token};
use tracing::trace;

/// Computes `a op b`.
///
/// Division by zero and negative powers of zero produce `NaN` instead of failing. A `NaN`
/// operand always produces `NaN`.
pub(crate) fn eval_operands(op: BinOpKind, a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }

    match op {
        BinOpKind::Add => a + b,
        BinOpKind::Sub => a - b,
        BinOpKind::Mul => a * b,
        BinOpKind::Div => {
            if b == 0.0 {
                f64::NAN
            } else {
                a / b
            }
        },
        BinOpKind::Exp => {
            if b < 0.0 && a == 0.0 {
                f64::NAN
            } else {
                a.powf(b)
            }
        },
    }
}

/// An operand of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Operand {
    Number(f64),

    /// A name or a parenthesized group, which cannot be folded.
    Symbolic,
}

impl Operand {
    /// Classifies the token on the left of an operator.
    fn left(token: &Token) -> Option<Self> {
        match token {
            Token::Number(n) => Some(Operand::Number(*n)),
            Token::Function(_) | Token::Variable(_) | Token::ParenClose => Some(Operand::Symbolic),
            _ => None,
        }
    }

    /// Classifies the token on the right of an operator.
    fn right(token: &Token) -> Option<Self> {
        match token {
            Token::Number(n) => Some(Operand::Number(*n)),
            Token::Function(_) | Token::Variable(_) | Token::ParenOpen => Some(Operand::Symbolic),
            _ => None,
        }
    }
}

impl Expression {
    /// Folds every operator in `ops`, left to right. Parenthesized groups are stepped over.
    pub(crate) fn fold(&mut self, ops: &[BinOpKind]) {
        let mut i = 0;
        while i < self.tokens.len() && self.is_evaluating() {
            // groups were reduced when their parentheses were resolved
            if self.tokens[i] == Token::ParenOpen {
                i = find_pair(&self.tokens, i).map(|(_, close)| close + 1).unwrap_or(i + 1);
                continue;
            }

            let Some(op) = self.tokens[i].bin_op().filter(|op| ops.contains(op)) else {
                i += 1;
                continue;
            };

            match self.fold_at(i, op) {
                Ok(true) => i -= self.retreat,
                Ok(false) => i += 1,
                Err(error) => self.fail(error),
            }
        }
    }

    /// Folds the operator at index `i` into a single number, if both of its operands are
    /// numbers. Returns true if the sequence changed, in which case `self.retreat` holds the
    /// number of positions the result moved to the left.
    fn fold_at(&mut self, i: usize, op: BinOpKind) -> Result<bool, EvalError> {
        let leading = i == 0 || matches!(self.tokens[i - 1], Token::ParenOpen | Token::Separator);

        let Some(right_token) = self.tokens.get(i + 1) else {
            return Err(EvalError::new(OperatorAtEndOfExpression { op }, vec![i]));
        };
        let right = Operand::right(right_token)
            .ok_or_else(|| EvalError::new(OperationNeedsNumber { op, side: Side::Right }, vec![i, i + 1]))?;
        let left = if leading {
            Operand::Number(0.0)
        } else {
            Operand::left(&self.tokens[i - 1])
                .ok_or_else(|| EvalError::new(OperationNeedsNumber { op, side: Side::Left }, vec![i - 1, i]))?
        };

        if self.is_bound(i, op, leading) {
            return Ok(false);
        }

        let value = match (left, right) {
            (Operand::Number(a), Operand::Number(b)) => eval_operands(op, a, b),
            (Operand::Number(n), Operand::Symbolic)
                if op == BinOpKind::Mul && n == 0.0 && !leading
                    && matches!(self.tokens[i + 1], Token::Variable(_)) => 0.0,
            (Operand::Symbolic, Operand::Number(n))
                if op == BinOpKind::Mul && n == 0.0
                    && matches!(self.tokens[i - 1], Token::Variable(_)) => 0.0,
            _ => return Ok(false),
        };

        let start = if leading { i } else { i - 1 };
        trace!(?op, ?left, ?right, value, "folded");
        self.tokens.splice(start..=i + 1, [Token::Number(value)]);
        self.retreat = i - start;
        Ok(true)
    }

    /// Returns true if an operand of the operator at `i` belongs to a neighboring operator that
    /// has not been folded yet.
    ///
    /// The left operand is bound to a preceding operator of higher precedence, or of the same
    /// precedence if that operator does not regroup (`-`, `/`, `^`). The right operand is bound
    /// to a following operator of higher precedence.
    fn is_bound(&self, i: usize, op: BinOpKind, leading: bool) -> bool {
        let precedence = op.precedence();
        let left_bound = !leading && i >= 2 && self.tokens[i - 2]
            .bin_op()
            .map(|prev| {
                prev.precedence() > precedence
                    || (prev.precedence() == precedence && !prev.regroups())
            })
            .unwrap_or(false);
        let right_bound = self.tokens
            .get(i + 2)
            .and_then(Token::bin_op)
            .map(|next| next.precedence() > precedence)
            .unwrap_or(false);
        left_bound || right_bound
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::Status;
    use crate::numerical::error::EvalErrorKind;
    use pretty_assertions::assert_eq;
    use super::*;

    fn evaluating(tokens: Vec<Token>) -> Expression {
        let mut expr = Expression::new(tokens);
        expr.status = Status::Evaluating;
        expr
    }

    #[test]
    fn undefined_results() {
        assert!(eval_operands(BinOpKind::Div, 5.0, 0.0).is_nan());
        assert!(eval_operands(BinOpKind::Exp, 0.0, -1.0).is_nan());
        assert!(eval_operands(BinOpKind::Add, f64::NAN, 1.0).is_nan());
        assert_eq!(eval_operands(BinOpKind::Exp, 0.0, 0.0), 1.0);
        assert_eq!(eval_operands(BinOpKind::Exp, 2.0, -1.0), 0.5);
    }

    #[test]
    fn left_to_right() {
        let mut expr = evaluating(vec![
            Token::Number(8.0),
            Token::Divide,
            Token::Number(2.0),
            Token::Divide,
            Token::Number(2.0),
        ]);
        expr.fold(&[BinOpKind::Mul, BinOpKind::Div]);
        assert_eq!(expr.tokens(), &[Token::Number(2.0)]);
    }

    #[test]
    fn leading_operator() {
        let mut expr = evaluating(vec![Token::Subtract, Token::Number(3.0)]);
        expr.fold(&[BinOpKind::Add, BinOpKind::Sub]);
        assert_eq!(expr.tokens(), &[Token::Number(-3.0)]);
    }

    #[test]
    fn symbolic_operand_is_kept() {
        let x = Token::Variable("x".to_string());
        let mut expr = evaluating(vec![
            x.clone(),
            Token::Subtract,
            Token::Number(2.0),
            Token::Add,
            Token::Number(3.0),
        ]);
        expr.fold(&[BinOpKind::Add, BinOpKind::Sub]);
        assert_eq!(expr.status(), Status::Evaluating);
        assert_eq!(expr.len(), 5);
    }

    #[test]
    fn regrouping_operand_is_folded() {
        let x = Token::Variable("x".to_string());
        let mut expr = evaluating(vec![
            x.clone(),
            Token::Add,
            Token::Number(2.0),
            Token::Add,
            Token::Number(3.0),
        ]);
        expr.fold(&[BinOpKind::Add, BinOpKind::Sub]);
        assert_eq!(expr.tokens(), &[x, Token::Add, Token::Number(5.0)]);
    }

    #[test]
    fn group_is_stepped_over() {
        let mut expr = evaluating(vec![
            Token::Number(2.0),
            Token::Multiply,
            Token::ParenOpen,
            Token::Number(3.0),
            Token::Add,
            Token::Number(1.0),
            Token::ParenClose,
        ]);
        expr.fold(&[BinOpKind::Add, BinOpKind::Sub]);
        assert_eq!(expr.status(), Status::Evaluating);
        assert_eq!(expr.len(), 7);
    }

    #[test]
    fn zero_times_variable() {
        let mut expr = evaluating(vec![
            Token::Number(0.0),
            Token::Multiply,
            Token::Variable("x".to_string()),
        ]);
        expr.fold(&[BinOpKind::Mul]);
        assert_eq!(expr.tokens(), &[Token::Number(0.0)]);
    }

    #[test]
    fn operator_at_end() {
        let mut expr = evaluating(vec![Token::Number(1.0), Token::Add]);
        expr.fold(&[BinOpKind::Add]);
        assert_eq!(expr.status(), Status::Fail);
        assert_eq!(expr.error().unwrap().indices, vec![1]);
    }

    #[test]
    fn operator_needs_number() {
        let mut expr = evaluating(vec![Token::Number(1.0), Token::Multiply, Token::Divide, Token::Number(2.0)]);
        expr.fold(&[BinOpKind::Mul, BinOpKind::Div]);
        assert_eq!(expr.status(), Status::Fail);
        let error = expr.error().unwrap();
        assert_eq!(error.indices, vec![1, 2]);
        assert_eq!(
            error.kind,
            EvalErrorKind::from(OperationNeedsNumber { op: BinOpKind::Mul, side: Side::Right }),
        );
    }
}
