//! Functions that do not fit in any other category.

use super::Builtin;

/// Sums its two arguments.
///
/// This is the shape any multi-argument function takes: the arguments are read from the tokens to
/// the right of the function name, after their separators are removed.
#[derive(Debug)]
pub struct Add;

impl Add {
    pub fn eval_static(a: f64, b: f64) -> f64 {
        a + b
    }
}

impl Builtin for Add {
    fn name(&self) -> &'static str {
        "add"
    }

    fn arity(&self) -> usize {
        2
    }

    fn eval(&self, args: &[f64]) -> f64 {
        Self::eval_static(args[0], args[1])
    }
}
