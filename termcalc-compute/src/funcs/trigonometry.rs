//! Trigonometric functions. All angles are in radians.

build_unary! {
    "sin" Sin; f64::sin,
    "cos" Cos; f64::cos,
    "tan" Tan; f64::tan,
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use crate::funcs::Builtin;
    use super::*;

    #[test]
    fn evaluate() {
        assert_float_absolute_eq!(Sin::eval_static(std::f64::consts::FRAC_PI_2), 1.0);
        assert_float_absolute_eq!(Cos.eval(&[0.0]), 1.0);
        assert_float_absolute_eq!(Tan.eval(&[std::f64::consts::FRAC_PI_4]), 1.0);
        assert_eq!(Sin.name(), "sin");
        assert_eq!(Sin.arity(), 1);
    }
}
