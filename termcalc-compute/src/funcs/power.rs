//! Power and root functions.

build_unary! {
    "sqrt" Sqrt; f64::sqrt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt() {
        assert_eq!(Sqrt::eval_static(16.0), 4.0);
        assert!(Sqrt::eval_static(-1.0).is_nan());
    }
}
