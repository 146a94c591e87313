//! Evaluation engine for `termcalc` expressions.
//!
//! An [`Expression`] is a sequence of [`Token`]s produced by [`parse`]. Evaluating it rewrites
//! the sequence in place until a single number remains, or, if some names have no value, until a
//! simplified symbolic form remains:
//!
//! ```
//! use termcalc_compute::parse;
//!
//! let mut expr = parse("3x^2 + 2x").unwrap();
//! assert_eq!(expr.clone().evaluate().human_readable(false), "3*x^2+2*x");
//!
//! expr.bind_constant("x", 2.0);
//! assert_eq!(expr.evaluate().numeric_value().unwrap(), 16.0);
//! ```
//!
//! # Features
//!
//! - `serde`: Derives [`Serialize`] and [`Deserialize`] for [`Token`], [`Status`] and
//!   [`EvalOptions`].
//!
//! [`Token`]: termcalc_parser::token::Token
//! [`Status`]: expr::Status
//! [`EvalOptions`]: numerical::options::EvalOptions
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html

pub mod expr;
pub mod funcs;
pub mod numerical;
pub mod symbolic;

pub use expr::{Expression, Status};
pub use numerical::{
    ctxt::Funcs,
    error::{EvalError, EvalErrorKind},
    options::{EvalOptions, EvalOptionsBuilder},
};

use termcalc_error::Error;

/// Parses the given text into an unevaluated [`Expression`] with the default functions and
/// constants.
pub fn parse(input: &str) -> Result<Expression, Error> {
    termcalc_parser::parse_tokens(input).map(Expression::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_unevaluated() {
        let expr = parse("1 + 2").unwrap();
        assert_eq!(expr.status(), Status::NotEvaluated);
        assert_eq!(expr.len(), 3);
    }

    #[test]
    fn parse_error() {
        let err = parse("2 * 1.2.3").unwrap_err();
        assert_eq!(err.spans, vec![4..9]);
    }
}
