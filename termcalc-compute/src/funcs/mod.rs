//! All built-in functions.
//!
//! Each function is implemented as a unit `struct` with an associated `eval_static` method, which
//! can be used to evaluate the function directly from Rust code. Each one also implements the
//! [`Builtin`] trait, so that it can be registered by name and applied to the tokens of an
//! expression at runtime.
//!
//! # Example
//!
//! ```
//! use termcalc_compute::funcs::{trigonometry::Sin, Builtin};
//!
//! let result = Sin::eval_static(std::f64::consts::FRAC_PI_2);
//! assert_eq!(result, 1.0);
//! assert_eq!(Sin.eval(&[0.0]), 0.0);
//! ```

#[macro_use]
mod helper;

pub mod miscellaneous;
pub mod power;
pub mod trigonometry;

use std::{collections::HashMap, fmt::Debug, sync::Arc};

/// A trait implemented by all builtin functions.
pub trait Builtin: Debug + Send + Sync {
    /// Returns the name of the function.
    // NOTE: this is a `&self` method and not an associated constant to make the trait object-safe
    fn name(&self) -> &'static str;

    /// The number of numeric arguments the function takes.
    fn arity(&self) -> usize;

    /// Evaluates the function. `args` always holds exactly [`Builtin::arity`] values.
    fn eval(&self, args: &[f64]) -> f64;
}

/// Returns a list of all builtin functions.
pub fn all() -> HashMap<&'static str, Arc<dyn Builtin>> {
    use miscellaneous::*;
    use power::*;
    use trigonometry::*;

    macro_rules! build {
        ($($upname:ident),* $(,)?) => {
            [
                $(
                    ($upname.name(), Arc::new($upname) as Arc<dyn Builtin>),
                )*
            ]
                .into_iter()
                .collect()
        };
    }

    build! {
        Sin,
        Cos,
        Tan,
        Sqrt,
        Add,
    }
}

/// Returns the builtin constants, which are functions that take no arguments.
pub fn constants() -> HashMap<&'static str, f64> {
    HashMap::from([
        ("pi", std::f64::consts::PI),
        ("e", std::f64::consts::E),
    ])
}
