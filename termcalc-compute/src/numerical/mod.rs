//! Numerical evaluation of expressions: the function table, the evaluation options, the
//! failures evaluation can produce, and the reduction engine itself.

pub mod ctxt;
pub mod error;
pub mod eval;
pub mod options;
