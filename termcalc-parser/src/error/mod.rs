pub mod kind;

pub use termcalc_error::Error;
