use ariadne::{Fmt, Report};
use termcalc_error::{report, ErrorKind, EXPR};
use std::ops::Range;

/// A numeric lexeme could not be read as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidNumber {
    /// The text of the lexeme.
    pub lexeme: String,
}

impl ErrorKind for InvalidNumber {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            format!("`{}` is not a valid number", self.lexeme),
            &["this number".to_string()],
            Some(format!(
                "numbers are digits with at most one decimal point, like {}",
                "3.14".fg(EXPR),
            )),
        )
    }
}
