use ariadne::{Fmt, Report};
use termcalc_error::{report, ErrorKind, EXPR};
use termcalc_parser::token::BinOpKind;
use std::{fmt::{self, Display, Formatter}, ops::Range};

/// Returns the symbol of the given operator, for use in messages.
fn symbol(op: BinOpKind) -> String {
    op.token().to_string()
}

/// A closing parenthesis appeared before any matching opening parenthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosingParenthesisWithoutOpeningParenthesis;

impl Display for ClosingParenthesisWithoutOpeningParenthesis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "closing parenthesis without an opening parenthesis")
    }
}

impl ErrorKind for ClosingParenthesisWithoutOpeningParenthesis {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self,
            &["this parenthesis is not opened".to_string()],
            Some("add an opening parenthesis `(` somewhere before this".to_string()),
        )
    }
}

/// An opening parenthesis was never closed.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningParenthesisWithoutClosingParenthesis;

impl Display for OpeningParenthesisWithoutClosingParenthesis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "opening parenthesis without a closing parenthesis")
    }
}

impl ErrorKind for OpeningParenthesisWithoutClosingParenthesis {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self,
            &["this parenthesis is not closed".to_string()],
            Some("add a closing parenthesis `)` somewhere after this".to_string()),
        )
    }
}

/// A function was not followed by enough arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct TooLittleArgumentsProvidedForFunction {
    /// The name of the function.
    pub name: String,

    /// The number of arguments the function needs.
    pub expected: usize,

    /// The number of arguments that were found.
    pub given: usize,
}

impl Display for TooLittleArgumentsProvidedForFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "function '{}' needs {} argument(s) but {} were given",
            self.name,
            self.expected,
            self.given,
        )
    }
}

impl ErrorKind for TooLittleArgumentsProvidedForFunction {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self,
            &["this function".to_string()],
            Some(format!(
                "call it with {} argument(s), like {}",
                self.expected,
                format!("{}({})", self.name, vec!["1"; self.expected].join(", ")).fg(EXPR),
            )),
        )
    }
}

/// An operator was the last token of an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorAtEndOfExpression {
    /// The operator.
    pub op: BinOpKind,
}

impl Display for OperatorAtEndOfExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "the `{}` operator is at the end of the expression", symbol(self.op))
    }
}

impl ErrorKind for OperatorAtEndOfExpression {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self,
            &[format!("you might need to add another {} after this", "operand".fg(EXPR))],
            None,
        )
    }
}

/// The side of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// An operator had something other than a number or a name as one of its operands.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationNeedsNumber {
    /// The operator.
    pub op: BinOpKind,

    /// The side on which the operand is missing.
    pub side: Side,
}

impl Display for OperationNeedsNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the `{}` operator needs a number on its {} side; evaluation of that side may have failed",
            symbol(self.op),
            self.side,
        )
    }
}

impl ErrorKind for OperationNeedsNumber {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        let labels = match self.side {
            Side::Left => vec!["this is not a number".to_string(), "this operator".to_string()],
            Side::Right => vec!["this operator".to_string(), "this is not a number".to_string()],
        };
        report(src_id, spans, self, &labels, None)
    }
}

/// The nesting of the expression exceeded the configured maximum depth.
#[derive(Debug, Clone, PartialEq)]
pub struct MaximumDepthReached {
    /// The configured maximum depth.
    pub max_depth: usize,
}

impl Display for MaximumDepthReached {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "maximum evaluation depth of {} reached", self.max_depth)
    }
}

impl ErrorKind for MaximumDepthReached {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self,
            &["while evaluating this".to_string()],
            Some(format!("reduce the nesting of parentheses, or raise the {}", "--max-depth".fg(EXPR))),
        )
    }
}

/// The evaluated expression holds a single token that is not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct NoNumericResult;

impl Display for NoNumericResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "no numeric result was produced")
    }
}

impl ErrorKind for NoNumericResult {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self,
            &["this is not a number".to_string()],
            Some("assign a value to every variable before evaluating".to_string()),
        )
    }
}

/// The evaluated expression holds more than one token.
#[derive(Debug, Clone, PartialEq)]
pub struct NoDefiniteAnswer {
    /// The number of tokens left after evaluation.
    pub tokens: usize,
}

impl Display for NoDefiniteAnswer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "evaluation left {} tokens instead of a single number", self.tokens)
    }
}

impl ErrorKind for NoDefiniteAnswer {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self,
            &[String::new()],
            Some("assign a value to every variable before evaluating".to_string()),
        )
    }
}

/// Multiplying out needs two parenthesized groups, like `(a+b)*(c-d)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplyOutNeedsTwoGroups {
    /// The number of groups that were found.
    pub found: usize,
}

impl Display for MultiplyOutNeedsTwoGroups {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "multiplying out needs two parenthesized groups, but {} were found", self.found)
    }
}

impl ErrorKind for MultiplyOutNeedsTwoGroups {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self,
            &["in this expression".to_string()],
            Some(format!("write the product as {}", "(a+b)*(c-d)".fg(EXPR))),
        )
    }
}

/// Multiplying out only accepts a product of two groups, but other tokens were found next to
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct TokensOutsideOfGroups;

impl Display for TokensOutsideOfGroups {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "multiplying out needs a product of exactly two parenthesized groups")
    }
}

impl ErrorKind for TokensOutsideOfGroups {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self,
            &["this is not part of either group".to_string()],
            Some(format!(
                "move these tokens into a group, or multiply out {} on its own",
                "(a+b)*(c-d)".fg(EXPR),
            )),
        )
    }
}
