pub mod kind;

use ariadne::Report;
use kind::*;
use std::{fmt::{self, Display, Formatter}, ops::Range};
use termcalc_error::{Error, ErrorKind};

/// The kinds of structural failure that can occur while evaluating an [`Expression`].
///
/// [`Expression`]: crate::expr::Expression
#[derive(Debug, Clone, PartialEq)]
pub enum EvalErrorKind {
    ClosingParenthesisWithoutOpeningParenthesis(ClosingParenthesisWithoutOpeningParenthesis),
    OpeningParenthesisWithoutClosingParenthesis(OpeningParenthesisWithoutClosingParenthesis),
    TooLittleArgumentsProvidedForFunction(TooLittleArgumentsProvidedForFunction),
    OperatorAtEndOfExpression(OperatorAtEndOfExpression),
    OperationNeedsNumber(OperationNeedsNumber),
    MaximumDepthReached(MaximumDepthReached),
    NoNumericResult(NoNumericResult),
    NoDefiniteAnswer(NoDefiniteAnswer),
    MultiplyOutNeedsTwoGroups(MultiplyOutNeedsTwoGroups),
    TokensOutsideOfGroups(TokensOutsideOfGroups),
}

/// Calls the given method on whichever kind is stored in the enum.
macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            EvalErrorKind::ClosingParenthesisWithoutOpeningParenthesis($inner) => $body,
            EvalErrorKind::OpeningParenthesisWithoutClosingParenthesis($inner) => $body,
            EvalErrorKind::TooLittleArgumentsProvidedForFunction($inner) => $body,
            EvalErrorKind::OperatorAtEndOfExpression($inner) => $body,
            EvalErrorKind::OperationNeedsNumber($inner) => $body,
            EvalErrorKind::MaximumDepthReached($inner) => $body,
            EvalErrorKind::NoNumericResult($inner) => $body,
            EvalErrorKind::NoDefiniteAnswer($inner) => $body,
            EvalErrorKind::MultiplyOutNeedsTwoGroups($inner) => $body,
            EvalErrorKind::TokensOutsideOfGroups($inner) => $body,
        }
    };
}

macro_rules! impl_from {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for EvalErrorKind {
                fn from(kind: $kind) -> Self {
                    EvalErrorKind::$kind(kind)
                }
            }
        )*
    };
}

impl_from! {
    ClosingParenthesisWithoutOpeningParenthesis,
    OpeningParenthesisWithoutClosingParenthesis,
    TooLittleArgumentsProvidedForFunction,
    OperatorAtEndOfExpression,
    OperationNeedsNumber,
    MaximumDepthReached,
    NoNumericResult,
    NoDefiniteAnswer,
    MultiplyOutNeedsTwoGroups,
    TokensOutsideOfGroups,
}

impl Display for EvalErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        dispatch!(self, kind => kind.fmt(f))
    }
}

impl ErrorKind for EvalErrorKind {
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        dispatch!(self, kind => kind.build_report(src_id, spans))
    }
}

/// The failure detail attached to a failed [`Expression`].
///
/// `indices` are positions in the token sequence of the expression at the time it failed, and
/// are used to highlight the implicated tokens.
///
/// [`Expression`]: crate::expr::Expression
#[derive(Debug, Clone, PartialEq)]
pub struct EvalError {
    /// The kind of failure.
    pub kind: EvalErrorKind,

    /// The indices of the tokens implicated in the failure.
    pub indices: Vec<usize>,
}

impl EvalError {
    /// Creates a new error with the given kind and implicated token indices.
    pub fn new(kind: impl Into<EvalErrorKind>, indices: Vec<usize>) -> Self {
        Self { kind: kind.into(), indices }
    }

    /// Returns the user-facing message of this error.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Shifts every implicated index by `by`. Used to translate indices of a sub-span into
    /// indices of the enclosing sequence.
    pub fn offset(mut self, by: usize) -> Self {
        for index in self.indices.iter_mut() {
            *index += by;
        }
        self
    }

    /// Converts this error into a reportable [`Error`], using `spans[i]` as the character range
    /// of token `i`. Indices without a span are dropped.
    pub fn into_error(self, spans: &[Range<usize>]) -> Error {
        let ranges = self.indices
            .iter()
            .filter_map(|&i| spans.get(i).cloned())
            .collect();
        Error::new(ranges, self.kind)
    }
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn offset_indices() {
        let err = EvalError::new(OpeningParenthesisWithoutClosingParenthesis, vec![0, 2]).offset(3);
        assert_eq!(err.indices, vec![3, 5]);
    }

    #[test]
    fn message_names_function() {
        let err = EvalError::new(TooLittleArgumentsProvidedForFunction {
            name: "sin".to_string(),
            expected: 1,
            given: 0,
        }, vec![0]);
        assert_eq!(err.message(), "function 'sin' needs 1 argument(s) but 0 were given");
    }

    #[test]
    fn spans_from_indices() {
        let err = EvalError::new(MaximumDepthReached { max_depth: 2 }, vec![1, 7]);
        let error = err.into_error(&[0..1, 2..3]);
        assert_eq!(error.spans, vec![2..3]);
    }
}
