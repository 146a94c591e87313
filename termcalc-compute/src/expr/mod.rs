//! The [`Expression`] type: a token sequence together with its evaluation state.

mod fmt;

use crate::numerical::{
    ctxt::Funcs,
    error::{kind::{NoDefiniteAnswer, NoNumericResult}, EvalError},
};
use termcalc_parser::token::Token;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The evaluation state of an [`Expression`].
///
/// Transitions are monotonic: `NotEvaluated -> Evaluating -> Success | Fail`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    #[default]
    NotEvaluated,
    Evaluating,
    Success,
    Fail,
}

impl Status {
    /// Returns true if the status is [`Status::Success`] or [`Status::Fail`].
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Success | Status::Fail)
    }
}

/// The most recently resolved parenthesis pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParenSearch {
    /// Index of the opening parenthesis of the pair.
    pub open: usize,

    /// Index of the closing parenthesis of the pair, before it was replaced.
    pub close: usize,

    /// Index at which the search for the next pair starts.
    pub resume: usize,
}

/// An ordered sequence of tokens, along with the state of its evaluation and the functions and
/// constants available to it.
///
/// Cloning an expression deep-copies its tokens and its function table; constants bound on the
/// clone are not visible to the original.
#[derive(Debug, Clone)]
pub struct Expression {
    pub(crate) tokens: Vec<Token>,
    pub(crate) depth: usize,
    pub(crate) status: Status,
    pub(crate) error: Option<EvalError>,
    pub(crate) funcs: Funcs,

    /// Cursor of the parenthesis search, recomputed on each reduction.
    pub(crate) paren_search: Option<ParenSearch>,

    /// How many steps the folding loop should rewind after the last fold.
    pub(crate) retreat: usize,
}

impl Expression {
    /// Creates a new, unevaluated expression from the given tokens, with the default functions
    /// and constants.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_funcs(tokens, Funcs::default())
    }

    /// Creates a new, unevaluated expression using the given function table.
    pub fn with_funcs(tokens: Vec<Token>, funcs: Funcs) -> Self {
        Self {
            tokens,
            depth: 0,
            status: Status::NotEvaluated,
            error: None,
            funcs,
            paren_search: None,
            retreat: 0,
        }
    }

    /// Creates an empty expression.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a failed expression with the given error, keeping the function table of `self`.
    pub fn failed(&self, error: EvalError) -> Self {
        Self {
            tokens: self.tokens.clone(),
            depth: self.depth,
            status: Status::Fail,
            error: Some(error),
            funcs: self.funcs.clone(),
            paren_search: None,
            retreat: 0,
        }
    }

    /// Returns a copy of this expression that has not been evaluated yet. The tokens and the
    /// bindings are kept, so the copy can be bound to different values and evaluated again.
    pub fn unevaluated(&self) -> Self {
        Self::with_funcs(self.tokens.clone(), self.funcs.clone())
    }

    /// Creates an expression for a span of this expression, evaluated one level deeper. The
    /// function table is cloned.
    pub(crate) fn sub_expression(&self, tokens: Vec<Token>) -> Self {
        let mut sub = Self::with_funcs(tokens, self.funcs.clone());
        sub.depth = self.depth + 1;
        sub
    }

    /// Marks the expression as failed with the given error. Does nothing if the expression is
    /// already in a terminal state.
    pub(crate) fn fail(&mut self, error: EvalError) {
        if self.status.is_terminal() {
            return;
        }
        self.status = Status::Fail;
        self.error = Some(error);
    }

    /// Returns true while the reduction passes should keep running.
    pub(crate) fn is_evaluating(&self) -> bool {
        self.status == Status::Evaluating
    }

    /// Returns the tokens of the expression.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the number of tokens in the expression.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the expression has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the nesting depth of the expression. The top level has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the evaluation status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the failure detail, if evaluation failed.
    pub fn error(&self) -> Option<&EvalError> {
        self.error.as_ref()
    }

    /// Returns the function table of the expression.
    pub fn funcs(&self) -> &Funcs {
        &self.funcs
    }

    /// Returns a mutable reference to the function table of the expression.
    pub fn funcs_mut(&mut self) -> &mut Funcs {
        &mut self.funcs
    }

    /// Binds a constant for this expression. Every occurrence of `name` is replaced with `value`
    /// when the expression is evaluated.
    pub fn bind_constant(&mut self, name: &str, value: f64) {
        self.funcs.bind_constant(name, value);
    }

    /// Returns the distinct names in the expression that have no function or constant
    /// registered, in order of first occurrence.
    pub fn unassigned_functions(&self) -> Vec<String> {
        let mut names = Vec::<String>::new();
        for name in self.tokens.iter().filter_map(Token::name) {
            if !self.funcs.contains(name, usize::MAX) && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Returns the numeric result of an evaluated expression.
    ///
    /// Fails with the stored error if evaluation failed, with [`NoDefiniteAnswer`] if more than
    /// one token remains, and with [`NoNumericResult`] if no number remains.
    pub fn numeric_value(&self) -> Result<f64, EvalError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        match self.tokens.as_slice() {
            [Token::Number(n)] => Ok(*n),
            [] => Err(EvalError::new(NoNumericResult, Vec::new())),
            [_] => Err(EvalError::new(NoNumericResult, vec![0])),
            tokens => Err(EvalError::new(
                NoDefiniteAnswer { tokens: tokens.len() },
                (0..tokens.len()).collect(),
            )),
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
            && self.status == other.status
            && self.error == other.error
            && self.depth == other.depth
    }
}

impl From<Vec<Token>> for Expression {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
