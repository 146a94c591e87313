#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default maximum nesting depth of an evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Options that control how an [`Expression`] is evaluated.
///
/// [`Expression`]: crate::expr::Expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalOptions {
    /// The maximum nesting depth of sub-evaluations.
    ///
    /// Every parenthesized span is evaluated one level deeper than the span enclosing it. An
    /// evaluation that is entered deeper than this fails with
    /// [`MaximumDepthReached`](crate::numerical::error::kind::MaximumDepthReached). This is also
    /// the only bound on parenthesis rewriting that does not converge.
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl EvalOptions {
    /// Wraps the given [`EvalOptions`] into a builder for further customization.
    pub fn into_builder(self) -> EvalOptionsBuilder {
        EvalOptionsBuilder(self)
    }
}

/// Helper struct to build an [`EvalOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptionsBuilder(EvalOptions);

impl EvalOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth. See [`EvalOptions::max_depth`] for more information.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.0.max_depth = max_depth;
        self
    }

    /// Builds the [`EvalOptions`] struct.
    pub fn build(self) -> EvalOptions {
        self.0
    }
}
