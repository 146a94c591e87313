//! The token model shared by the tokenizer and the evaluator.

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The atomic, classified unit of an expression.
///
/// A token's tag never changes after creation, with one exception: a [`Token::Function`] whose
/// name has no registered rule is retyped to [`Token::Variable`] during evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Token {
    /// A numeric literal. `NaN` marks an undefined result and propagates through arithmetic.
    Number(f64),
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
    ParenOpen,
    ParenClose,

    /// A name, which is either a known function, a bound constant, or a free variable. Names
    /// stay tagged as functions until the evaluator decides which.
    Function(String),

    /// A name that the evaluator could not resolve.
    Variable(String),

    /// Delimits function arguments.
    Separator,
    Equal,
    Invalid,
}

impl Token {
    /// Creates a [`Token::Function`] with the given name.
    pub fn function(name: impl Into<String>) -> Self {
        Token::Function(name.into())
    }

    /// Returns the value of a [`Token::Number`].
    pub fn number(&self) -> Option<f64> {
        match self {
            Token::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if the token is a [`Token::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }

    /// Returns the name of a [`Token::Function`] or [`Token::Variable`].
    pub fn name(&self) -> Option<&str> {
        match self {
            Token::Function(name) | Token::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the token is a [`Token::Function`] or [`Token::Variable`].
    pub fn is_name(&self) -> bool {
        self.name().is_some()
    }

    /// Returns the binary operation this token represents, if any.
    pub fn bin_op(&self) -> Option<BinOpKind> {
        match self {
            Token::Exponentiate => Some(BinOpKind::Exp),
            Token::Multiply => Some(BinOpKind::Mul),
            Token::Divide => Some(BinOpKind::Div),
            Token::Add => Some(BinOpKind::Add),
            Token::Subtract => Some(BinOpKind::Sub),
            _ => None,
        }
    }

    /// Returns true if the token is a binary operator.
    pub fn is_operator(&self) -> bool {
        self.bin_op().is_some()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Add => write!(f, "+"),
            Token::Subtract => write!(f, "-"),
            Token::Multiply => write!(f, "*"),
            Token::Divide => write!(f, "/"),
            Token::Exponentiate => write!(f, "^"),
            Token::ParenOpen => write!(f, "("),
            Token::ParenClose => write!(f, ")"),
            Token::Function(name) | Token::Variable(name) => write!(f, "{}", name),
            Token::Separator => write!(f, ","),
            Token::Equal => write!(f, "="),
            Token::Invalid => write!(f, "?"),
        }
    }
}

/// The precedence tier of a binary operator. Higher tiers are folded first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Addition and subtraction.
    Term,

    /// Multiplication and division.
    Factor,

    /// Exponentiation.
    Exp,
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns true if `a op (b op' c)` equals `(a op b) op' c` for every operator `op'` in the
    /// same tier. Only addition and multiplication have this property.
    pub fn regroups(&self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }

    /// Returns the token for this operation.
    pub fn token(&self) -> Token {
        match self {
            Self::Exp => Token::Exponentiate,
            Self::Mul => Token::Multiply,
            Self::Div => Token::Divide,
            Self::Add => Token::Add,
            Self::Sub => Token::Subtract,
        }
    }
}
