use crate::funcs::{self, Builtin};
use levenshtein::levenshtein;
use once_cell::sync::Lazy;
use std::{collections::HashMap, sync::Arc};
use super::error::{kind::TooLittleArgumentsProvidedForFunction, EvalError};
use termcalc_parser::token::Token;
use tracing::debug;

/// The functions and constants every new [`Funcs`] table starts with.
static DEFAULT_FUNCS: Lazy<HashMap<String, Func>> = Lazy::new(|| {
    funcs::all()
        .into_iter()
        .map(|(name, func)| (name.to_string(), Func::Builtin(func)))
        .chain(
            funcs::constants()
                .into_iter()
                .map(|(name, value)| (name.to_string(), Func::Constant(value))),
        )
        .collect()
});

/// A rule registered under a name.
#[derive(Debug, Clone)]
pub enum Func {
    /// A builtin function.
    Builtin(Arc<dyn Builtin>),

    /// A constant, which is a function that takes no arguments and rewrites its occurrence to a
    /// single number.
    Constant(f64),
}

impl Func {
    /// Returns the number of arguments the rule consumes.
    pub fn arity(&self) -> usize {
        match self {
            Func::Builtin(builtin) => builtin.arity(),
            Func::Constant(_) => 0,
        }
    }
}

/// The outcome of applying a function to the tokens of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Application {
    /// The function and its arguments were replaced with the result.
    Applied,

    /// At least one argument is symbolic, so the function was left in place.
    Deferred,
}

/// The function table of an [`Expression`].
///
/// Every expression owns its own table. Cloning an expression clones the table, so constants
/// bound on one expression are never visible to another.
///
/// [`Expression`]: crate::expr::Expression
#[derive(Debug, Clone)]
pub struct Funcs {
    funcs: HashMap<String, Func>,
}

impl Default for Funcs {
    fn default() -> Self {
        Self {
            funcs: DEFAULT_FUNCS.clone(),
        }
    }
}

impl Funcs {
    /// Creates a new empty table.
    ///
    /// The empty table is probably not very useful, as it does not contain any functions or
    /// constants. Consider using the [`Default`] implementation instead.
    pub fn new() -> Self {
        Self { funcs: HashMap::new() }
    }

    /// Registers a builtin function under its own name, replacing any existing entry.
    pub fn add_builtin(&mut self, builtin: Arc<dyn Builtin>) {
        self.funcs.insert(builtin.name().to_string(), Func::Builtin(builtin));
    }

    /// Binds a constant to the given name. An existing entry under the same name is replaced.
    pub fn bind_constant(&mut self, name: &str, value: f64) {
        self.funcs.insert(name.to_string(), Func::Constant(value));
    }

    /// Returns the rule registered under the given name.
    pub fn get(&self, name: &str) -> Option<&Func> {
        self.funcs.get(name)
    }

    /// Returns true if a rule is registered under `name` and its arity does not exceed
    /// `max_arity`.
    pub fn contains(&self, name: &str, max_arity: usize) -> bool {
        self.funcs
            .get(name)
            .map(|func| func.arity() <= max_arity)
            .unwrap_or(false)
    }

    /// Returns the value of the constant bound to the given name.
    pub fn constant_value(&self, name: &str) -> Option<f64> {
        match self.funcs.get(name) {
            Some(Func::Constant(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns all registered names with a name similar to the given name, in alphabetical
    /// order.
    pub fn similar(&self, name: &str) -> Vec<&str> {
        let mut similar = self.funcs
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .map(|n| n.as_str())
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar
    }

    /// Returns the registered names, in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.funcs.keys().map(|n| n.as_str()).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Applies the rule registered for the name at `tokens[index]`.
    ///
    /// The `arity` tokens directly after the name are its arguments. If they are all numbers, the
    /// name and its arguments are replaced with a single number. If an argument is a name or a
    /// parenthesized group, it cannot be evaluated yet and the function is deferred.
    pub(crate) fn apply(
        &self,
        tokens: &mut Vec<Token>,
        index: usize,
    ) -> Result<Application, EvalError> {
        let Some(name) = tokens.get(index).and_then(Token::name) else {
            return Ok(Application::Deferred);
        };
        let Some(func) = self.funcs.get(name) else {
            return Ok(Application::Deferred);
        };

        let builtin = match func {
            Func::Constant(value) => {
                debug!(name, value, "substituted constant");
                tokens[index] = Token::Number(*value);
                return Ok(Application::Applied);
            },
            Func::Builtin(builtin) => builtin,
        };

        let arity = builtin.arity();
        let mut args = Vec::with_capacity(arity);
        for offset in 1..=arity {
            match tokens.get(index + offset) {
                Some(Token::Number(n)) => args.push(*n),
                Some(Token::Function(_) | Token::Variable(_) | Token::ParenOpen) => {
                    debug!(name, "deferred function with symbolic argument");
                    return Ok(Application::Deferred);
                },
                _ => {
                    return Err(EvalError::new(TooLittleArgumentsProvidedForFunction {
                        name: name.to_string(),
                        expected: arity,
                        given: args.len(),
                    }, vec![index]));
                },
            }
        }

        let value = builtin.eval(&args);
        debug!(name, ?args, value, "applied function");
        tokens.splice(index..=index + arity, [Token::Number(value)]);
        Ok(Application::Applied)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn contains_respects_arity() {
        let funcs = Funcs::default();
        assert!(funcs.contains("pi", 0));
        assert!(!funcs.contains("sin", 0));
        assert!(funcs.contains("sin", usize::MAX));
        assert!(funcs.contains("add", 2));
        assert!(!funcs.contains("x", usize::MAX));
    }

    #[test]
    fn last_binding_wins() {
        let mut funcs = Funcs::default();
        funcs.bind_constant("x", 1.0);
        funcs.bind_constant("x", 4.0);
        assert_eq!(funcs.constant_value("x"), Some(4.0));
    }

    #[test]
    fn empty_table() {
        let funcs = Funcs::new();
        assert!(funcs.names().is_empty());
        assert!(!funcs.contains("sin", usize::MAX));
    }

    #[test]
    fn similar_names() {
        let funcs = Funcs::default();
        assert_eq!(funcs.similar("son"), vec!["sin"]);
        assert_eq!(funcs.similar("co"), vec!["cos"]);
    }

    #[test]
    fn apply_two_arguments() {
        let funcs = Funcs::default();
        let mut tokens = vec![
            Token::Number(2.0),
            Token::function("add"),
            Token::Number(1.0),
            Token::Number(5.0),
        ];
        assert_eq!(funcs.apply(&mut tokens, 1).unwrap(), Application::Applied);
        assert_eq!(tokens, vec![Token::Number(2.0), Token::Number(6.0)]);
    }

    #[test]
    fn apply_symbolic_argument() {
        let funcs = Funcs::default();
        let mut tokens = vec![Token::function("sin"), Token::function("x")];
        assert_eq!(funcs.apply(&mut tokens, 0).unwrap(), Application::Deferred);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn apply_missing_argument() {
        let funcs = Funcs::default();
        let mut tokens = vec![Token::function("add"), Token::Number(1.0), Token::Add];
        let err = funcs.apply(&mut tokens, 0).unwrap_err();
        assert_eq!(err.indices, vec![0]);
        assert_eq!(err.message(), "function 'add' needs 2 argument(s) but 1 were given");
    }
}
