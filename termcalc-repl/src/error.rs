use ariadne::Source;
use std::{fmt::{self, Display, Formatter}, io::{self, Write}};
use termcalc_compute::Expression;
use termcalc_error::Error as ParseError;

/// Utility enum to package errors that can occur while running a shell command.
#[derive(Debug)]
pub enum Error {
    /// Text given to the shell could not be parsed.
    Parse {
        /// The text that failed to parse.
        input: String,

        /// The error from the parser.
        error: ParseError,
    },

    /// An expression failed to evaluate. The expression holds the error and the tokens it
    /// implicates.
    Eval(Expression),

    /// A problem with the command itself, such as a missing argument.
    Command(String),
}

impl Error {
    /// Creates a [`Error::Command`] with the given message.
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command(message.into())
    }

    /// Writes the error to the given writer. Parse and evaluation errors are written as
    /// [`ariadne`] reports highlighting the offending text.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            Self::Parse { input, error } => error
                .build_report("input")
                .write(("input", Source::from(input)), out),
            Self::Eval(expr) => match expr.error() {
                Some(err) => {
                    let (text, spans) = expr.token_spans();
                    err.clone()
                        .into_error(&spans)
                        .build_report("expression")
                        .write(("expression", Source::from(text)), out)
                },
                None => writeln!(out, "{}", self),
            },
            Self::Command(message) => writeln!(out, "{}", message),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::command(format!("could not write output: {}", err))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { input, .. } => write!(f, "could not parse `{}`", input),
            Self::Eval(expr) => match expr.error() {
                Some(err) => write!(f, "{}", err),
                None => write!(f, "could not evaluate `{}`", expr),
            },
            Self::Command(message) => write!(f, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(err: &Error) -> String {
        let mut buf = Vec::new();
        err.write_to(&mut buf).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn parse_report() {
        let input = "2 * 1.2.3".to_string();
        let error = termcalc_compute::parse(&input).unwrap_err();
        let out = written(&Error::Parse { input, error });
        assert!(out.contains("2 * 1.2.3"), "{}", out);
    }

    #[test]
    fn eval_report_highlights_expression() {
        let failed = termcalc_compute::parse("(1+2").unwrap().evaluate();
        let message = failed.error().unwrap().message();
        let out = written(&Error::Eval(failed));
        assert!(out.contains(&message), "{}", out);
        assert!(out.contains("(1+2"), "{}", out);
    }

    #[test]
    fn command_message() {
        assert_eq!(written(&Error::command("No id provided")), "No id provided\n");
    }
}
