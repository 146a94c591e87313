use std::{fmt::{self, Display, Formatter}, ops::Range};
use super::Expression;
use termcalc_parser::token::Token;

/// The broad class of a rendered token, used to decide where spaces are needed so that the
/// rendered text tokenizes back into the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Number,
    Name,
    Other,
}

/// Formats a number. Negative numbers are parenthesized unless `bare` is set, so that they are
/// read back as a single operand.
fn number(n: f64, bare: bool) -> String {
    if n.is_sign_negative() && n != 0.0 && !bare {
        format!("({})", n)
    } else {
        format!("{}", n)
    }
}

impl Expression {
    /// Renders the tokens back to infix text.
    ///
    /// If `expand_functions` is set, names bound to constants are replaced with their values.
    pub fn human_readable(&self, expand_functions: bool) -> String {
        self.render(expand_functions).0
    }

    /// Renders the tokens like [`Expression::human_readable`] (without expanding constants),
    /// also returning the character range of each token in the text.
    pub fn token_spans(&self) -> (String, Vec<Range<usize>>) {
        self.render(false)
    }

    fn render(&self, expand_functions: bool) -> (String, Vec<Range<usize>>) {
        let mut out = String::new();
        let mut spans = Vec::with_capacity(self.tokens.len());
        let mut last = Class::Other;

        for (i, token) in self.tokens.iter().enumerate() {
            // a negative number is bare at the start of a group
            let bare = i == 0 || matches!(self.tokens[i - 1], Token::ParenOpen);
            let (text, class) = match token {
                Token::Number(n) => (number(*n, bare), Class::Number),
                Token::Function(name) | Token::Variable(name) => {
                    match self.funcs.constant_value(name).filter(|_| expand_functions) {
                        Some(value) => (number(value, bare), Class::Number),
                        None => (name.clone(), Class::Name),
                    }
                },
                other => (other.to_string(), Class::Other),
            };

            if class != Class::Other && class == last {
                out.push(' ');
            }

            let start = out.len();
            out.push_str(&text);
            spans.push(start..out.len());

            if matches!(token, Token::Separator) {
                out.push(' ');
            }
            last = class;
        }

        (out, spans)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.human_readable(false))
    }
}
