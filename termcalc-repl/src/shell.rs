//! The interactive command shell.
//!
//! The shell keeps a numbered list of expressions, one of which is selected. Each input line is a
//! command name followed by space-separated arguments; see [`COMMANDS`] for the full list.

use crate::error::Error;
use rustyline::DefaultEditor;
use std::{io::{self, Write}, str::FromStr};
use termcalc_compute::{
    symbolic::{derivative, multiply_out, tangent},
    EvalOptions,
    Expression,
    Status,
};
use termcalc_graph::{graph::{CanvasPoint, GraphOptions}, Graph};
use termcalc_parser::token::Token;
use tracing::debug;

/// The commands understood by the shell, as `(name, usage, description)`.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("help", "", "Displays this"),
    ("exit", "", "Exits the shell"),
    ("show", "", "Shows the content of the selected expression"),
    ("showall", "", "Shows all expressions"),
    ("set", "[content]", "Sets the content of the selected expression"),
    ("eval", "", "Evaluates the selected expression"),
    ("select", "<num>", "Selects another expression"),
    ("graph", "<minx> <maxx> <miny> <maxy>", "Graphs the selected expression in the given area"),
    ("derive", "", "Replaces the selected expression with its derivative"),
    ("expand", "", "Multiplies out the product of two groups in the selected expression"),
    ("tangent", "<x>", "Replaces the selected expression with its tangent at x"),
    ("bind", "<name> <value>", "Binds a name in the selected expression to a value"),
];

/// A source of answers to questions the shell asks.
pub trait Prompt {
    /// Asks the question and returns the answer, or [`None`] if no more input is available.
    fn ask(&mut self, question: &str) -> Option<String>;
}

impl Prompt for DefaultEditor {
    fn ask(&mut self, question: &str) -> Option<String> {
        match self.readline(question) {
            Ok(answer) => Some(answer),
            Err(err) => {
                debug!(%err, "prompt closed");
                None
            },
        }
    }
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Exit,
    Show,
    ShowAll,

    /// Sets the selected expression. Asks for the content if none is given.
    Set(Option<String>),
    Eval,
    Select(usize),
    Graph {
        x_range: (f64, f64),
        y_range: (f64, f64),
    },
    Derive,
    Expand,
    Tangent(f64),
    Bind {
        name: String,
        value: f64,
    },
}

/// Parses a numeric command argument.
fn number(arg: &str, message: &str) -> Result<f64, Error> {
    arg.parse().map_err(|_| Error::command(message))
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let args = parts.collect::<Vec<_>>();

        let command = match name.as_str() {
            "help" => Self::Help,
            "exit" => Self::Exit,
            "show" => Self::Show,
            "showall" => Self::ShowAll,
            "set" if args.is_empty() => Self::Set(None),
            "set" => Self::Set(Some(args.join(" "))),
            "eval" => Self::Eval,
            "select" => {
                let id = args.first().ok_or_else(|| Error::command("No id provided"))?;
                let id = id.parse().map_err(|_| Error::command("No valid id provided"))?;
                Self::Select(id)
            },
            "graph" => {
                if args.len() < 4 {
                    return Err(Error::command("Not all arguments were given"));
                }
                let mut bounds = [0.0; 4];
                for (bound, arg) in bounds.iter_mut().zip(&args) {
                    *bound = number(arg, "All arguments must be numbers")?;
                }
                Self::Graph {
                    x_range: (bounds[0], bounds[1]),
                    y_range: (bounds[2], bounds[3]),
                }
            },
            "derive" => Self::Derive,
            "expand" => Self::Expand,
            "tangent" => {
                let x = args.first().ok_or_else(|| Error::command("No x-value provided"))?;
                Self::Tangent(number(x, "The x-value must be a number")?)
            },
            "bind" => {
                let [name, value] = args[..] else {
                    return Err(Error::command("Usage: bind <name> <value>"));
                };
                Self::Bind {
                    name: name.to_string(),
                    value: number(value, "Could not parse provided value")?,
                }
            },
            _ => return Err(Error::command(
                "Command not found, type 'help' for a list of available commands",
            )),
        };
        Ok(command)
    }
}

/// Whether the shell should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The state of an interactive session.
#[derive(Debug, Clone)]
pub struct Shell {
    /// The expressions created so far.
    expressions: Vec<Expression>,

    /// The index of the selected expression. It is at most `expressions.len()`, in which case
    /// `set` appends the new expression.
    selected: usize,

    /// The options used for every evaluation.
    options: EvalOptions,

    /// The size of the canvas used by `graph`.
    canvas_size: CanvasPoint<usize>,
}

impl Shell {
    /// Creates a shell with no expressions, evaluating with the given options.
    pub fn new(options: EvalOptions) -> Self {
        Self {
            expressions: Vec::new(),
            selected: 0,
            options,
            canvas_size: GraphOptions::default().canvas_size,
        }
    }

    /// Sets the size of the canvas used by `graph`.
    pub fn with_canvas_size(mut self, width: usize, height: usize) -> Self {
        self.canvas_size = CanvasPoint(width, height);
        self
    }

    /// Returns the prompt to show before reading a command.
    pub fn prompt(&self) -> String {
        format!("termcalc #{}> ", self.selected)
    }

    /// Parses and runs one line of input. Command output is written to `out`, and problems are
    /// reported to `err`.
    pub fn execute(
        &mut self,
        line: &str,
        prompt: &mut dyn Prompt,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<Flow> {
        let result = line
            .parse::<Command>()
            .and_then(|command| self.run(command, prompt, out, err));
        match result {
            Ok(flow) => Ok(flow),
            Err(error) => {
                error.write_to(err)?;
                Ok(Flow::Continue)
            },
        }
    }

    /// Returns the selected expression, or an error if it has not been created.
    fn current(&mut self) -> Result<&mut Expression, Error> {
        self.expressions.get_mut(self.selected).ok_or_else(|| Error::command(
            "Selected expression does not exist, create it or select a different expression",
        ))
    }

    /// Replaces the selected expression with `expr`, unless `expr` failed.
    fn replace(&mut self, expr: Expression) -> Result<&Expression, Error> {
        if expr.status() == Status::Fail {
            return Err(Error::Eval(expr));
        }
        let current = self.current()?;
        *current = expr;
        Ok(&*current)
    }

    fn run(
        &mut self,
        command: Command,
        prompt: &mut dyn Prompt,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Flow, Error> {
        debug!(?command, selected = self.selected, "running command");
        match command {
            Command::Help => help(out)?,
            Command::Exit => return Ok(Flow::Exit),
            Command::Show => {
                let selected = self.selected;
                let expr = self.current()?;
                writeln!(out, "Content of expression #{}", selected)?;
                writeln!(out, "{}", expr)?;
            },
            Command::ShowAll => {
                for (i, expr) in self.expressions.iter().enumerate() {
                    writeln!(out, "#{:<5}{}", i, expr)?;
                }
            },
            Command::Set(content) => {
                let input = match content {
                    Some(content) => content,
                    None => prompt
                        .ask("Expression content: ")
                        .ok_or_else(|| Error::command("No expression content given"))?,
                };
                let parsed = termcalc_compute::parse(&input)
                    .map_err(|error| Error::Parse { input, error })?;
                writeln!(out, "Parsed expression: {}", parsed)?;

                match self.expressions.get_mut(self.selected) {
                    Some(expr) => *expr = parsed,
                    None => self.expressions.push(parsed),
                }
            },
            Command::Eval => self.eval(prompt, out, err)?,
            Command::Select(id) => {
                // one past the end selects the next new expression
                if id > self.expressions.len() {
                    return Err(Error::command(format!(
                        "Expression #{} does not exist, the next new expression is #{}",
                        id,
                        self.expressions.len(),
                    )));
                }
                self.selected = id;
                writeln!(out, "Changed to expression #{}", id)?;
            },
            Command::Graph { x_range, y_range } => {
                if x_range.0 >= x_range.1 || y_range.0 >= y_range.1 {
                    return Err(Error::command("The minimum of a range must be less than its maximum"));
                }
                let options = GraphOptions::default()
                    .x_range(x_range.0, x_range.1)
                    .y_range(y_range.0, y_range.1)
                    .canvas_size(self.canvas_size.0, self.canvas_size.1)
                    .eval(self.options);
                let expr = self.current()?.clone();
                let canvas = Graph::with_opts(options).add_expr(expr).draw();
                writeln!(out, "{}", canvas)?;
            },
            Command::Derive => {
                let derived = derivative(self.current()?);
                writeln!(out, "Derivative: {}", self.replace(derived)?)?;
            },
            Command::Expand => {
                let expanded = multiply_out(self.current()?);
                writeln!(out, "Expanded: {}", self.replace(expanded)?)?;
            },
            Command::Tangent(x) => {
                let options = self.options;
                let line = tangent(self.current()?, x, &options);
                writeln!(out, "Tangent at x = {}: {}", x, self.replace(line)?)?;
            },
            Command::Bind { name, value } => {
                if !is_name(&name) {
                    return Err(Error::command(format!("'{}' is not a valid name", name)));
                }
                self.current()?.bind_constant(&name, value);
                writeln!(out, "Bound {} = {}", name, value)?;
            },
        }
        Ok(Flow::Continue)
    }

    /// Asks for a value for each unassigned name, then evaluates the selected expression.
    fn eval(
        &mut self,
        prompt: &mut dyn Prompt,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(), Error> {
        let options = self.options;
        let expr = self.current()?;
        writeln!(out, "Selected expression: {}", expr)?;

        for name in expr.unassigned_functions() {
            let similar = expr.funcs().similar(&name);
            if !similar.is_empty() {
                writeln!(out, "Did you mean {}?", similar.join(", "))?;
            }

            let question = format!(
                "'{}' is unknown. Assign a value (leave empty for simplification): ",
                name,
            );
            let Some(answer) = prompt.ask(&question) else { break };
            let answer = answer.trim();
            if answer.is_empty() {
                continue;
            }
            match answer.parse::<f64>() {
                Ok(value) => expr.bind_constant(&name, value),
                Err(_) => Error::command("Could not parse provided value").write_to(err)?,
            }
        }

        let result = expr.unevaluated().evaluate_with(&options);
        *expr = result.clone();
        if result.status() == Status::Fail {
            return Err(Error::Eval(result));
        }
        writeln!(out, "Result: {}", result)?;
        Ok(())
    }
}

/// Returns true if `name` reads back as a single name.
fn is_name(name: &str) -> bool {
    matches!(
        termcalc_parser::parse_tokens(name).as_deref(),
        Ok([Token::Function(parsed)]) if parsed == name
    )
}

/// Writes the list of commands, aligned on their descriptions.
fn help(out: &mut dyn Write) -> io::Result<()> {
    let width = COMMANDS
        .iter()
        .map(|(name, usage, _)| name.len() + usage.len() + 1)
        .max()
        .unwrap_or_default()
        + 3;
    for (name, usage, description) in COMMANDS {
        let signature = format!("{} {}", name, usage);
        writeln!(out, "{:<width$}{}", signature, description, width = width)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use super::*;

    /// Answers questions from a fixed list, recording each question asked.
    #[derive(Default)]
    struct Scripted {
        answers: VecDeque<String>,
        questions: Vec<String>,
    }

    impl Scripted {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                questions: Vec::new(),
            }
        }
    }

    impl Prompt for Scripted {
        fn ask(&mut self, question: &str) -> Option<String> {
            self.questions.push(question.to_string());
            self.answers.pop_front()
        }
    }

    /// Runs each line and returns what was written to the output and error streams.
    fn run(shell: &mut Shell, prompt: &mut Scripted, lines: &[&str]) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        for line in lines {
            shell.execute(line, prompt, &mut out, &mut err).unwrap();
        }
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(strip_ansi_escapes::strip(err)).unwrap(),
        )
    }

    fn shell() -> Shell {
        Shell::new(EvalOptions::default())
    }

    #[test]
    fn parse_commands() {
        assert_eq!("SET 1 + 2".parse::<Command>().unwrap(), Command::Set(Some("1 + 2".to_string())));
        assert_eq!("set".parse::<Command>().unwrap(), Command::Set(None));
        assert_eq!("select 3".parse::<Command>().unwrap(), Command::Select(3));
        assert_eq!(
            "graph -1 1 -2 2.5".parse::<Command>().unwrap(),
            Command::Graph { x_range: (-1.0, 1.0), y_range: (-2.0, 2.5) },
        );
        assert_eq!(
            "bind x 4".parse::<Command>().unwrap(),
            Command::Bind { name: "x".to_string(), value: 4.0 },
        );
        assert!("select".parse::<Command>().is_err());
        assert!("select two".parse::<Command>().is_err());
        assert!("graph 1 2 3".parse::<Command>().is_err());
        assert!("frobnicate".parse::<Command>().is_err());
    }

    #[test]
    fn set_show_and_eval() {
        let mut shell = shell();
        let mut prompt = Scripted::default();
        let (out, err) = run(&mut shell, &mut prompt, &["set 1 + 2*3", "show", "eval"]);
        assert_eq!(out, "Parsed expression: 1+2*3\n\
            Content of expression #0\n\
            1+2*3\n\
            Selected expression: 1+2*3\n\
            Result: 7\n");
        assert_eq!(err, "");
    }

    #[test]
    fn set_asks_for_content() {
        let mut shell = shell();
        let mut prompt = Scripted::new(&["2(3+4)"]);
        let (out, _) = run(&mut shell, &mut prompt, &["set", "eval"]);
        assert_eq!(prompt.questions, vec!["Expression content: ".to_string()]);
        assert!(out.ends_with("Result: 14\n"), "{}", out);
    }

    #[test]
    fn eval_asks_for_unknown_names() {
        let mut shell = shell();
        let mut prompt = Scripted::new(&["3", ""]);
        let (out, _) = run(&mut shell, &mut prompt, &["set x + y", "eval"]);
        assert_eq!(prompt.questions.len(), 2);
        assert!(prompt.questions[0].starts_with("'x' is unknown"));
        assert!(prompt.questions[1].starts_with("'y' is unknown"));
        assert!(out.ends_with("Result: 3+y\n"), "{}", out);
    }

    #[test]
    fn eval_reports_unparsable_value() {
        let mut shell = shell();
        let mut prompt = Scripted::new(&["three"]);
        let (out, err) = run(&mut shell, &mut prompt, &["set x*2", "eval"]);
        assert_eq!(err, "Could not parse provided value\n");
        assert!(out.ends_with("Result: x*2\n"), "{}", out);
    }

    #[test]
    fn eval_failure_is_reported() {
        let mut shell = shell();
        let (out, err) = run(&mut shell, &mut Scripted::default(), &["set (1+2", "eval"]);
        assert!(!out.contains("Result"), "{}", out);
        assert!(err.contains("opening parenthesis without a closing parenthesis"), "{}", err);
    }

    #[test]
    fn missing_expression() {
        let mut shell = shell();
        let (out, err) = run(&mut shell, &mut Scripted::default(), &["show", "eval"]);
        assert_eq!(out, "");
        assert_eq!(
            err,
            "Selected expression does not exist, create it or select a different expression\n".repeat(2),
        );
    }

    #[test]
    fn select_next_new_expression() {
        let mut shell = shell();
        let (out, _) = run(
            &mut shell,
            &mut Scripted::default(),
            &["set 5", "select 1", "set 6", "showall"],
        );
        assert_eq!(shell.expressions.len(), 2);
        assert_eq!(shell.prompt(), "termcalc #1> ");
        assert!(out.ends_with("#0    5\n#1    6\n"), "{}", out);
    }

    #[test]
    fn select_out_of_range() {
        let mut shell = shell();
        let (out, err) = run(
            &mut shell,
            &mut Scripted::default(),
            &["set 1", "select 18446744073709551615", "select 5", "set 2", "show"],
        );
        assert_eq!(
            err,
            "Expression #18446744073709551615 does not exist, the next new expression is #1\n\
            Expression #5 does not exist, the next new expression is #1\n",
        );
        assert_eq!(shell.prompt(), "termcalc #0> ");
        assert_eq!(shell.expressions.len(), 1);
        assert!(out.ends_with("Content of expression #0\n2\n"), "{}", out);
    }

    #[test]
    fn parse_error_is_reported() {
        let mut shell = shell();
        let (_, err) = run(&mut shell, &mut Scripted::default(), &["set 1.2.3"]);
        assert!(err.contains("1.2.3"), "{}", err);
        assert!(shell.expressions.is_empty());
    }

    #[test]
    fn derive_and_bind() {
        let mut shell = shell();
        let (out, _) = run(
            &mut shell,
            &mut Scripted::default(),
            &["set x^3", "derive", "bind x 2", "eval"],
        );
        assert!(out.contains("Derivative: 3*x^2\n"), "{}", out);
        assert!(out.contains("Bound x = 2\n"), "{}", out);
        assert!(out.ends_with("Result: 12\n"), "{}", out);
    }

    #[test]
    fn bind_rejects_invalid_names() {
        let mut shell = shell();
        let (_, err) = run(&mut shell, &mut Scripted::default(), &["set x", "bind x2 1"]);
        assert_eq!(err, "'x2' is not a valid name\n");
    }

    #[test]
    fn expand_needs_two_groups() {
        let mut shell = shell();
        let (out, err) = run(
            &mut shell,
            &mut Scripted::default(),
            &["set (x+1)", "expand", "show"],
        );
        assert!(!err.is_empty());
        assert!(out.ends_with("Content of expression #0\n(x+1)\n"), "{}", out);
    }

    #[test]
    fn graph_draws_canvas() {
        let mut shell = shell().with_canvas_size(4, 4);
        let (out, _) = run(&mut shell, &mut Scripted::default(), &["set 1", "graph -2 2 -2 2"]);
        assert!(out.ends_with("    \nXXXX\n    \n    \n"), "{:?}", out);

        let (_, err) = run(&mut shell, &mut Scripted::default(), &["graph 2 -2 -2 2"]);
        assert_eq!(err, "The minimum of a range must be less than its maximum\n");
    }

    #[test]
    fn help_lists_every_command() {
        let mut shell = shell();
        let (out, _) = run(&mut shell, &mut Scripted::default(), &["help"]);
        assert_eq!(out.lines().count(), COMMANDS.len());
        assert!(out.contains("graph <minx> <maxx> <miny> <maxy>   Graphs"), "{}", out);
    }

    #[test]
    fn exit() {
        let mut shell = shell();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let flow = shell.execute("exit", &mut Scripted::default(), &mut out, &mut err).unwrap();
        assert_eq!(flow, Flow::Exit);
    }
}
