mod error;
mod shell;

use clap::Parser;
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use shell::{Flow, Shell};
use std::{io::{self, IsTerminal, Read, Write}, process::ExitCode};
use termcalc_compute::{
    numerical::options::DEFAULT_MAX_DEPTH,
    EvalOptions,
    EvalOptionsBuilder,
    Status,
};
use tracing_subscriber::EnvFilter;

/// Evaluate, simplify, differentiate and graph expressions in the terminal.
///
/// Without an expression, and with a terminal on stdin, an interactive shell is started. Type
/// `help` in the shell for a list of commands.
#[derive(Parser, Debug)]
#[command(name = "termcalc", version)]
struct Cli {
    /// Maximum nesting depth of an evaluation
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log every evaluation step to stderr
    #[arg(long)]
    debug: bool,

    /// Width of the canvas drawn by `graph`, in characters
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// Height of the canvas drawn by `graph`, in characters
    #[arg(long, default_value_t = 24)]
    height: usize,

    /// Expression to evaluate once instead of starting the shell
    expression: Option<String>,
}

/// Parses and evaluates the input, writing the result to `out`, or a report of the failure to
/// `err`. Returns true if evaluation succeeded.
fn evaluate(
    input: &str,
    options: &EvalOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<bool> {
    let result = match termcalc_compute::parse(input) {
        Ok(expr) => expr.evaluate_with(options),
        Err(error) => {
            Error::Parse { input: input.to_string(), error }.write_to(err)?;
            return Ok(false);
        },
    };

    if result.status() == Status::Fail {
        Error::Eval(result).write_to(err)?;
        return Ok(false);
    }
    writeln!(out, "{}", result)?;
    Ok(true)
}

/// Runs the interactive shell until `exit`, end of input, or an interrupt.
fn repl(mut shell: Shell) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    loop {
        let line = match rl.readline(&shell.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        };
        if line.trim().is_empty() {
            continue;
        }

        rl.add_history_entry(&line)?;
        if shell.execute(&line, &mut rl, &mut stdout, &mut stderr)? == Flow::Exit {
            return Ok(());
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let options = EvalOptionsBuilder::new().max_depth(cli.max_depth).build();

    let inputs = if let Some(expression) = cli.expression {
        vec![expression]
    } else if !io::stdin().is_terminal() {
        // one expression per line
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    } else {
        let shell = Shell::new(options).with_canvas_size(cli.width, cli.height);
        return match repl(shell) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            },
        };
    };

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut success = true;
    for input in inputs {
        match evaluate(&input, &options, &mut stdout, &mut stderr) {
            Ok(ok) => success &= ok,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        }
    }

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(input: &str, options: &EvalOptions) -> (bool, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let ok = evaluate(input, options, &mut out, &mut err).unwrap();
        (
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(strip_ansi_escapes::strip(err)).unwrap(),
        )
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();

        let cli = Cli::parse_from(["termcalc", "--max-depth", "5", "1+2"]);
        assert_eq!(cli.max_depth, 5);
        assert_eq!(cli.expression.as_deref(), Some("1+2"));
        assert!(!cli.debug);

        let cli = Cli::parse_from(["termcalc"]);
        assert_eq!(cli.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!((cli.width, cli.height), (80, 24));
    }

    #[test]
    fn evaluate_once() {
        let (ok, out, err) = run("2(3+4) - 1", &EvalOptions::default());
        assert!(ok);
        assert_eq!(out, "13\n");
        assert_eq!(err, "");

        let (ok, out, _) = run("2x+3x", &EvalOptions::default());
        assert!(ok);
        assert_eq!(out, "2*x+3*x\n");
    }

    #[test]
    fn evaluate_once_failures() {
        let (ok, out, err) = run("1+2)", &EvalOptions::default());
        assert!(!ok);
        assert_eq!(out, "");
        assert!(err.contains("closing parenthesis"), "{}", err);

        let options = EvalOptionsBuilder::new().max_depth(1).build();
        let (ok, _, err) = run("((1))", &options);
        assert!(!ok);
        assert!(err.contains("maximum evaluation depth of 1 reached"), "{}", err);
    }
}
