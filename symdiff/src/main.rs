mod cli;
mod error;
mod pipeline;

use clap::Parser;
use cli::{Cli, Command};
use env_logger::Env;
use error::Error;
use log::{debug, info};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, BufRead, IsTerminal}, path::Path, process::ExitCode};
use symdiff_tree::fmt::latex::latex_document;

/// Keeps the first line of the input, without its line terminator.
fn first_line(input: &str) -> String {
    input.lines().next().unwrap_or_default().to_string()
}

/// Reads the expression from `--expr`, the input file, or stdin, in that order. Returns `None` if
/// there is nothing to read and stdin is a terminal, in which case the interactive prompt runs.
fn read_input(cli: &Cli) -> Result<Option<String>, Error> {
    if let Some(expr) = &cli.expr {
        return Ok(Some(first_line(expr)));
    }

    if let Some(path) = &cli.file {
        let input = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        return Ok(Some(first_line(&input)));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut input = String::new();
    stdin.lock().read_line(&mut input).map_err(Error::stdin)?;
    Ok(Some(first_line(&input)))
}

/// Writes `contents` to `path`.
fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    fs::write(path, contents).map_err(|err| Error::io(path, err))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Runs the command on the input and prints the result, writing the rendering files if requested.
fn process(cli: &Cli, command: Command, input: &str) -> Result<(), Error> {
    let outcome = pipeline::run(input, command, cli.var)?;

    if cli.steps {
        for step in &outcome.steps {
            eprintln!("{}", step);
        }
    }

    println!("{}", pipeline::render(&outcome.tree, cli.format, cli.detailed));

    if let Some(path) = &cli.latex_out {
        write_file(path, &latex_document(&outcome.tree))?;
    }
    if let Some(path) = &cli.dot_out {
        write_file(path, &outcome.tree.dot(cli.detailed).to_string())?;
    }

    Ok(())
}

/// Reads and processes lines until end of input, reporting errors without stopping.
fn repl(cli: &Cli, command: Command) -> ExitCode {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::from(2);
        },
    };

    fn process_line(rl: &mut DefaultEditor, cli: &Cli, command: Command) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        if let Err(err) = process(cli, command, &input) {
            err.report_to_stderr(&input);
        }
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, cli, command) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }

    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .filter_level(cli.log_level.into())
        .init();

    let command = cli.resolved_command();
    debug!("{:?}", cli);

    let input = match read_input(&cli) {
        Ok(Some(input)) => input,
        Ok(None) => return repl(&cli, command),
        Err(err) => {
            err.report_to_stderr("");
            return ExitCode::from(err.exit_code());
        },
    };

    match process(&cli, command, &input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.report_to_stderr(&input);
            ExitCode::from(err.exit_code())
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn keeps_first_line() {
        assert_eq!(first_line("x^2\nsin(x)\n"), "x^2");
        assert_eq!(first_line("x + y\r\n"), "x + y");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn expr_takes_precedence() {
        let cli = Cli::try_parse_from(["symdiff", "-e", "x*y", "missing.txt"]).unwrap();
        assert_eq!(read_input(&cli).unwrap(), Some("x*y".to_string()));
    }

    #[test]
    fn missing_file() {
        let cli = Cli::try_parse_from(["symdiff", "/nonexistent/symdiff/input.txt"]).unwrap();
        let err = read_input(&cli).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
