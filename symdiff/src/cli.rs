use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use symdiff_tree::Var;

/// symdiff - symbolic differentiation of expressions in `x` and `y`
#[derive(Debug, Parser)]
#[command(
    name = "symdiff",
    version,
    about = "Differentiate, simplify and expand expressions in x and y",
    long_about = r#"
symdiff parses an expression built from numbers, the variables x and y, the operators
+ - * / ^ and the functions sin, cos, tan, cot (ctg), sqrt, ln and exp, then
differentiates, simplifies or expands it into a Taylor polynomial.

Examples:
  symdiff -e 'x^2 + sin(x)'                 # First derivative with respect to x
  symdiff -e 'x*y' -v y derive -n 2         # Second derivative with respect to y
  symdiff -e 'exp(x)' taylor -n 4 --at 1    # Taylor polynomial of order 4 around 1
  symdiff input.txt -f latex                # Read the first line of a file, print LaTeX
  symdiff                                   # Start the interactive prompt
"#,
    after_help = r#"
Environment Variables:
  SYMDIFF_LOG_LEVEL=debug      Set log level (error, warn, info, debug, trace)
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Expression to process, instead of reading it from a file or stdin
    #[arg(short, long, value_name = "TEXT")]
    pub expr: Option<String>,

    /// Variable to differentiate or expand with respect to
    #[arg(short, long, global = true, default_value = "x", value_parser = parse_var)]
    pub var: Var,

    /// Format of the result printed to stdout
    #[arg(short, long, global = true, value_enum, default_value = "infix")]
    pub format: Format,

    /// Write the result as a standalone LaTeX document to this path
    #[arg(long, global = true, value_name = "PATH")]
    pub latex_out: Option<PathBuf>,

    /// Write the result as a Graphviz DOT graph to this path
    #[arg(long, global = true, value_name = "PATH")]
    pub dot_out: Option<PathBuf>,

    /// Label DOT nodes with their arena index and links
    #[arg(long, global = true)]
    pub detailed: bool,

    /// Print the simplification steps to stderr
    #[arg(long, global = true)]
    pub steps: bool,

    /// Set log level
    #[arg(long, global = true, value_enum, env = "SYMDIFF_LOG_LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Computation to run on the expression (defaults to `derive`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File whose first line holds the expression
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Returns the command to run, falling back to a first derivative.
    pub fn resolved_command(&self) -> Command {
        self.command.unwrap_or(Command::Derive { order: 1 })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Subcommand)]
pub enum Command {
    /// Differentiate the expression
    Derive {
        /// Number of times to differentiate
        #[arg(short = 'n', long, default_value_t = 1)]
        order: usize,
    },

    /// Simplify the expression without differentiating it
    Simplify,

    /// Expand the expression into a truncated Taylor polynomial
    Taylor {
        /// Highest power of the polynomial, at most 170
        #[arg(short = 'n', long, default_value_t = 8)]
        order: usize,

        /// Point to expand around
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        at: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Infix,
    Latex,
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn parse_var(s: &str) -> Result<Var, String> {
    let mut chars = s.chars();
    match (chars.next().and_then(Var::from_char), chars.next()) {
        (Some(var), None) => Ok(var),
        _ => Err(format!("expected `x` or `y`, found `{}`", s)),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("symdiff").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = parse(&["-e", "x^2"]);
        assert_eq!(cli.expr.as_deref(), Some("x^2"));
        assert_eq!(cli.var, Var::X);
        assert_eq!(cli.format, Format::Infix);
        assert_eq!(cli.resolved_command(), Command::Derive { order: 1 });
        assert_eq!(cli.file, None);
        assert!(!cli.steps);
    }

    #[test]
    fn subcommands() {
        let cli = parse(&["-e", "x*y", "derive", "-n", "3", "-v", "y"]);
        assert_eq!(cli.resolved_command(), Command::Derive { order: 3 });
        assert_eq!(cli.var, Var::Y);

        let cli = parse(&["-e", "exp(x)", "taylor", "--at", "-1.5"]);
        assert_eq!(cli.resolved_command(), Command::Taylor { order: 8, at: -1.5 });

        let cli = parse(&["-e", "x + 0", "simplify", "-f", "latex"]);
        assert_eq!(cli.resolved_command(), Command::Simplify);
        assert_eq!(cli.format, Format::Latex);
    }

    #[test]
    fn input_file() {
        let cli = parse(&["-f", "dot", "--detailed", "input.txt"]);
        assert_eq!(cli.file, Some(PathBuf::from("input.txt")));
        assert_eq!(cli.expr, None);
        assert_eq!(cli.format, Format::Dot);
        assert!(cli.detailed);
    }

    #[test]
    fn bad_variable() {
        let result = Cli::try_parse_from(["symdiff", "-v", "z"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_variables() {
        assert_eq!(parse_var("x"), Ok(Var::X));
        assert_eq!(parse_var("y"), Ok(Var::Y));
        assert!(parse_var("xy").is_err());
        assert!(parse_var("").is_err());
    }
}
