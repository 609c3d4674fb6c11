use std::{io, path::PathBuf};
use symdiff_error::Error as ExprError;

/// Utility enum to package errors that can occur while reading, processing, or writing an
/// expression.
#[derive(Debug)]
pub enum Error {
    /// The expression could not be parsed or expanded.
    Expr(ExprError),

    /// Reading the input or writing an output file failed.
    Io {
        /// The file involved, or `None` for stdin.
        path: Option<PathBuf>,
        source: io::Error,
    },
}

impl Error {
    /// Wraps an I/O error on the given file.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: Some(path.into()), source }
    }

    /// Wraps an I/O error on stdin.
    pub fn stdin(source: io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// The code to terminate the process with after reporting this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Expr(_) => 1,
            Self::Io { .. } => 2,
        }
    }

    /// Writes the report for this error to the given writer, quoting `input` as the source of
    /// expression errors.
    pub fn write_report(&self, input: &str, mut w: impl io::Write) -> io::Result<()> {
        match self {
            Self::Expr(err) => err.write_report(input, w),
            Self::Io { path: Some(path), source } => writeln!(w, "error: {}: {}", path.display(), source),
            Self::Io { path: None, source } => writeln!(w, "error: stdin: {}", source),
        }
    }

    /// Report this error to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        if let Err(err) = self.write_report(input, io::stderr()) {
            eprintln!("error: could not write report: {}", err);
        }
    }
}

impl From<ExprError> for Error {
    fn from(err: ExprError) -> Self {
        Self::Expr(err)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symdiff_parser::parse;
    use super::*;

    fn report(err: &Error, input: &str) -> String {
        let mut out = Vec::new();
        err.write_report(input, &mut out).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
    }

    #[test]
    fn exit_codes() {
        let expr = Error::from(parse("x +").unwrap_err());
        let io = Error::stdin(io::Error::new(io::ErrorKind::UnexpectedEof, "no input"));
        assert_eq!(expr.exit_code(), 1);
        assert_eq!(io.exit_code(), 2);
    }

    #[test]
    fn io_report() {
        let err = Error::io("missing.txt", io::Error::new(io::ErrorKind::NotFound, "not found"));
        assert_eq!(report(&err, ""), "error: missing.txt: not found\n");
    }

    #[test]
    fn expr_report_quotes_input() {
        let input = "sin(x";
        let err = Error::from(parse(input).unwrap_err());
        let report = report(&err, input);
        assert!(report.contains("sin(x"));
        assert!(report.contains("missing closing bracket"), "{}", report);
    }
}
