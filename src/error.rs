//! Error types for tag generation

use std::io;
use std::process::ExitCode;

use thiserror::Error;

/// Errors surfaced while indexing Go sources.
///
/// Only [`GoTagsError::Parse`] and [`GoTagsError::Read`] are produced per file;
/// the collector records them and moves on to the next file. The remaining
/// variants belong to the command-line layer and end the process.
#[derive(Debug, Error)]
pub enum GoTagsError {
    /// The source text could not be turned into a syntax tree
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// The source file could not be read
    #[error("{path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The Go grammar could not be loaded into the parser
    #[error("failed to load Go grammar: {message}")]
    Grammar { message: String },

    /// The `-L` file list could not be read
    #[error("cannot get specified files: {message}")]
    FileList { message: String },

    #[error("no file specified")]
    NoInput,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl GoTagsError {
    /// Whether this error is scoped to a single input file.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Read { .. })
    }

    /// Process exit code for errors that terminate the run
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) => ExitCode::from(2),
            _ => ExitCode::from(1),
        }
    }
}

pub type Result<T> = std::result::Result<T, GoTagsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = GoTagsError::Parse {
            path: "broken.go".to_string(),
            line: 3,
            column: 7,
            message: "syntax error".to_string(),
        };
        assert_eq!(err.to_string(), "broken.go:3:7: syntax error");
        assert!(err.is_per_file());
    }

    #[test]
    fn test_cli_errors_are_not_per_file() {
        assert!(!GoTagsError::NoInput.is_per_file());
        assert_eq!(GoTagsError::NoInput.to_string(), "no file specified");
    }
}
