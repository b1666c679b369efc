use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("cannot allocate memory for input line")]
    Allocation(#[from] TryReserveError),
    #[error("cannot read input: {0}")]
    Input(#[source] io::Error),
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
    #[error("{}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot create pipe: {0}")]
    PipeCreation(#[from] nix::Error),
    #[error("{program}: cannot create process: {source}")]
    ProcessCreation {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program}: {reason}")]
    Exec { program: String, reason: String },
    #[error("cd: {0}")]
    Directory(String),
    #[error("wait failed: {source}")]
    Wait {
        #[source]
        source: io::Error,
    },
}

impl ShellError {
    /// Errors after which the loop cannot keep reading input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Allocation(_) | ShellError::Input(_))
    }
}
