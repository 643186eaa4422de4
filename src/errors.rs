// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("no result")]
    NoResult,

    #[error("multiple results ({0} found, expected exactly one)")]
    MultipleResults(usize),

    #[error("Walking directory tree failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Command `{command}` failed with exit code {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Expected exactly one `ref:` line in {}, found {found}", .path.display())]
    InvalidHead { path: PathBuf, found: usize },

    #[error("{failed} repositories failed to update")]
    BatchFailed { failed: usize },

    #[error("No commands.")]
    NoCommands,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("INI parsing error: {0}")]
    Ini(#[from] ini::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SupervisorError {
    /// Errors that the binaries report as command-line usage errors rather
    /// than runtime failures.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, SupervisorError::NoCommands)
    }
}

pub type Result<T> = std::result::Result<T, SupervisorError>;
