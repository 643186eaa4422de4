// src/exec/command.rs

use std::fmt;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::errors::{Result, SupervisorError};
use crate::shell;

/// Where a child's stdout or stderr goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Share the parent's stream.
    #[default]
    Inherit,
    /// Capture through a pipe.
    Piped,
    /// Discard.
    Null,
}

/// Subprocess options for a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Capture stdout and stderr; implies `Piped` for both streams.
    pub capture_output: bool,
    /// Treat a non-zero exit status as an error.
    pub check: bool,
    pub stdout: OutputMode,
    pub stderr: OutputMode,
}

impl RunOptions {
    /// Fixed options of a `safer_command`: capture output, fail on non-zero
    /// exit, piped streams.
    pub const SAFE: RunOptions = RunOptions {
        capture_output: true,
        check: true,
        stdout: OutputMode::Piped,
        stderr: OutputMode::Piped,
    };

    /// Effective stdout destination.
    pub fn stdout_mode(&self) -> OutputMode {
        if self.capture_output {
            OutputMode::Piped
        } else {
            self.stdout
        }
    }

    /// Effective stderr destination.
    pub fn stderr_mode(&self) -> OutputMode {
        if self.capture_output {
            OutputMode::Piped
        } else {
            self.stderr
        }
    }
}

impl fmt::Display for RunOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{capture_output: {}, check: {}, stdout: {:?}, stderr: {:?}}}",
            self.capture_output,
            self.check,
            self.stdout_mode(),
            self.stderr_mode()
        )
    }
}

/// How a configured command section asked to be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `command = ...`: caller-supplied default options.
    Command,
    /// `safer_command = ...`: always [`RunOptions::SAFE`].
    SaferCommand,
}

impl CommandKind {
    pub const KEYS: [&'static str; 2] = ["command", "safer_command"];

    pub fn key(&self) -> &'static str {
        match self {
            CommandKind::Command => "command",
            CommandKind::SaferCommand => "safer_command",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "command" => Some(CommandKind::Command),
            "safer_command" => Some(CommandKind::SaferCommand),
            _ => None,
        }
    }
}

/// A single subprocess invocation: argv, working directory and options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    argv: Vec<String>,
    cwd: Option<PathBuf>,
    options: RunOptions,
}

impl Command {
    /// Build a command; `argv` must not be empty.
    pub fn new<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.is_empty() {
            return Err(SupervisorError::Config(
                "command argv must not be empty".into(),
            ));
        }
        Ok(Self {
            argv,
            cwd: None,
            options: RunOptions::default(),
        })
    }

    /// Build a command whose options are fixed to [`RunOptions::SAFE`].
    pub fn safer<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(argv)?.with_options(RunOptions::SAFE))
    }

    /// Build a command from a configured kind and the caller's defaults.
    pub fn of_kind(kind: CommandKind, argv: Vec<String>, defaults: RunOptions) -> Result<Self> {
        match kind {
            CommandKind::SaferCommand => Self::safer(argv),
            CommandKind::Command => Ok(Self::new(argv)?.with_options(defaults)),
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Working directory the command runs in: the configured one, or the
    /// process working directory.
    pub fn resolve_cwd(&self) -> PathBuf {
        match &self.cwd {
            Some(cwd) => cwd.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Shell-quoted command line.
    pub fn command_line(&self) -> String {
        shell::join(&self.argv)
    }

    /// `<cwd>/<quoted command line>`, as printed before running or in dry-run.
    pub fn preview(&self) -> String {
        let cwd = self.resolve_cwd();
        let cwd = cwd.display().to_string();
        let sep = if cwd.ends_with(MAIN_SEPARATOR) {
            String::new()
        } else {
            MAIN_SEPARATOR.to_string()
        };
        format!("{cwd}{sep}{}", self.command_line())
    }
}

/// Result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub argv: Vec<String>,
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// True if either captured stream has content.
    pub fn has_output(&self) -> bool {
        !self.stdout.is_empty() || !self.stderr.is_empty()
    }

    /// Captured stdout lines followed by stderr lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines().chain(self.stderr.lines())
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompletedProcess(args={:?}, returncode=", self.argv)?;
        match self.code {
            Some(code) => write!(f, "{code}")?,
            None => write!(f, "None")?,
        }
        if !self.stdout.is_empty() {
            write!(f, ", stdout={:?}", self.stdout)?;
        }
        if !self.stderr.is_empty() {
            write!(f, ", stderr={:?}", self.stderr)?;
        }
        write!(f, ")")
    }
}
