// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! The supervisor and the repository updater talk to a `CommandRunner`
//! instead of `std::process` directly. This makes it easy to swap in a fake
//! runner in tests while keeping the production implementation here.
//!
//! - `SystemRunner` spawns real processes and blocks until they exit.
//! - Tests can provide their own `CommandRunner` that records which commands
//!   were run and returns scripted outputs.

use std::process::{self, Stdio};

use anyhow::Context;
use tracing::{debug, info};

use crate::errors::{Result, SupervisorError};
use crate::exec::command::{Command, CommandOutput, OutputMode};

/// Trait abstracting how commands are executed.
pub trait CommandRunner {
    /// Run `command` to completion.
    ///
    /// Implementations must honour `options().check`: a non-zero exit
    /// becomes [`SupervisorError::CommandFailed`]. [`check_output`] does this
    /// for them.
    fn run(&mut self, command: &Command) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, command: &Command) -> Result<CommandOutput> {
        (**self).run(command)
    }
}

/// Apply the `check` option to a finished command.
pub fn check_output(command: &Command, output: CommandOutput) -> Result<CommandOutput> {
    if command.options().check && !output.success() {
        return Err(SupervisorError::CommandFailed {
            command: command.command_line(),
            code: output.code,
            stderr: output.stderr.trim_end().to_string(),
        });
    }
    Ok(output)
}

/// Runner that spawns OS processes synchronously.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

fn stdio(mode: OutputMode) -> Stdio {
    match mode {
        OutputMode::Inherit => Stdio::inherit(),
        OutputMode::Piped => Stdio::piped(),
        OutputMode::Null => Stdio::null(),
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &Command) -> Result<CommandOutput> {
        let cwd = command.resolve_cwd();
        info!(cwd = %cwd.display(), cmd = %command.command_line(), "running command");

        let options = command.options();
        let output = process::Command::new(command.program())
            .args(command.args())
            .current_dir(&cwd)
            .stdin(Stdio::inherit())
            .stdout(stdio(options.stdout_mode()))
            .stderr(stdio(options.stderr_mode()))
            .output()
            .with_context(|| {
                format!("spawning `{}` in {}", command.command_line(), cwd.display())
            })?;

        let result = CommandOutput {
            argv: command.argv().to_vec(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(
            cmd = %command.command_line(),
            exit_code = ?result.code,
            success = result.success(),
            "command exited"
        );

        check_output(command, result)
    }
}
