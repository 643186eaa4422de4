// src/supervisor.rs

//! Build commands from the merged configuration and run them in order.
//!
//! Two sources of commands are understood:
//!
//! ```ini
//! [simple_supervisor]
//! keys1 = build
//! keys2 = deploy
//!
//! [build]
//! command = make -C "my project" all
//! cwd = /srv/app
//!
//! [deploy]
//! safer_command = ./deploy.sh --quiet
//!
//! [simple_supervisor.git_pull]
//! path1 = /srv/app
//! path2 = /srv/lib
//! ```
//!
//! Every `keys*` entry names a section holding exactly one of `command` or
//! `safer_command`. The `git_pull` sub-section lists directories to
//! `git pull` in.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::{Config, GIT_PULL_SECTION};
use crate::errors::{Result, SupervisorError};
use crate::exec::{Command, CommandKind, CommandOutput, CommandRunner, RunOptions};
use crate::git;
use crate::query;
use crate::shell;

/// Build every configured command: `keys*` sections first, in declaration
/// order, then the git pull list.
///
/// Fails with a configuration error if `[simple_supervisor]` is missing.
pub fn build_commands(config: &Config, defaults: RunOptions) -> Result<Vec<Command>> {
    let app = config.app_section()?;
    let mut commands = Vec::new();

    for key in query::prefixed_keys(app, "keys") {
        let section_name = app.require(key)?.trim();
        commands.push(command_from_section(config, section_name, defaults)?);
    }

    if config.has_section(GIT_PULL_SECTION) {
        commands.extend(simple_git_pull(config)?);
    }

    debug!(count = commands.len(), "built commands");
    Ok(commands)
}

/// Build the command described by section `name`.
pub fn command_from_section(config: &Config, name: &str, defaults: RunOptions) -> Result<Command> {
    let section = config.require_section(name)?;

    // Zero or both keys surface as NoResult / MultipleResults.
    let key = query::has_only_one(section.keys(), &CommandKind::KEYS).inspect_err(|err| {
        warn!(section = %name, error = %err, "expected exactly one of `command` or `safer_command`");
    })?;
    let kind = CommandKind::from_key(key).ok_or_else(|| {
        SupervisorError::Config(format!("unknown command key {key:?} in [{name}]"))
    })?;

    let argv = shell::split(section.require(key)?)?;
    if argv.is_empty() {
        return Err(SupervisorError::Config(format!(
            "`{}` in section [{name}] is empty",
            kind.key()
        )));
    }

    let command = Command::of_kind(kind, argv, defaults)?;
    Ok(match section.get("cwd").map(str::trim).filter(|c| !c.is_empty()) {
        Some(cwd) => command.with_cwd(cwd),
        None => command,
    })
}

/// One `git pull` per numbered `path` of `[simple_supervisor.git_pull]`.
///
/// Every path is checked for existence before any command is built.
pub fn simple_git_pull(config: &Config) -> Result<Vec<Command>> {
    let section = config.require_section(GIT_PULL_SECTION)?;
    let paths: Vec<PathBuf> = query::parse_numbered_list(section, "path", false)?
        .into_iter()
        .map(|(_, path)| PathBuf::from(path.trim()))
        .collect();

    crate::config::raise_for_missing(&paths)?;

    paths.iter().map(|path| git::pull_command(path)).collect()
}

/// Preview line printed for every command, with its resolved options.
pub fn dry_run_line(command: &Command) -> String {
    format!("{} {}", command.preview(), command.options())
}

/// Preview or run `commands` in order.
///
/// Every command's preview is written to `out`. In dry-run mode nothing is
/// executed; otherwise each command runs to completion and its result is
/// written after it. The first failing command stops the run.
pub fn run_commands<R, W>(
    commands: &[Command],
    runner: &mut R,
    dry_run: bool,
    out: &mut W,
) -> Result<Vec<CommandOutput>>
where
    R: CommandRunner,
    W: Write,
{
    let mut results = Vec::with_capacity(commands.len());

    for command in commands {
        if dry_run {
            writeln!(out, "{}", dry_run_line(command))?;
            continue;
        }

        writeln!(out, "{}", command.preview())?;
        let output = runner.run(command)?;
        writeln!(out, "{output}")?;
        info!(cmd = %command.command_line(), exit_code = ?output.code, "command finished");
        results.push(output);
    }

    if dry_run {
        debug!("dry-run complete (no execution)");
    }
    Ok(results)
}
