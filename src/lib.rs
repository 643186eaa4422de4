// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod git;
pub mod logging;
pub mod paths;
pub mod query;
pub mod shell;
pub mod supervisor;
pub mod updater;

use std::io;

use anyhow::Result;
use tracing::info;

use crate::cli::{CliArgs, UpdateMode, UpdateReposArgs};
use crate::config::{Config, FailurePolicy, UpdaterSettings};
use crate::errors::SupervisorError;
use crate::exec::{CommandRunner, OutputMode, RunOptions};
use crate::updater::Updater;

/// Caller-supplied default options for plain `command` entries.
pub fn default_run_options(args: &CliArgs) -> RunOptions {
    let mut options = RunOptions {
        check: args.check,
        ..RunOptions::default()
    };
    if args.capture {
        options.capture_output = true;
        options.stdout = OutputMode::Piped;
        options.stderr = OutputMode::Piped;
    }
    options
}

/// High-level entry point of `simple-supervisor`, used by `main.rs`.
///
/// This wires together:
/// - command building from the already loaded config
/// - dry-run preview or sequential execution through `runner`
pub fn run<R: CommandRunner>(args: &CliArgs, config: &Config, runner: &mut R) -> Result<()> {
    let commands = supervisor::build_commands(config, default_run_options(args))?;
    if commands.is_empty() {
        return Err(SupervisorError::NoCommands.into());
    }
    info!(count = commands.len(), dry_run = args.dry, "running configured commands");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    supervisor::run_commands(&commands, runner, args.dry, &mut out)?;
    Ok(())
}

/// High-level entry point of `update-repos`, used by `bin/update_repos.rs`.
pub fn run_update_repos<R: CommandRunner>(
    args: &UpdateReposArgs,
    config: &Config,
    runner: R,
) -> Result<()> {
    let mode_args = args.mode.args();
    let mut settings = UpdaterSettings::from_config(config)?;
    if args.mode.keep_going() {
        settings.on_error = FailurePolicy::Continue;
    }

    match &args.mode {
        UpdateMode::Run(_) => {
            let top = settings.resolve_top(mode_args.top.clone())?;
            let mut updater = Updater::from_settings(runner, &settings);
            updater::run(&mut updater, &top)?.ensure_success()?;
        }
        UpdateMode::Build(_) => {
            let top = settings.resolve_top(mode_args.top.clone())?;
            let database = settings.require_database()?;
            updater::build(&top, database)?;
        }
        UpdateMode::Update(_) => {
            let database = settings.require_database()?;
            let mut updater = Updater::from_settings(runner, &settings);
            updater::update(&mut updater, database, mode_args.top.as_deref())?.ensure_success()?;
        }
    }
    Ok(())
}
