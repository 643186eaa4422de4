// src/cli.rs

//! CLI argument parsing using `clap`, for both binaries.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `simple-supervisor`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "simple_supervisor",
    version,
    about = "Run commands from configuration.",
    long_about = None
)]
pub struct CliArgs {
    /// INI config files, merged in order.
    #[arg(required = true, value_name = "CONFIG")]
    pub config: Vec<PathBuf>,

    /// Print what would run, without running anything.
    #[arg(long)]
    pub dry: bool,

    /// Fail on non-zero exit for plain `command` entries too.
    #[arg(long)]
    pub check: bool,

    /// Capture output of plain `command` entries instead of inheriting it.
    #[arg(long)]
    pub capture: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, the config's logging sections, `SIMPLE_SUPERVISOR_LOG` or
    /// a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Command-line arguments for `update-repos`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "update_repos",
    version,
    about = "Fetch and hard-reset every git repository under a directory.",
    long_about = None
)]
pub struct UpdateReposArgs {
    #[command(subcommand)]
    pub mode: UpdateMode,

    /// Logging level (error, warn, info, debug, trace).
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum UpdateMode {
    /// Walk `top` and update every repository found.
    Run(FetchArgs),
    /// Walk `top` and write the repository list to the database file.
    Build(UpdateArgs),
    /// Update every repository listed in the database file.
    Update(FetchArgs),
}

impl UpdateMode {
    pub fn args(&self) -> &UpdateArgs {
        match self {
            UpdateMode::Run(fetch) | UpdateMode::Update(fetch) => &fetch.common,
            UpdateMode::Build(args) => args,
        }
    }

    /// `--keep-going`; always false for `build`, which never fetches.
    pub fn keep_going(&self) -> bool {
        match self {
            UpdateMode::Run(fetch) | UpdateMode::Update(fetch) => fetch.keep_going,
            UpdateMode::Build(_) => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// INI config files, merged in order.
    #[arg(required = true, value_name = "CONFIG")]
    pub config: Vec<PathBuf>,

    /// Ignore `top` from config and start at this path.
    ///
    /// For `update`, only database entries below this path are updated.
    #[arg(long, value_name = "PATH")]
    pub top: Option<PathBuf>,
}

/// Arguments of the modes that fetch repositories.
#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub common: UpdateArgs,

    /// Keep going after a repository fails, overriding `on_error`.
    #[arg(long)]
    pub keep_going: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Convenience wrapper around `UpdateReposArgs::parse()`.
pub fn parse_update_repos() -> UpdateReposArgs {
    UpdateReposArgs::parse()
}

/// Print `message` as a usage error for parser `P` and exit with status 2.
pub fn usage_error<P: CommandFactory>(message: impl std::fmt::Display) -> ! {
    P::command()
        .error(clap::error::ErrorKind::ValueValidation, message)
        .exit()
}
