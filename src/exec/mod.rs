// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] defines the `Command` value object (argv, working directory,
//!   subprocess options) and the `CommandOutput` record.
//! - [`backend`] provides the `CommandRunner` trait and the concrete
//!   `SystemRunner` used in production, which tests can replace with a fake
//!   implementation.

pub mod backend;
pub mod command;

pub use backend::{CommandRunner, SystemRunner, check_output};
pub use command::{Command, CommandKind, CommandOutput, OutputMode, RunOptions};
