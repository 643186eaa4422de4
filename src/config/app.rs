// src/config/app.rs

use std::path::PathBuf;
use std::str::FromStr;

use crate::config::model::Config;
use crate::errors::{Result, SupervisorError};
use crate::paths::ExcludeSet;

/// What to do when a git command fails for one repository.
///
/// - `Abort`: stop the whole run at the first failure (default).
/// - `Continue`: log the failure, carry on with the remaining repositories
///   and report a batch failure at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    Abort,
    Continue,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "continue" => Ok(FailurePolicy::Continue),
            other => Err(format!(
                "invalid on_error: {other} (expected \"abort\" or \"continue\")"
            )),
        }
    }
}

/// Settings of `update-repos`, read from `[simple_supervisor]`:
///
/// ```ini
/// [simple_supervisor]
/// top = ~/src
/// database = repos.txt
/// on_error = abort
/// exclude =
///     /home/me/src/vendored
///     # comments and blank lines are ignored
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdaterSettings {
    pub top: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub exclude: ExcludeSet,
    pub on_error: FailurePolicy,
}

impl UpdaterSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        let app = config.app_section()?;

        let on_error = match app.get("on_error") {
            Some(value) => value.parse().map_err(SupervisorError::Config)?,
            None => FailurePolicy::default(),
        };

        Ok(Self {
            top: non_empty(app.get("top")).map(PathBuf::from),
            database: non_empty(app.get("database")).map(PathBuf::from),
            exclude: ExcludeSet::from_lines(exclude_lines(app.get("exclude").unwrap_or(""))),
            on_error,
        })
    }

    /// Walk root: `override_top` if given, else the configured `top`.
    pub fn resolve_top(&self, override_top: Option<PathBuf>) -> Result<PathBuf> {
        override_top.or_else(|| self.top.clone()).ok_or_else(|| {
            SupervisorError::Config(
                "Missing key \"top\" in section [simple_supervisor] and no --top given.".into(),
            )
        })
    }

    pub fn require_database(&self) -> Result<&PathBuf> {
        self.database.as_ref().ok_or_else(|| {
            SupervisorError::Config("Missing key \"database\" in section [simple_supervisor].".into())
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Lines of a multi-line value, skipping blanks and `#` comments.
pub fn exclude_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
