// src/updater.rs

//! Bulk "fetch and hard-reset" of git repositories.
//!
//! Three entry points share the per-repository step:
//!
//! - [`run`] walks a tree and updates every repository found in one pass.
//! - [`build`] walks a tree once and persists the roots to a database file.
//! - [`update`] reads the database file and updates each listed root.
//!
//! Execution is strictly sequential. What happens when one repository fails
//! is decided by [`FailurePolicy`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::config::{FailurePolicy, UpdaterSettings};
use crate::errors::{Result, SupervisorError};
use crate::exec::{CommandOutput, CommandRunner};
use crate::git;
use crate::paths::{self, ExcludeSet};

/// What happened to a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// `git fetch` printed nothing; nothing else was run.
    UpToDate,
    /// `git fetch` reported changes and the work tree was reset.
    Reset { branch: String },
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub reset: Vec<PathBuf>,
    pub up_to_date: Vec<PathBuf>,
    pub excluded: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl UpdateReport {
    pub fn total(&self) -> usize {
        self.reset.len()
            + self.up_to_date.len()
            + self.excluded.len()
            + self.missing.len()
            + self.failed.len()
    }

    /// Turn recorded failures into [`SupervisorError::BatchFailed`].
    pub fn ensure_success(self) -> Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(SupervisorError::BatchFailed {
                failed: self.failed.len(),
            })
        }
    }
}

/// Sequential repository updater over a [`CommandRunner`].
pub struct Updater<R> {
    runner: R,
    exclude: ExcludeSet,
    on_error: FailurePolicy,
}

impl<R: CommandRunner> Updater<R> {
    pub fn new(runner: R, exclude: ExcludeSet, on_error: FailurePolicy) -> Self {
        Self {
            runner,
            exclude,
            on_error,
        }
    }

    pub fn from_settings(runner: R, settings: &UpdaterSettings) -> Self {
        Self::new(runner, settings.exclude.clone(), settings.on_error)
    }

    /// Fetch `root`; if the fetch printed anything, hard-reset the checked
    /// out branch to its `origin` counterpart.
    pub fn update_root(&mut self, root: &Path) -> Result<RepoOutcome> {
        let fetch = git::fetch_command(root)?;
        let fetched = self.runner.run(&fetch)?;
        if !fetched.has_output() {
            debug!(root = %root.display(), "fetch printed nothing; up to date");
            return Ok(RepoOutcome::UpToDate);
        }
        log_output(root, &fetched);

        let branch = git::current_branch(root)?;
        let reset = git::reset_command(root, &branch)?;
        let reset_out = self.runner.run(&reset)?;
        log_output(root, &reset_out);

        info!(root = %root.display(), branch = %branch, "reset to origin");
        Ok(RepoOutcome::Reset { branch })
    }

    /// Update every root in order, skipping excluded and vanished ones.
    ///
    /// Under [`FailurePolicy::Abort`] the first error is returned as is.
    /// Under [`FailurePolicy::Continue`] failures are recorded in the report;
    /// call [`UpdateReport::ensure_success`] to turn them into an error.
    pub fn update_all(&mut self, roots: &[PathBuf]) -> Result<UpdateReport> {
        let mut report = UpdateReport::default();
        let total = roots.len();
        if !self.exclude.is_empty() {
            debug!(entries = self.exclude.len(), "exclude set");
        }

        for (idx, root) in roots.iter().enumerate() {
            debug!("{}/{}", idx + 1, total);

            if self.exclude.contains(root) {
                info!(root = %root.display(), "excluding");
                report.excluded.push(root.clone());
                continue;
            }
            if !root.exists() {
                warn!(root = %root.display(), "repository no longer exists; skipping");
                report.missing.push(root.clone());
                continue;
            }

            info!(root = %root.display(), "updating");
            match self.update_root(root) {
                Ok(RepoOutcome::UpToDate) => report.up_to_date.push(root.clone()),
                Ok(RepoOutcome::Reset { .. }) => report.reset.push(root.clone()),
                Err(err) => match self.on_error {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Continue => {
                        error!(root = %root.display(), error = %err, "update failed; continuing");
                        report.failed.push((root.clone(), err.to_string()));
                    }
                },
            }
        }

        info!(
            total,
            reset = report.reset.len(),
            up_to_date = report.up_to_date.len(),
            excluded = report.excluded.len(),
            missing = report.missing.len(),
            failed = report.failed.len(),
            "update finished"
        );
        Ok(report)
    }
}

fn log_output(root: &Path, output: &CommandOutput) {
    for line in output.lines() {
        debug!(root = %root.display(), "{}", line);
    }
}

/// Write `roots` to `database`, one per line, creating parent directories.
pub fn write_database(database: &Path, roots: &[PathBuf]) -> Result<()> {
    if let Some(parent) = database.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut contents = String::new();
    for root in roots {
        contents.push_str(&root.to_string_lossy());
        contents.push('\n');
    }
    fs::write(database, contents)?;
    Ok(())
}

/// Read a database file: one path per line, surrounding whitespace trimmed,
/// blank lines skipped.
pub fn read_database(database: &Path) -> Result<Vec<PathBuf>> {
    if !database.exists() {
        return Err(SupervisorError::MissingFile(database.to_path_buf()));
    }
    let contents = fs::read_to_string(database)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Keep only roots at or below `top` (compared after normalisation).
pub fn restrict_to(roots: Vec<PathBuf>, top: &Path) -> Vec<PathBuf> {
    let top = paths::normalize(top);
    roots
        .into_iter()
        .filter(|root| paths::normalize(root).starts_with(&top))
        .collect()
}

/// Walk `top` and update every repository found.
pub fn run<R: CommandRunner>(updater: &mut Updater<R>, top: &Path) -> Result<UpdateReport> {
    timed("run", || {
        let roots = git::find_repositories(top)?;
        info!(top = %top.display(), found = roots.len(), "walked tree");
        updater.update_all(&roots)
    })
}

/// Walk `top` and persist the repository roots to `database`.
pub fn build(top: &Path, database: &Path) -> Result<Vec<PathBuf>> {
    timed("build", || {
        let roots = git::find_repositories(top)?;
        write_database(database, &roots)?;
        info!(
            top = %top.display(),
            database = %database.display(),
            found = roots.len(),
            "database written"
        );
        Ok(roots)
    })
}

/// Update every root listed in `database`, optionally only those below
/// `top`.
pub fn update<R: CommandRunner>(
    updater: &mut Updater<R>,
    database: &Path,
    top: Option<&Path>,
) -> Result<UpdateReport> {
    timed("update", || {
        let mut roots = read_database(database)?;
        if let Some(top) = top {
            roots = restrict_to(roots, top);
        }
        info!(database = %database.display(), roots = roots.len(), "read database");
        updater.update_all(&roots)
    })
}

/// Run `f`, logging wall-clock start/end and the elapsed time.
fn timed<T>(mode: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let start_time = Local::now();
    let started = Instant::now();
    info!(mode, start_time = %start_time.to_rfc3339(), "starting");

    let result = f();

    let end_time = Local::now();
    info!(
        mode,
        end_time = %end_time.to_rfc3339(),
        elapsed = ?started.elapsed(),
        ok = result.is_ok(),
        "finished"
    );
    result
}
