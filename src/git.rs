// src/git.rs

//! Git plumbing: repository discovery, HEAD parsing and the fixed git
//! command lines used by both tools.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::errors::{Result, SupervisorError};
use crate::exec::{Command, RunOptions};

pub const GIT_DIR: &str = ".git";

static REF_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ref: (.+)$").expect("valid regex"));

/// Recursively walk `top` and return every directory that directly contains
/// a `.git` directory, in file-name order.
///
/// Any walk error (unreadable directory, vanished entry) aborts the walk.
/// `.git` directories themselves are not descended into, but nested
/// repositories below a work tree are found.
pub fn find_repositories(top: &Path) -> Result<Vec<PathBuf>> {
    let mut roots = Vec::new();

    let walker = WalkDir::new(top)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != GIT_DIR);

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.path().join(GIT_DIR).is_dir() {
            debug!(root = %entry.path().display(), "found repository");
            roots.push(entry.into_path());
        } else {
            trace!(dir = %entry.path().display(), "not a repository");
        }
    }

    Ok(roots)
}

/// Extract the checked-out branch from the contents of a `HEAD` file.
///
/// Exactly one `ref: ` line is required; a detached HEAD (a bare commit id)
/// or several ref lines are rejected. `refs/heads/<name>` yields `<name>`
/// (slashes in the branch name are kept); any other ref form yields its last
/// `/` segment. Branch names are not cut down to their last segment, so
/// `feature/login` resets to `origin/feature/login`.
pub fn branch_from_head(contents: &str, head_path: &Path) -> Result<String> {
    let refs: Vec<&str> = contents
        .lines()
        .filter_map(|line| REF_LINE.captures(line.trim_end()))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
        .collect();

    if refs.len() != 1 {
        return Err(SupervisorError::InvalidHead {
            path: head_path.to_path_buf(),
            found: refs.len(),
        });
    }

    let reference = refs[0];
    let branch = match reference.strip_prefix("refs/heads/") {
        Some(name) => name,
        None => reference.rsplit('/').next().unwrap_or(reference),
    };
    Ok(branch.to_string())
}

/// Read `<root>/.git/HEAD` and return the current branch name.
pub fn current_branch(root: &Path) -> Result<String> {
    let head_path = root.join(GIT_DIR).join("HEAD");
    let contents = fs::read_to_string(&head_path)?;
    branch_from_head(&contents, &head_path)
}

/// `git fetch` in `root`, captured and checked.
pub fn fetch_command(root: &Path) -> Result<Command> {
    Ok(Command::new(["git", "fetch"])?
        .with_cwd(root)
        .with_options(RunOptions::SAFE))
}

/// `git reset --hard origin/<branch>` in `root`, captured and checked.
pub fn reset_command(root: &Path, branch: &str) -> Result<Command> {
    let target = format!("origin/{branch}");
    Ok(Command::new(["git", "reset", "--hard", target.as_str()])?
        .with_cwd(root)
        .with_options(RunOptions::SAFE))
}

/// `git pull` in `path`, with default options.
pub fn pull_command(path: &Path) -> Result<Command> {
    Ok(Command::new(["git", "pull"])?.with_cwd(path))
}
