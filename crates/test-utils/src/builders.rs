#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder for INI config text, written into a temp dir.
#[derive(Default)]
pub struct IniBuilder {
    text: String,
}

impl IniBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, name: &str) -> Self {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(&format!("[{name}]\n"));
        self
    }

    pub fn key(mut self, key: &str, value: &str) -> Self {
        self.text.push_str(&format!("{key} = {value}\n"));
        self
    }

    /// A multi-line value: first line after `=`, the rest indented.
    pub fn multiline(mut self, key: &str, lines: &[&str]) -> Self {
        let first = lines.first().copied().unwrap_or("");
        self.text.push_str(&format!("{key} = {first}\n"));
        for line in lines.iter().skip(1) {
            self.text.push_str(&format!("    {line}\n"));
        }
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Write the config as `name` inside `dir` and return its path.
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, &self.text).expect("writing test config");
        path
    }
}

/// Builder for a directory tree holding fake git repositories.
///
/// A "repository" is a directory with a `.git/HEAD` file; nothing else of
/// git is needed because commands go through a fake runner.
pub struct RepoTree {
    dir: TempDir,
}

impl RepoTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("creating temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create `<root>/<rel>/.git/HEAD` pointing at `branch`.
    pub fn repo(self, rel: &str, branch: &str) -> Self {
        self.repo_with_head(rel, &format!("ref: refs/heads/{branch}\n"))
    }

    /// Create `<root>/<rel>/.git/HEAD` with arbitrary contents.
    pub fn repo_with_head(self, rel: &str, head: &str) -> Self {
        let git_dir = self.dir.path().join(rel).join(".git");
        fs::create_dir_all(&git_dir).expect("creating .git dir");
        fs::write(git_dir.join("HEAD"), head).expect("writing HEAD");
        self
    }

    /// Create a plain directory (not a repository).
    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(rel)).expect("creating dir");
        self
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }
}

impl Default for RepoTree {
    fn default() -> Self {
        Self::new()
    }
}
