// src/paths.rs

//! Lexical path normalisation and the repository exclude set.
//!
//! Exclude entries come from hand-written config while walked roots come from
//! the filesystem, so both sides are normalised before comparison: made
//! absolute against the current directory, `.` dropped, `..` folded and
//! trailing separators removed. Nothing touches the filesystem, so entries
//! for paths that no longer exist still compare correctly.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

/// Normalise `path` relative to `base` without touching the filesystem.
pub fn normalize_against(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                if !matches!(out.components().next_back(), Some(Component::RootDir) | None) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Normalise `path` relative to the process working directory.
pub fn normalize(path: &Path) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    normalize_against(path, &cwd)
}

/// Set of repository roots to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    entries: BTreeSet<PathBuf>,
}

impl ExcludeSet {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: lines
                .into_iter()
                .map(|line| normalize(Path::new(line.as_ref())))
                .collect(),
        }
    }

    pub fn contains(&self, root: &Path) -> bool {
        self.entries.contains(&normalize(root))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
