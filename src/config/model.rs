// src/config/model.rs

use crate::errors::{Result, SupervisorError};

/// Name of the application section shared by both tools.
pub const APPNAME: &str = "simple_supervisor";

/// Sub-section holding the numbered `path` list for `git pull`.
pub const GIT_PULL_SECTION: &str = "simple_supervisor.git_pull";

/// A named block of key/value pairs, in declaration order.
///
/// Keys are stored lower-cased, so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set `key` to `value`, replacing an existing value in place or
    /// appending a new entry.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let key = key.to_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`Section::get`] but a missing key is a configuration error.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| {
            SupervisorError::Config(format!("Missing key {key:?} in section [{}].", self.name))
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

/// Merged configuration read from one or more INI files.
///
/// Sections keep the order in which they were first seen. Merging another
/// configuration overrides values key by key, the way repeated reads into a
/// single parser behave.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    sections: Vec<Section>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Section lookup where absence is a configuration error.
    pub fn require_section(&self, name: &str) -> Result<&Section> {
        self.section(name)
            .ok_or_else(|| SupervisorError::Config(format!("Missing section {name:?}.")))
    }

    /// The `[simple_supervisor]` section.
    pub fn app_section(&self) -> Result<&Section> {
        self.require_section(APPNAME)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Get or create a section by name.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    /// Fold `other` into `self`; values from `other` win.
    pub fn merge(&mut self, other: Config) {
        for section in other.sections {
            let target = self.section_mut(&section.name);
            for (key, value) in section.entries {
                target.insert(&key, value);
            }
        }
    }
}
