// src/config/mod.rs

//! Configuration loading for both tools.
//!
//! Responsibilities:
//! - Define the merged INI data model (`model.rs`).
//! - Load and merge one or more INI files from disk (`loader.rs`).
//! - Interpret the application section for each tool (`app.rs`).

pub mod app;
pub mod loader;
pub mod model;

pub use app::{FailurePolicy, UpdaterSettings};
pub use loader::{load_from_path, load_from_str, load_paths, raise_for_missing};
pub use model::{APPNAME, Config, GIT_PULL_SECTION, Section};
