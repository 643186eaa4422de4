// tests/config_loading.rs

mod common;
use crate::common::builders::IniBuilder;
use crate::common::config_from;

use std::error::Error;

use tempfile::TempDir;

use simple_supervisor::config::app::exclude_lines;
use simple_supervisor::config::{FailurePolicy, UpdaterSettings, load_paths};
use simple_supervisor::errors::SupervisorError;
use simple_supervisor::exec::RunOptions;
use simple_supervisor::supervisor::build_commands;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn missing_app_section_is_a_config_error() -> TestResult {
    let cfg = config_from("[other]\nkeys1 = build\n\n[build]\ncommand = echo hi\n");

    match build_commands(&cfg, RunOptions::default()) {
        Err(SupervisorError::Config(msg)) => assert!(msg.contains("simple_supervisor")),
        other => panic!("expected Config error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn later_files_override_earlier_ones_key_by_key() -> TestResult {
    let dir = TempDir::new()?;
    let first = IniBuilder::new()
        .section("simple_supervisor")
        .key("top", "/first")
        .key("database", "repos.txt")
        .write_to(dir.path(), "a.ini");
    let second = IniBuilder::new()
        .section("simple_supervisor")
        .key("top", "/second")
        .section("extra")
        .key("x", "1")
        .write_to(dir.path(), "b.ini");

    let cfg = load_paths(&[first, second])?;
    let app = cfg.app_section()?;

    assert_eq!(app.get("top"), Some("/second"));
    assert_eq!(app.get("database"), Some("repos.txt"));
    assert_eq!(cfg.section("extra").and_then(|s| s.get("x")), Some("1"));
    Ok(())
}

#[test]
fn keys_are_case_insensitive() -> TestResult {
    let cfg = config_from("[simple_supervisor]\nTop = /srv\n");
    let app = cfg.app_section()?;

    assert_eq!(app.get("top"), Some("/srv"));
    assert_eq!(app.get("TOP"), Some("/srv"));
    assert_eq!(app.keys().collect::<Vec<_>>(), vec!["top"]);
    Ok(())
}

#[test]
fn missing_config_file_is_reported_before_parsing() -> TestResult {
    let dir = TempDir::new()?;
    let present = IniBuilder::new()
        .section("simple_supervisor")
        .write_to(dir.path(), "present.ini");
    let absent = dir.path().join("absent.ini");

    match load_paths(&[present, absent.clone()]) {
        Err(SupervisorError::MissingFile(path)) => assert_eq!(path, absent),
        other => panic!("expected MissingFile, got {other:?}"),
    }
    Ok(())
}

#[test]
fn updater_settings_read_exclude_lines_and_policy() -> TestResult {
    let text = IniBuilder::new()
        .section("simple_supervisor")
        .key("top", "/srv/src")
        .key("database", "/tmp/repos.txt")
        .key("on_error", "continue")
        .multiline("exclude", &["/srv/src/vendored", "/srv/src/scratch"])
        .text()
        .to_string();
    let settings = UpdaterSettings::from_config(&config_from(&text))?;

    assert_eq!(settings.top.as_deref(), Some(std::path::Path::new("/srv/src")));
    assert_eq!(settings.on_error, FailurePolicy::Continue);
    assert_eq!(settings.exclude.len(), 2);
    assert!(settings.exclude.contains(std::path::Path::new("/srv/src/vendored")));
    assert!(settings.exclude.contains(std::path::Path::new("/srv/src/scratch")));
    Ok(())
}

#[test]
fn exclude_lines_skip_blanks_and_comments() {
    let lines = exclude_lines("\n/srv/a\n\n# comment\n  /srv/b  \n");
    assert_eq!(lines, vec!["/srv/a".to_string(), "/srv/b".to_string()]);
}

#[test]
fn invalid_failure_policy_is_rejected() -> TestResult {
    let cfg = config_from("[simple_supervisor]\non_error = sometimes\n");

    match UpdaterSettings::from_config(&cfg) {
        Err(SupervisorError::Config(msg)) => assert!(msg.contains("on_error")),
        other => panic!("expected Config error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn top_override_wins_and_missing_top_is_an_error() -> TestResult {
    let settings = UpdaterSettings::from_config(&config_from("[simple_supervisor]\n"))?;

    assert!(settings.resolve_top(None).is_err());
    assert_eq!(
        settings.resolve_top(Some("/elsewhere".into()))?,
        std::path::PathBuf::from("/elsewhere")
    );
    assert!(settings.require_database().is_err());
    Ok(())
}
