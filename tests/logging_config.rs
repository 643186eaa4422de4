// tests/logging_config.rs

mod common;
use crate::common::config_from;

use std::error::Error;
use std::path::PathBuf;

use tracing::Level;

use simple_supervisor::logging::{LogTarget, LoggingConfig, parse_python_level};

type TestResult = Result<(), Box<dyn Error>>;

const FULL: &str = r#"
[simple_supervisor]
top = /srv

[loggers]
keys = root

[handlers]
keys = console

[formatters]
keys = plain

[logger_root]
level = DEBUG
handlers = console

[handler_console]
class = StreamHandler
level = INFO
formatter = plain
args = (sys.stdout,)

[formatter_plain]
format = %(levelname)s %(message)s
"#;

#[test]
fn no_logging_sections_means_no_logging_config() -> TestResult {
    let cfg = config_from("[simple_supervisor]\n\n[loggers]\nkeys = root\n");
    assert_eq!(LoggingConfig::from_config(&cfg)?, None);
    Ok(())
}

#[test]
fn full_logging_sections_are_interpreted() -> TestResult {
    let logging = LoggingConfig::from_config(&config_from(FULL))?.ok_or("expected config")?;

    // Handler level is stricter than the root logger's.
    assert_eq!(logging.level, Some(Level::INFO));
    assert_eq!(logging.target, LogTarget::Stdout);
    assert!(!logging.with_time);
    assert!(!logging.with_target);
    Ok(())
}

#[test]
fn file_handler_writes_to_the_named_file() -> TestResult {
    let cfg = config_from(
        r#"
[loggers]
keys = root

[handlers]
keys = file

[formatters]
keys = stamped

[logger_root]
level = WARNING
handlers = file

[handler_file]
class = FileHandler
formatter = stamped
args = ('/var/log/update_repos.log', 'a')

[formatter_stamped]
format = %(asctime)s %(name)s %(message)s
"#,
    );
    let logging = LoggingConfig::from_config(&cfg)?.ok_or("expected config")?;

    assert_eq!(logging.level, Some(Level::WARN));
    assert_eq!(logging.target, LogTarget::File(PathBuf::from("/var/log/update_repos.log")));
    assert!(logging.with_time);
    assert!(logging.with_target);
    Ok(())
}

#[test]
fn level_names_follow_ini_logging_conventions() -> TestResult {
    assert_eq!(parse_python_level("critical")?, Level::ERROR);
    assert_eq!(parse_python_level("WARNING")?, Level::WARN);
    assert_eq!(parse_python_level("NOTSET")?, Level::TRACE);
    assert!(parse_python_level("LOUD").is_err());
    Ok(())
}
