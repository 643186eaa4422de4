// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `[logger_root] level` from the INI logging sections (if present)
//! 3. `SIMPLE_SUPERVISOR_LOG` environment variable (e.g. "info", "debug")
//! 4. default to `info`
//!
//! The INI logging sections follow the familiar `[loggers]` / `[handlers]` /
//! `[formatters]` layout. They are parsed into a [`LoggingConfig`] and passed
//! explicitly to [`init_logging`]; library code only emits events.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{LazyLock, Mutex};

use anyhow::{Context, Result, anyhow};
use regex::Regex;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;
use crate::config::{Config, Section};

pub const LOG_ENV_VAR: &str = "SIMPLE_SUPERVISOR_LOG";

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).expect("valid regex"));

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    #[default]
    Stderr,
    Stdout,
    File(PathBuf),
}

/// Logging settings read from the INI logging sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Option<Level>,
    pub target: LogTarget,
    pub with_time: bool,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            target: LogTarget::Stderr,
            with_time: true,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    pub const SECTIONS: [&'static str; 3] = ["loggers", "handlers", "formatters"];

    /// Read logging settings if all three logging sections are present.
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        if !Self::SECTIONS.iter().all(|name| config.has_section(name)) {
            return Ok(None);
        }

        let mut logging = LoggingConfig::default();
        let root = config.section("logger_root");

        if let Some(level) = root.and_then(|s| s.get("level")) {
            logging.level = Some(parse_python_level(level)?);
        }

        let handler_name = root
            .and_then(|s| s.get("handlers"))
            .and_then(first_name)
            .or_else(|| {
                config
                    .section("handlers")
                    .and_then(|s| s.get("keys"))
                    .and_then(first_name)
            });

        let handler = handler_name.and_then(|name| config.section(&format!("handler_{name}")));
        if let Some(handler) = handler {
            logging.target = handler_target(handler)?;

            if let Some(level) = handler.get("level") {
                let handler_level = parse_python_level(level)?;
                // A handler can only drop records, never add them.
                logging.level = Some(match logging.level {
                    Some(root_level) => root_level.min(handler_level),
                    None => handler_level,
                });
            }

            let format = handler
                .get("formatter")
                .and_then(|name| config.section(&format!("formatter_{}", name.trim())))
                .and_then(|s| s.get("format"));
            if let Some(format) = format {
                logging.with_time = format.contains("%(asctime)");
                logging.with_target = format.contains("%(name)");
            }
        }

        Ok(Some(logging))
    }
}

fn first_name(list: &str) -> Option<String> {
    list.split(',')
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

fn handler_target(handler: &Section) -> Result<LogTarget> {
    let class = handler.get("class").unwrap_or("StreamHandler");
    let args = handler.get("args").unwrap_or("");

    if class.ends_with("FileHandler") {
        let path = QUOTED
            .captures(args)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| anyhow!("[{}] FileHandler needs a quoted file name in args", handler.name()))?;
        return Ok(LogTarget::File(PathBuf::from(path.as_str())));
    }

    if args.contains("sys.stdout") {
        Ok(LogTarget::Stdout)
    } else {
        Ok(LogTarget::Stderr)
    }
}

/// Parse a level name as used by INI logging configs.
pub fn parse_python_level(s: &str) -> Result<Level> {
    match s.trim().to_uppercase().as_str() {
        "NOTSET" | "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" | "CRITICAL" | "FATAL" => Ok(Level::ERROR),
        other => Err(anyhow!("unknown log level {other:?}")),
    }
}

/// Everything `init_logging` needs, gathered at startup.
#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    pub cli_level: Option<LogLevel>,
    pub file_config: Option<LoggingConfig>,
}

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(options: LoggingOptions) -> Result<()> {
    let file_config = options.file_config.unwrap_or_default();

    let explicit = options
        .cli_level
        .map(level_from_log_level)
        .or(file_config.level);
    let filter = match explicit {
        Some(level) => EnvFilter::default().add_directive(LevelFilter::from_level(level).into()),
        None => EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::INFO.into())),
    };

    let (writer, ansi) = match &file_config.target {
        LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogTarget::Stdout => (BoxMakeWriter::new(std::io::stdout), true),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(file_config.with_target)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(ansi)
        .with_writer(writer);

    let installed = if file_config.with_time {
        builder.try_init()
    } else {
        builder.without_time().try_init()
    };
    installed.map_err(|e| anyhow!("installing tracing subscriber: {e}"))
}

fn level_from_log_level(lvl: LogLevel) -> Level {
    match lvl {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}
