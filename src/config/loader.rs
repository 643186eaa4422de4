// src/config/loader.rs

use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use tracing::debug;

use crate::config::model::Config;
use crate::errors::{Result, SupervisorError};

/// Parser options shared by every load.
///
/// Quotes and backslashes are left alone (command strings are tokenised
/// later) and indented continuation lines extend the previous value.
fn parse_options() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        enabled_indented_mutiline_value: true,
        ..ParseOption::default()
    }
}

/// Fail with [`SupervisorError::MissingFile`] on the first path that does
/// not exist.
pub fn raise_for_missing<I, P>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SupervisorError::MissingFile(path.to_path_buf()));
        }
    }
    Ok(())
}

/// Load a single INI file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let ini = Ini::load_from_file_opt(path, parse_options())?;
    debug!(path = %path.display(), "loaded config file");
    Ok(from_ini(&ini))
}

/// Parse INI text; mostly useful for tests and embedded defaults.
pub fn load_from_str(contents: &str) -> Result<Config> {
    let ini = Ini::load_from_str_opt(contents, parse_options()).map_err(ini::Error::Parse)?;
    Ok(from_ini(&ini))
}

/// Load and merge every file in `paths`, later files overriding earlier ones.
///
/// All paths must exist; nothing is parsed if one is missing.
pub fn load_paths(paths: &[PathBuf]) -> Result<Config> {
    raise_for_missing(paths)?;

    let mut config = Config::new();
    for path in paths {
        config.merge(load_from_path(path)?);
    }
    Ok(config)
}

fn from_ini(ini: &Ini) -> Config {
    let mut config = Config::new();
    // Keys outside any section have no meaning here.
    for (name, props) in ini.iter() {
        let Some(name) = name else { continue };
        let section = config.section_mut(name);
        for (key, value) in props.iter() {
            section.insert(key, value);
        }
    }
    config
}
