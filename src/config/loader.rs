// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile, RawInterval, RawTask};
use crate::errors::{Result, XtatusError};

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// Files with a `.toml` extension are deserialized with `toml`; anything
/// else is read as the line format (`<interval-seconds> <path>` per line).
///
/// This does **not** perform semantic validation. Use [`load_and_validate`]
/// for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    if is_toml(path) {
        Ok(toml::from_str(&contents)?)
    } else {
        parse_line_config(&contents)
    }
}

/// Load a configuration file from path and validate it.
///
/// Fails when the file is unreadable, malformed, has no tasks, or any task
/// has a zero interval or an empty path.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Parse the line format.
///
/// Blank lines and lines starting with `#` are skipped. Every other line
/// must be exactly two whitespace-separated fields.
pub fn parse_line_config(contents: &str) -> Result<RawConfigFile> {
    let mut raw = RawConfigFile::default();

    for (idx, line) in contents.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [interval, path] = fields.as_slice() else {
            return Err(XtatusError::ConfigError(format!(
                "line {lineno}: expected `<interval> <path>`, got '{line}'"
            )));
        };

        let secs: u64 = interval.parse().map_err(|_| {
            XtatusError::ConfigError(format!(
                "line {lineno}: interval '{interval}' is not a whole number of seconds"
            ))
        })?;

        raw.task.push(RawTask {
            interval: RawInterval::Seconds(secs),
            path: path.to_string(),
        });
    }

    Ok(raw)
}

/// Default config location, matching the original program.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("scripts.config")
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
