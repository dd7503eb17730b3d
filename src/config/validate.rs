// src/config/validate.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::config::model::{
    ConfigFile, ConfigSection, RawConfigFile, RawConfigSection, RawInterval, RawTask,
    TaskDescriptor, DEFAULT_REFRESH, DEFAULT_RUN_TIMEOUT,
};
use crate::errors::{Result, XtatusError};
use crate::types::parse_duration;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = XtatusError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_tasks(&raw)?;
        let config = validate_config_section(&raw.config)?;
        let tasks = raw
            .task
            .iter()
            .enumerate()
            .map(|(idx, task)| validate_task(idx, task))
            .collect::<Result<Vec<_>>>()?;
        Ok(ConfigFile::new_unchecked(config, tasks))
    }
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(XtatusError::ConfigError(
            "config must contain at least one task".to_string(),
        ));
    }
    Ok(())
}

fn validate_config_section(raw: &RawConfigSection) -> Result<ConfigSection> {
    let run_timeout = positive_duration("[config].run_timeout", raw.run_timeout.as_deref())?
        .unwrap_or(DEFAULT_RUN_TIMEOUT);
    let refresh =
        positive_duration("[config].refresh", raw.refresh.as_deref())?.unwrap_or(DEFAULT_REFRESH);

    Ok(ConfigSection {
        run_timeout,
        first_run: raw.first_run,
        refresh,
    })
}

fn positive_duration(field: &str, value: Option<&str>) -> Result<Option<Duration>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let dur = parse_duration(value)
        .map_err(|e| XtatusError::ConfigError(format!("{field}: {e}")))?;
    if dur.is_zero() {
        return Err(XtatusError::ConfigError(format!(
            "{field} must be greater than zero (got '{value}')"
        )));
    }
    Ok(Some(dur))
}

fn validate_task(idx: usize, task: &RawTask) -> Result<TaskDescriptor> {
    let number = idx + 1;

    if task.path.trim().is_empty() {
        return Err(XtatusError::ConfigError(format!(
            "task #{number} has an empty path"
        )));
    }

    let interval = match &task.interval {
        RawInterval::Seconds(secs) => Duration::from_secs(*secs),
        RawInterval::Text(text) => parse_duration(text).map_err(|e| {
            XtatusError::ConfigError(format!(
                "task #{number} ({}) has an invalid interval: {e}",
                task.path
            ))
        })?,
    };

    if interval.is_zero() {
        return Err(XtatusError::ConfigError(format!(
            "task #{number} ({}) must have an interval greater than zero",
            task.path
        )));
    }

    Ok(TaskDescriptor {
        interval,
        path: PathBuf::from(task.path.trim()),
    })
}
