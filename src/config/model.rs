// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::FirstRunPolicy;

/// Default upper bound on a single run of a task's executable.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(60);

/// Default period between two renderer frames.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(1);

/// Raw configuration as read from disk, before validation.
///
/// The TOML format maps onto it directly:
///
/// ```toml
/// [config]
/// run_timeout = "30s"
/// first_run = "immediate"
/// refresh = "1s"
///
/// [[task]]
/// interval = 5
/// path = "./scripts/battery.sh"
/// ```
///
/// The line format (`<interval> <path>` per line) only fills `task`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: RawConfigSection,

    #[serde(default)]
    pub task: Vec<RawTask>,
}

/// `[config]` section. Durations are kept as strings until validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigSection {
    #[serde(default)]
    pub run_timeout: Option<String>,

    #[serde(default)]
    pub first_run: FirstRunPolicy,

    #[serde(default)]
    pub refresh: Option<String>,
}

/// One `[[task]]` entry (or one line of the line format).
#[derive(Debug, Clone, Deserialize)]
pub struct RawTask {
    pub interval: RawInterval,
    pub path: String,
}

/// An interval is either a plain number of seconds or a duration string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawInterval {
    Seconds(u64),
    Text(String),
}

/// Immutable description of one periodic job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    /// Time between two run starts. Always non-zero.
    pub interval: Duration,
    /// Executable launched with no arguments.
    pub path: PathBuf,
}

impl TaskDescriptor {
    pub fn new(interval: Duration, path: impl Into<PathBuf>) -> Self {
        Self {
            interval,
            path: path.into(),
        }
    }
}

/// Validated runtime settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSection {
    pub run_timeout: Duration,
    pub first_run: FirstRunPolicy,
    pub refresh: Duration,
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            run_timeout: DEFAULT_RUN_TIMEOUT,
            first_run: FirstRunPolicy::default(),
            refresh: DEFAULT_REFRESH,
        }
    }
}

/// Validated configuration: settings plus the ordered, non-empty task list.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`), so
/// holding one means every invariant has been checked.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    tasks: Vec<TaskDescriptor>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, tasks: Vec<TaskDescriptor>) -> Self {
        Self { config, tasks }
    }

    /// Tasks in configuration order.
    pub fn tasks(&self) -> &[TaskDescriptor] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<TaskDescriptor> {
        self.tasks
    }
}
