#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use xtatus::config::{ConfigFile, RawConfigFile, RawInterval, RawTask, TaskDescriptor};
use xtatus::engine::Registry;
use xtatus::types::FirstRunPolicy;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    /// Add a task with an interval in whole seconds, as the line format does.
    pub fn with_task(mut self, interval_secs: u64, path: &str) -> Self {
        self.config.task.push(RawTask {
            interval: RawInterval::Seconds(interval_secs),
            path: path.to_string(),
        });
        self
    }

    /// Add a task with a duration-string interval (e.g. `"250ms"`).
    pub fn with_task_every(mut self, interval: &str, path: &str) -> Self {
        self.config.task.push(RawTask {
            interval: RawInterval::Text(interval.to_string()),
            path: path.to_string(),
        });
        self
    }

    pub fn run_timeout(mut self, timeout: &str) -> Self {
        self.config.config.run_timeout = Some(timeout.to_string());
        self
    }

    pub fn first_run(mut self, policy: FirstRunPolicy) -> Self {
        self.config.config.first_run = policy;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a shared registry straight from `(interval, path)` pairs.
pub fn registry_of(tasks: &[(Duration, &str)]) -> Arc<Registry> {
    let tasks = tasks
        .iter()
        .map(|(interval, path)| TaskDescriptor::new(*interval, *path))
        .collect();
    Arc::new(Registry::new(tasks).expect("Failed to build registry"))
}
