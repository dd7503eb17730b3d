// src/engine/registry.rs

//! Shared task registry and the snapshot read path.
//!
//! The registry owns the fixed, ordered task list and a single mutex over
//! every task's [`OutputBuffer`] and [`RunStats`]. Writers (task loops) and
//! readers (the renderer) only ever copy data in or out while holding it.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;
use tracing::warn;

use crate::config::TaskDescriptor;
use crate::errors::{Result, XtatusError};

use super::buffer::{OutputBuffer, RunStats};

/// Point-in-time copy of one task's buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub path: PathBuf,
    pub lines: Vec<String>,
    pub has_run: bool,
}

#[derive(Debug, Default)]
struct TaskState {
    buffer: OutputBuffer,
    stats: RunStats,
}

#[derive(Debug)]
pub struct Registry {
    tasks: Vec<TaskDescriptor>,
    state: Mutex<Vec<TaskState>>,
}

impl Registry {
    /// Build a registry with one empty buffer per task.
    ///
    /// The task list is fixed from here on; an empty list is rejected.
    pub fn new(tasks: Vec<TaskDescriptor>) -> Result<Self> {
        if tasks.is_empty() {
            return Err(XtatusError::ConfigError(
                "cannot build a registry without tasks".to_string(),
            ));
        }
        let state = tasks.iter().map(|_| TaskState::default()).collect();
        Ok(Self {
            tasks,
            state: Mutex::new(state),
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[TaskDescriptor] {
        &self.tasks
    }

    pub fn task(&self, idx: usize) -> Option<&TaskDescriptor> {
        self.tasks.get(idx)
    }

    /// Copy every task's buffer, in task order, under one lock acquisition.
    ///
    /// Each entry is a whole buffer; entries for different tasks may have been
    /// written at different times.
    pub fn snapshot(&self) -> Vec<TaskSnapshot> {
        let state = self.lock();
        self.tasks
            .iter()
            .zip(state.iter())
            .map(|(task, st)| TaskSnapshot {
                path: task.path.clone(),
                lines: st.buffer.lines.clone(),
                has_run: st.buffer.has_run,
            })
            .collect()
    }

    /// Copy every task's run statistics, in task order.
    pub fn stats(&self) -> Vec<RunStats> {
        self.lock().iter().map(|st| st.stats.clone()).collect()
    }

    /// Count one run attempt for task `idx`.
    pub fn record_attempt(&self, idx: usize) {
        self.with_task(idx, |st| st.stats.attempts += 1);
    }

    /// Replace task `idx`'s buffer with a successful run's lines.
    ///
    /// Lines must already be split: nothing but the swap happens under the
    /// lock.
    pub fn publish_success(&self, idx: usize, lines: Vec<String>) {
        self.with_task(idx, move |st| {
            st.buffer.replace(lines);
            st.stats.last_success = Some(Instant::now());
        });
    }

    /// Record a failed run. The buffer keeps its previous content.
    pub fn record_failure(&self, idx: usize, reason: String) {
        self.with_task(idx, move |st| {
            st.stats.failures += 1;
            st.stats.last_error = Some(reason);
        });
    }

    fn with_task(&self, idx: usize, f: impl FnOnce(&mut TaskState)) {
        let mut state = self.lock();
        match state.get_mut(idx) {
            Some(st) => f(st),
            None => warn!(idx, tasks = self.tasks.len(), "update for unknown task index ignored"),
        }
    }

    // Every update is a plain assignment, so data behind a poisoned lock is
    // still whole.
    fn lock(&self) -> MutexGuard<'_, Vec<TaskState>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn registry() -> Registry {
        Registry::new(vec![
            TaskDescriptor::new(Duration::from_secs(1), "./a.sh"),
            TaskDescriptor::new(Duration::from_secs(2), "./b.sh"),
        ])
        .unwrap()
    }

    #[test]
    fn new_registry_is_empty_and_ordered() {
        let reg = registry();
        let snap = reg.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].path, PathBuf::from("./a.sh"));
        assert_eq!(snap[1].path, PathBuf::from("./b.sh"));
        assert!(snap.iter().all(|s| s.lines.is_empty() && !s.has_run));
    }

    #[test]
    fn empty_task_list_is_rejected() {
        assert!(Registry::new(Vec::new()).is_err());
    }

    #[test]
    fn failure_keeps_previous_output() {
        let reg = registry();
        reg.publish_success(1, vec!["one".into(), "two".into()]);
        reg.record_failure(1, "boom".into());

        let snap = reg.snapshot();
        assert_eq!(snap[1].lines, vec!["one", "two"]);
        assert!(snap[1].has_run);

        let stats = reg.stats();
        assert_eq!(stats[1].failures, 1);
        assert_eq!(stats[1].last_error.as_deref(), Some("boom"));
        assert!(stats[1].last_success.is_some());
    }

    #[test]
    fn failure_before_any_success_leaves_has_run_false() {
        let reg = registry();
        reg.record_attempt(0);
        reg.record_failure(0, "missing".into());
        let snap = reg.snapshot();
        assert!(!snap[0].has_run);
        assert!(snap[0].lines.is_empty());
        assert_eq!(reg.stats()[0].attempts, 1);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let reg = registry();
        reg.publish_success(7, vec!["nope".into()]);
        assert!(reg.snapshot().iter().all(|s| !s.has_run));
    }
}
