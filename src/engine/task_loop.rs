// src/engine/task_loop.rs

//! The per-task timing loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

use crate::exec::Runner;
use crate::types::FirstRunPolicy;

use super::LoopOptions;
use super::buffer::split_lines;
use super::registry::Registry;

/// Stand-in deadline for intervals too large to add to `Instant::now()`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Drive task `idx` until shutdown is signalled.
///
/// - The first run fires immediately, or after one interval with
///   [`FirstRunPolicy::AfterInterval`].
/// - Later runs start one interval after the previous run started. A run that
///   overruns its interval is followed by the next one straight away, and the
///   cadence restarts from there; missed ticks are not replayed.
/// - Shutdown is observed only between runs. An in-flight run always
///   completes and publishes.
pub async fn run_task_loop(
    idx: usize,
    registry: Arc<Registry>,
    runner: Arc<dyn Runner>,
    options: LoopOptions,
    mut shutdown: watch::Receiver<bool>,
) {
    let Some(task) = registry.task(idx).cloned() else {
        warn!(idx, "no task at this index; loop not started");
        return;
    };

    let start = match options.first_run {
        FirstRunPolicy::Immediate => Instant::now(),
        FirstRunPolicy::AfterInterval => {
            let now = Instant::now();
            now.checked_add(task.interval)
                .unwrap_or_else(|| now + FAR_FUTURE)
        }
    };
    let mut ticker = interval_at(start, task.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        task = idx,
        path = %task.path.display(),
        interval = ?task.interval,
        first_run = ?options.first_run,
        "task loop started"
    );

    loop {
        if *shutdown.borrow_and_update() {
            break;
        }

        tokio::select! {
            biased;

            changed = shutdown.changed() => {
                // A dropped sender means nobody can stop us any more; treat
                // it the same as an explicit shutdown.
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }

            _ = ticker.tick() => {}
        }

        run_and_publish(idx, &registry, runner.as_ref()).await;
    }

    info!(task = idx, path = %task.path.display(), "task loop stopped");
}

/// Perform one run of task `idx` and publish the result.
///
/// Returns `true` when the run succeeded and the buffer was replaced.
pub async fn run_and_publish(idx: usize, registry: &Registry, runner: &dyn Runner) -> bool {
    let Some(task) = registry.task(idx) else {
        return false;
    };

    registry.record_attempt(idx);

    match runner.run(&task.path).await {
        Ok(text) => {
            let lines = split_lines(&text);
            debug!(
                task = idx,
                path = %task.path.display(),
                lines = lines.len(),
                "run succeeded; publishing output"
            );
            registry.publish_success(idx, lines);
            true
        }
        Err(err) => {
            warn!(
                task = idx,
                path = %task.path.display(),
                error = %err,
                "run failed; keeping previous output"
            );
            registry.record_failure(idx, err.to_string());
            false
        }
    }
}
