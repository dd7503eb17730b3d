// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info};

use crate::errors::{Result, XtatusError};
use crate::exec::Runner;

use super::LoopOptions;
use super::registry::Registry;
use super::task_loop::{run_and_publish, run_task_loop};

/// Owns one loop per registry task and the shutdown signal they share.
///
/// Loops are Tokio tasks; a slow or hung child only stalls its own loop.
/// Dropping an `Engine` without calling [`Engine::shutdown`] signals the
/// loops to stop but does not wait for them.
pub struct Engine {
    registry: Arc<Registry>,
    handles: Vec<JoinHandle<()>>,
    shutdown_tx: watch::Sender<bool>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("tasks", &self.registry.len())
            .field("shutdown", &*self.shutdown_tx.borrow())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Spawn a loop for every task in `registry`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(registry: Arc<Registry>, runner: Arc<dyn Runner>, options: LoopOptions) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handles = (0..registry.len())
            .map(|idx| {
                tokio::spawn(run_task_loop(
                    idx,
                    Arc::clone(&registry),
                    Arc::clone(&runner),
                    options,
                    shutdown_rx.clone(),
                ))
            })
            .collect();

        info!(tasks = registry.len(), "engine started");

        Self {
            registry,
            handles,
            shutdown_tx,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Ask every loop to stop at its next cycle boundary.
    pub fn request_shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Wait for every loop to exit.
    ///
    /// Only returns once shutdown has been requested (loops never stop on
    /// their own). All loops are joined even if one of them panicked; the
    /// first panic is reported as the error.
    pub async fn join(mut self) -> Result<()> {
        let mut first_err = None;

        for (idx, handle) in self.handles.drain(..).enumerate() {
            match handle.await {
                Ok(()) => debug!(task = idx, "loop joined"),
                Err(e) => {
                    error!(task = idx, error = %e, "task loop ended abnormally");
                    first_err.get_or_insert(e);
                }
            }
        }

        match first_err {
            None => {
                info!("all task loops joined");
                Ok(())
            }
            Some(e) => Err(XtatusError::Other(anyhow!("task loop failed: {e}"))),
        }
    }

    /// Request shutdown and wait for every loop, including any run still in
    /// flight.
    pub async fn shutdown(self) -> Result<()> {
        self.request_shutdown();
        self.join().await
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown_tx.send_replace(true);
    }
}

/// Run every task exactly once, concurrently, and publish the results.
///
/// Returns the number of successful runs.
pub async fn run_once(registry: &Arc<Registry>, runner: Arc<dyn Runner>) -> Result<usize> {
    let mut set = JoinSet::new();

    for idx in 0..registry.len() {
        let registry = Arc::clone(registry);
        let runner = Arc::clone(&runner);
        set.spawn(async move { run_and_publish(idx, &registry, runner.as_ref()).await });
    }

    let mut succeeded = 0;
    while let Some(joined) = set.join_next().await {
        let ok = joined.map_err(|e| XtatusError::Other(anyhow!("one-shot run failed: {e}")))?;
        if ok {
            succeeded += 1;
        }
    }

    info!(succeeded, tasks = registry.len(), "one-shot run complete");
    Ok(succeeded)
}
