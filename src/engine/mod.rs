// src/engine/mod.rs

//! Periodic execution engine.
//!
//! - [`buffer`]: per-task output buffer and run counters.
//! - [`registry`]: the fixed task list, the single lock over all buffers,
//!   and the `snapshot()` read path used by consumers.
//! - [`task_loop`]: the timing loop each task runs in.
//! - [`runtime`]: the [`Engine`] that spawns, signals and joins loops.

use crate::types::FirstRunPolicy;

/// Options shared by every task loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopOptions {
    pub first_run: FirstRunPolicy,
}

pub mod buffer;
pub mod registry;
pub mod runtime;
pub mod task_loop;

pub use buffer::{OutputBuffer, RunStats, split_lines};
pub use registry::{Registry, TaskSnapshot};
pub use runtime::{Engine, run_once};
