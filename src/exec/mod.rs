// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] defines the `Runner` trait and the per-run error taxonomy.
//! - [`process`] is the `tokio::process` implementation used in production.

pub mod backend;
pub mod process;

pub use backend::{RunError, RunFuture, RunResult, Runner};
pub use process::ProcessRunner;
