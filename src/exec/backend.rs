// src/exec/backend.rs

//! Pluggable runner abstraction.
//!
//! Task loops talk to a `Runner` instead of spawning processes themselves.
//! Production code uses [`ProcessRunner`](super::ProcessRunner); tests can
//! provide an implementation that returns scripted output without touching
//! the OS.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

/// Why a single run did not produce output.
#[derive(Debug, Error)]
pub enum RunError {
    /// The executable could not be started at all.
    #[error("could not launch {path:?}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but did not exit with status 0. `code` is `None` when
    /// it was terminated by a signal.
    #[error("{path:?} exited with status {}", describe_code(.code))]
    Exit { path: PathBuf, code: Option<i32> },

    /// Termination (or the output stream) could not be observed.
    #[error("could not wait for {path:?}: {source}")]
    Wait {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run exceeded its time budget and the child was killed.
    #[error("{path:?} timed out after {after:?}")]
    Timeout { path: PathBuf, after: Duration },
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

/// Outcome of one run: captured stdout text, or the failure reason.
pub type RunResult = std::result::Result<String, RunError>;

/// Boxed future returned by [`Runner::run`].
pub type RunFuture<'a> = Pin<Box<dyn Future<Output = RunResult> + Send + 'a>>;

/// Trait abstracting how a task's executable is run.
pub trait Runner: Send + Sync {
    /// Run `path` once with no arguments and capture its stdout.
    ///
    /// Must not retry; retry policy belongs to the task loop.
    fn run<'a>(&'a self, path: &'a Path) -> RunFuture<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_error_mentions_code_or_signal() {
        let err = RunError::Exit {
            path: PathBuf::from("./x.sh"),
            code: Some(3),
        };
        assert!(err.to_string().ends_with("exited with status 3"));

        let err = RunError::Exit {
            path: PathBuf::from("./x.sh"),
            code: None,
        };
        assert!(err.to_string().ends_with("exited with status signal"));
    }
}
