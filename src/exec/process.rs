// src/exec/process.rs

//! Production runner backed by `tokio::process::Command`.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use super::backend::{RunError, RunFuture, RunResult, Runner};

/// Runs executables as child processes, bounded by a timeout.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Runner for ProcessRunner {
    fn run<'a>(&'a self, path: &'a Path) -> RunFuture<'a> {
        Box::pin(run_process(path, self.timeout))
    }
}

/// Spawn `path`, read its stdout to EOF, then wait for it to exit.
///
/// Stdout is read before waiting so a chatty child never blocks on a full
/// pipe. Stderr is drained in the background and logged at debug.
async fn run_process(path: &Path, timeout: Duration) -> RunResult {
    debug!(path = %path.display(), "starting run");

    let mut child = Command::new(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| RunError::Launch {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(stderr) = child.stderr.take() {
        let shown = path.display().to_string();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(path = %shown, "stderr: {}", line);
            }
        });
    }

    let mut stdout = child.stdout.take();
    let capture = async {
        let mut buf = Vec::new();
        if let Some(out) = stdout.as_mut() {
            out.read_to_end(&mut buf).await?;
        }
        let status = child.wait().await?;
        Ok::<_, std::io::Error>((status, buf))
    };

    let outcome = tokio::time::timeout(timeout, capture).await;
    let (status, buf) = match outcome {
        Ok(Ok(done)) => done,
        Ok(Err(source)) => {
            return Err(RunError::Wait {
                path: path.to_path_buf(),
                source,
            });
        }
        Err(_elapsed) => {
            if let Err(e) = child.kill().await {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to kill timed-out child process"
                );
            }
            return Err(RunError::Timeout {
                path: path.to_path_buf(),
                after: timeout,
            });
        }
    };

    debug!(
        path = %path.display(),
        exit_code = ?status.code(),
        bytes = buf.len(),
        "run finished"
    );

    if !status.success() {
        return Err(RunError::Exit {
            path: path.to_path_buf(),
            code: status.code(),
        });
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
