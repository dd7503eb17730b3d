use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use xtatus::exec::{RunError, RunFuture, RunResult, Runner};

/// What a scripted path does when run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeResponse {
    /// Exit 0 with this stdout.
    Output(String),
    /// Exit with this non-zero code.
    Exit(i32),
    /// Fail to launch (as if the file did not exist).
    Launch,
}

impl FakeResponse {
    pub fn output(text: &str) -> Self {
        FakeResponse::Output(text.to_string())
    }

    fn into_result(self, path: &Path) -> RunResult {
        match self {
            FakeResponse::Output(text) => Ok(text),
            FakeResponse::Exit(code) => Err(RunError::Exit {
                path: path.to_path_buf(),
                code: Some(code),
            }),
            FakeResponse::Launch => Err(RunError::Launch {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }
}

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct FakeCall {
    pub path: PathBuf,
    pub started: Instant,
    pub finished: Option<Instant>,
}

#[derive(Debug, Default)]
struct Script {
    queued: VecDeque<FakeResponse>,
    last: Option<FakeResponse>,
    delay: Duration,
}

/// A runner that:
/// - never spawns a process
/// - answers each path from a scripted list of responses (the last one
///   repeats forever)
/// - optionally sleeps (on the Tokio clock) before answering
/// - records when each call started and finished.
///
/// Unknown paths fail with `RunError::Launch`.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    scripts: Arc<Mutex<HashMap<PathBuf, Script>>>,
    calls: Arc<Mutex<Vec<FakeCall>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, responses: Vec<FakeResponse>) -> Self {
        {
            let mut scripts = self.scripts.lock().unwrap();
            let script = scripts.entry(PathBuf::from(path)).or_default();
            script.queued.extend(responses);
        }
        self
    }

    pub fn delay(self, path: &str, delay: Duration) -> Self {
        {
            let mut scripts = self.scripts.lock().unwrap();
            scripts.entry(PathBuf::from(path)).or_default().delay = delay;
        }
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Start times of every call for `path`, in call order.
    pub fn starts_for(&self, path: &str) -> Vec<Instant> {
        let path = Path::new(path);
        self.calls()
            .into_iter()
            .filter(|c| c.path == path)
            .map(|c| c.started)
            .collect()
    }

    /// Number of calls for `path` that have finished.
    pub fn finished_for(&self, path: &str) -> usize {
        let path = Path::new(path);
        self.calls()
            .iter()
            .filter(|c| c.path == path && c.finished.is_some())
            .count()
    }

    fn next_response(&self, path: &Path) -> (Duration, Option<FakeResponse>) {
        let mut scripts = self.scripts.lock().unwrap();
        let Some(script) = scripts.get_mut(path) else {
            return (Duration::ZERO, None);
        };
        if let Some(next) = script.queued.pop_front() {
            script.last = Some(next);
        }
        (script.delay, script.last.clone())
    }
}

impl Runner for FakeRunner {
    fn run<'a>(&'a self, path: &'a Path) -> RunFuture<'a> {
        Box::pin(async move {
            let call_idx = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(FakeCall {
                    path: path.to_path_buf(),
                    started: Instant::now(),
                    finished: None,
                });
                calls.len() - 1
            };

            let (delay, response) = self.next_response(path);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            self.calls.lock().unwrap()[call_idx].finished = Some(Instant::now());

            response.unwrap_or(FakeResponse::Launch).into_result(path)
        })
    }
}
