// tests/process_runner.rs
//
// Real child processes: capture, failure taxonomy, timeouts, and an
// end-to-end engine run.

#![cfg(unix)]

use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use xtatus::engine::{Engine, LoopOptions, Registry, run_once, split_lines};
use xtatus::exec::{ProcessRunner, RunError, Runner};
use xtatus::config::TaskDescriptor;
use xtatus_test_utils::scripts::ScriptDir;
use xtatus_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn runner() -> ProcessRunner {
    ProcessRunner::new(Duration::from_secs(5))
}

#[tokio::test]
async fn captures_every_stdout_line_in_order() -> TestResult {
    init_tracing();
    let dir = ScriptDir::new();
    let script = dir.script("lines.sh", "printf 'one\\ntwo\\n\\nfour\\n'");

    let text = with_timeout(runner().run(&script)).await?;
    assert_eq!(text, "one\ntwo\n\nfour\n");
    assert_eq!(split_lines(&text), vec!["one", "two", "", "four"]);
    Ok(())
}

#[tokio::test]
async fn missing_trailing_newline_is_not_padded() -> TestResult {
    init_tracing();
    let dir = ScriptDir::new();
    let script = dir.script("noeol.sh", "printf 'a\\nb'");

    let text = with_timeout(runner().run(&script)).await?;
    assert_eq!(split_lines(&text), vec!["a", "b"]);
    Ok(())
}

#[tokio::test]
async fn large_output_does_not_deadlock() -> TestResult {
    init_tracing();
    let dir = ScriptDir::new();
    // Well past a pipe buffer, on both streams.
    let script = dir.script(
        "big.sh",
        "i=0; while [ $i -lt 5000 ]; do echo \"line $i\"; echo \"err $i\" >&2; i=$((i+1)); done",
    );

    let text = with_timeout(runner().run(&script)).await?;
    let lines = split_lines(&text);
    assert_eq!(lines.len(), 5000);
    assert_eq!(lines[0], "line 0");
    assert_eq!(lines[4999], "line 4999");
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_is_an_exit_failure() {
    init_tracing();
    let dir = ScriptDir::new();
    let script = dir.script("fail.sh", "echo partial; exit 3");

    match with_timeout(runner().run(&script)).await {
        Err(RunError::Exit { code, .. }) => assert_eq!(code, Some(3)),
        other => panic!("expected Exit failure, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_executable_is_a_launch_failure() {
    init_tracing();
    let dir = ScriptDir::new();
    let missing = dir.path().join("does-not-exist.sh");

    match with_timeout(runner().run(&missing)).await {
        Err(RunError::Launch { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Launch failure, got {other:?}"),
    }
}

#[tokio::test]
async fn hung_child_times_out() {
    init_tracing();
    let dir = ScriptDir::new();
    let script = dir.script("hang.sh", "exec sleep 30");
    let runner = ProcessRunner::new(Duration::from_millis(200));
    assert_eq!(runner.timeout(), Duration::from_millis(200));

    match with_timeout(runner.run(&script)).await {
        Err(RunError::Timeout { after, .. }) => assert_eq!(after, Duration::from_millis(200)),
        other => panic!("expected Timeout failure, got {other:?}"),
    }
}

fn two_task_registry(ok: &Path, fail: &Path) -> Arc<Registry> {
    Arc::new(
        Registry::new(vec![
            TaskDescriptor::new(Duration::from_secs(1), ok),
            TaskDescriptor::new(Duration::from_secs(1), fail),
        ])
        .expect("registry"),
    )
}

#[tokio::test]
async fn ok_and_failing_task_end_to_end() -> TestResult {
    init_tracing();
    let dir = ScriptDir::new();
    let ok = dir.script("echo-ok", "echo ready");
    let fail = dir.script("false", "exit 1");

    let registry = two_task_registry(&ok, &fail);
    let engine = Engine::start(
        Arc::clone(&registry),
        Arc::new(runner()),
        LoopOptions::default(),
    );

    tokio::time::sleep(Duration::from_millis(1500)).await;
    engine.shutdown().await?;

    let snap = registry.snapshot();
    assert_eq!(snap[0].path, ok);
    assert_eq!(snap[0].lines, vec!["ready"]);
    assert!(snap[0].has_run);
    assert_eq!(snap[1].path, fail);
    assert!(snap[1].lines.is_empty());
    assert!(!snap[1].has_run);

    let stats = registry.stats();
    assert!(stats[1].attempts >= 1);
    assert_eq!(stats[1].attempts, stats[1].failures);
    Ok(())
}

#[tokio::test]
async fn run_once_runs_each_task_exactly_once() -> TestResult {
    init_tracing();
    let dir = ScriptDir::new();
    let ok = dir.script("echo-ok", "echo ready");
    let fail = dir.script("false", "exit 1");

    let registry = two_task_registry(&ok, &fail);
    let succeeded = with_timeout(run_once(&registry, Arc::new(runner()))).await?;

    assert_eq!(succeeded, 1);
    let stats = registry.stats();
    assert_eq!(stats[0].attempts, 1);
    assert_eq!(stats[1].attempts, 1);
    assert_eq!(registry.snapshot()[0].lines, vec!["ready"]);
    Ok(())
}
