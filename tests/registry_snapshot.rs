// tests/registry_snapshot.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use xtatus::engine::Registry;
use xtatus_test_utils::builders::registry_of;

fn run_output(tag: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{tag}-{i}")).collect()
}

#[test]
fn snapshot_never_observes_a_mixed_buffer() {
    let registry = registry_of(&[
        (Duration::from_secs(1), "./a.sh"),
        (Duration::from_secs(1), "./b.sh"),
    ]);
    let run_a = run_output("a", 200);
    let run_b = run_output("b", 150);
    let stop = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = [(run_a.clone(), run_b.clone()), (run_b.clone(), run_a.clone())]
        .into_iter()
        .enumerate()
        .map(|(idx, (first, second))| {
            let registry: Arc<Registry> = Arc::clone(&registry);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    registry.publish_success(idx, first.clone());
                    registry.publish_success(idx, second.clone());
                }
            })
        })
        .collect();

    let reader = {
        let registry = Arc::clone(&registry);
        let (run_a, run_b) = (run_a.clone(), run_b.clone());
        thread::spawn(move || {
            for _ in 0..2_000 {
                for task in registry.snapshot() {
                    let ok = (task.lines.is_empty() && !task.has_run)
                        || task.lines == run_a
                        || task.lines == run_b;
                    assert!(ok, "snapshot for {:?} mixed two runs", task.path);
                }
            }
        })
    };

    let reader_result = reader.join();
    stop.store(true, Ordering::Relaxed);
    for w in writers {
        w.join().expect("writer panicked");
    }
    reader_result.expect("reader saw a torn buffer");

    let snap = registry.snapshot();
    assert!(snap.iter().all(|t| t.has_run));
}

#[test]
fn snapshot_preserves_task_order_and_paths() {
    let registry = registry_of(&[
        (Duration::from_secs(5), "./clock.sh"),
        (Duration::from_secs(30), "./battery.sh"),
        (Duration::from_secs(60), "./weather.sh"),
    ]);
    registry.publish_success(2, vec!["sunny".into()]);
    registry.publish_success(0, vec!["12:00".into()]);

    let snap = registry.snapshot();
    let paths: Vec<_> = snap.iter().map(|t| t.path.to_string_lossy().into_owned()).collect();
    assert_eq!(paths, ["./clock.sh", "./battery.sh", "./weather.sh"]);
    assert_eq!(snap[0].lines, ["12:00"]);
    assert!(!snap[1].has_run);
    assert_eq!(snap[2].lines, ["sunny"]);
}

#[test]
fn successful_empty_output_still_marks_has_run() {
    let registry = registry_of(&[(Duration::from_secs(1), "./quiet.sh")]);
    registry.publish_success(0, Vec::new());
    let snap = registry.snapshot();
    assert!(snap[0].has_run);
    assert!(snap[0].lines.is_empty());
}
