// src/display.rs

//! Terminal renderer: the consumer side of the registry.
//!
//! Each frame lists every task's lines in registry order, with a rule after
//! each task. Rendering always works on a snapshot, never under the lock.

use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use crate::engine::{Registry, TaskSnapshot};
use crate::errors::Result;

const RULE_WIDTH: usize = 40;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Format one frame from a snapshot.
///
/// Tasks that have never succeeded contribute only their rule.
pub fn render_frame(snapshot: &[TaskSnapshot]) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    let mut out = String::new();

    for task in snapshot {
        for line in &task.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');
    }

    out
}

/// Render a frame every `refresh` until the future is dropped.
///
/// A frame is only written when the snapshot differs from the last one
/// written. On a terminal the screen is cleared before each frame.
pub async fn run_renderer(registry: Arc<Registry>, refresh: Duration) -> Result<()> {
    let mut ticker = interval(refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let clear = std::io::stdout().is_terminal();
    let mut last: Option<Vec<TaskSnapshot>> = None;

    loop {
        ticker.tick().await;

        let snapshot = registry.snapshot();
        if last.as_ref() == Some(&snapshot) {
            continue;
        }

        let frame = render_frame(&snapshot);
        write_frame(&frame, clear)?;
        debug!(bytes = frame.len(), "frame rendered");
        last = Some(snapshot);
    }
}

fn write_frame(frame: &str, clear: bool) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if clear {
        stdout.write_all(CLEAR_SCREEN.as_bytes())?;
    }
    stdout.write_all(frame.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
