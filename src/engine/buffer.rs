// src/engine/buffer.rs

//! Per-task output state guarded by the registry lock.

use tokio::time::Instant;

/// Most recent successful output of one task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    pub lines: Vec<String>,
    pub has_run: bool,
}

impl OutputBuffer {
    /// Replace the whole buffer with a new run's output.
    pub fn replace(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.has_run = true;
    }
}

/// Counters kept alongside each buffer. They never influence what the
/// consumer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub attempts: u64,
    pub failures: u64,
    pub last_success: Option<Instant>,
    pub last_error: Option<String>,
}

/// Split captured stdout into lines.
///
/// A single trailing newline terminates the last line rather than starting
/// an empty one, so `"a\nb\n"` and `"a\nb"` both give two lines while
/// `"a\n\n"` keeps its empty second line. `\r\n` endings are accepted.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}
