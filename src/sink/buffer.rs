//! In-memory line recorder
//!
//! A thread-safe ring buffer of written lines. Wrap it in [`Sink::buffer`](super::Sink::buffer)
//! to capture what a logger writes, e.g. to show recent lines in a UI or to inspect them in tests.

use std::collections::VecDeque;
use std::sync::RwLock;

/// Default number of lines kept by [`LogBuffer::default`]
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Thread-safe ring buffer of written lines
#[derive(Debug)]
pub struct LogBuffer {
    lines: RwLock<VecDeque<String>>,
    max_lines: usize,
}

impl LogBuffer {
    /// Create a buffer that keeps at most `max_lines` lines, dropping the oldest
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: RwLock::new(VecDeque::with_capacity(max_lines.min(1024))),
            max_lines,
        }
    }

    /// Record one write. A single trailing newline is stripped.
    pub fn push(&self, line: &str) {
        let line = line.strip_suffix('\n').unwrap_or(line);
        if let Ok(mut lines) = self.lines.write() {
            if lines.len() >= self.max_lines {
                lines.pop_front();
            }
            if self.max_lines > 0 {
                lines.push_back(line.to_string());
            }
        }
    }

    /// All recorded lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .map(|l| l.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Recorded lines joined back together, each newline-terminated
    pub fn contents(&self) -> String {
        self.lines()
            .into_iter()
            .map(|mut line| {
                line.push('\n');
                line
            })
            .collect()
    }

    /// Number of recorded lines
    pub fn len(&self) -> usize {
        self.lines.read().map(|l| l.len()).unwrap_or(0)
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all recorded lines
    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.write() {
            lines.clear();
        }
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
