//! In-game debug message feed
//!
//! Keeps the most recent messages for the on-screen debug panel and can
//! append every message to a file. Owned by the [`Game`](crate::Game) driver;
//! the file is flushed when the log is dropped.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Default number of messages kept for display
pub const DEFAULT_HISTORY: usize = 10;

/// One timestamped debug message
#[derive(Debug, Clone, PartialEq)]
pub struct DebugMessage {
    /// Seconds since the log was created
    pub elapsed: f32,
    pub text: String,
}

/// Bounded history of debug messages with an optional append-only file
#[derive(Debug)]
pub struct DebugLog {
    messages: VecDeque<DebugMessage>,
    capacity: usize,
    started: Instant,
    file: Option<BufWriter<File>>,
}

impl DebugLog {
    /// In-memory log keeping the last `capacity` messages
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
            started: Instant::now(),
            file: None,
        }
    }

    /// Log that also appends every message to `path` (created if missing,
    /// never truncated or rotated)
    pub fn with_file(capacity: usize, path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        log::info!("Writing debug messages to {}", path.display());
        let mut log = Self::new(capacity);
        log.file = Some(BufWriter::new(file));
        Ok(log)
    }

    /// Record a message. Oldest entries fall off once the history is full.
    pub fn push(&mut self, text: impl Into<String>) {
        let text = text.into();
        let elapsed = self.started.elapsed().as_secs_f32();
        log::debug!("{}", text);

        if let Some(file) = self.file.as_mut()
            && let Err(e) = writeln!(file, "[{:>9.3}] {}", elapsed, text)
        {
            log::warn!("Debug log file write failed, disabling file output: {}", e);
            self.file = None;
        }

        if self.capacity == 0 {
            return;
        }
        while self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(DebugMessage { elapsed, text });
    }

    /// Drop the on-screen history (the file is untouched)
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Retained messages, oldest first
    pub fn recent(&self) -> impl Iterator<Item = &DebugMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn flush(&mut self) {
        if let Some(file) = self.file.as_mut()
            && let Err(e) = file.flush()
        {
            log::warn!("Debug log flush failed: {}", e);
        }
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

impl Drop for DebugLog {
    fn drop(&mut self) {
        self.flush();
    }
}
