//! Bounded in-game message log.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Lines kept before the oldest is discarded.
pub const LOG_CAPACITY: usize = 9;

/// Ring of the most recent player-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    lines: VecDeque<String>,
}

impl EventLog {
    /// Empty log.
    pub fn new() -> Self {
        Self {
            lines: VecDeque::new(),
        }
    }

    /// Log seeded with the welcome banner.
    pub fn with_welcome() -> Self {
        let mut log = Self::new();
        log.push("Welcome to RUSTED.");
        log.push("Survival is the only objective.");
        log
    }

    /// Append a line, evicting the oldest when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == LOG_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Lines oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Most recent line.
    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Number of lines held.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
