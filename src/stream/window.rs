// src/stream/window.rs
//! Bounded per-channel sample history

use std::collections::VecDeque;

/// Default window capacity: 6000 samples ≈ 30 s at 200 Hz.
pub const DEFAULT_WINDOW_CAPACITY: usize = 6000;

/// Bounded ordered buffer of `(sequence, value)` pairs for one channel.
///
/// FIFO: the oldest entry is evicted when a push would exceed capacity.
/// Owned exclusively by the reconstructor; consumers read snapshots through
/// [`super::WindowView`].
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    entries: VecDeque<(u64, i8)>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create an empty window. A zero capacity is bumped to 1 so a push
    /// always retains at least the newest sample.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one sample, evicting the oldest entry on overflow.
    pub fn push(&mut self, sequence: u64, value: i8) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((sequence, value));
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest retained entry.
    pub fn oldest(&self) -> Option<(u64, i8)> {
        self.entries.front().copied()
    }

    /// Newest retained entry.
    pub fn newest(&self) -> Option<(u64, i8)> {
        self.entries.back().copied()
    }

    /// Copy of the retained entries in arrival order.
    pub fn snapshot(&self) -> Vec<(u64, i8)> {
        self.entries.iter().copied().collect()
    }

    /// Drop all retained samples.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}
