//! Fixed-capacity, oldest-first logs.
//!
//! Used for the audit log, the operation log, threat transitions, and the
//! context snapshot archive. Once full, every push evicts the oldest entry.

use std::collections::VecDeque;

use serde::Serialize;

/// A ring buffer that keeps only the most recent `capacity` entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RingLog<T> {
    #[serde(skip)]
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> RingLog<T> {
    /// Create an empty log. A capacity of zero retains nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    /// Append an entry, evicting the oldest if the log is full.
    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The most recent `n` entries, oldest first.
    pub fn latest(&self, n: usize) -> impl Iterator<Item = &T> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }

    /// The newest entry.
    pub fn last(&self) -> Option<&T> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_first() {
        let mut log = RingLog::with_capacity(3);
        for i in 1..=5 {
            log.push(i);
        }
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(log.last(), Some(&5));
    }

    #[test]
    fn latest_keeps_order() {
        let mut log = RingLog::with_capacity(10);
        for i in 1..=7 {
            log.push(i);
        }
        assert_eq!(log.latest(3).copied().collect::<Vec<_>>(), vec![5, 6, 7]);
        assert_eq!(log.latest(50).count(), 7);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let mut log = RingLog::with_capacity(0);
        log.push("x");
        assert!(log.is_empty());
    }
}
