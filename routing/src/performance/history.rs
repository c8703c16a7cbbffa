//! Fixed-capacity outcome history for a single profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::DEFAULT_HISTORY_CAPACITY;

/// One observed outcome sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub timestamp: DateTime<Utc>,
    /// Outcome score in [0, 1].
    pub score: f64,
    pub task_type: String,
    pub execution_time_ms: Option<u64>,
}

/// Ring buffer of the most recent records, oldest first.
///
/// Pushing into a full buffer evicts the oldest record, so the length never
/// exceeds the capacity.
#[derive(Debug, Clone)]
pub struct PerformanceHistory {
    records: VecDeque<PerformanceRecord>,
    capacity: usize,
    /// Every record ever pushed, including evicted ones.
    total_recorded: u64,
}

impl PerformanceHistory {
    /// Empty history holding at most `capacity` records (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        // Buffers larger than the default grow on demand.
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
            total_recorded: 0,
        }
    }

    /// Append a record, evicting the oldest when full.
    pub fn push(&mut self, record: PerformanceRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
        self.total_recorded += 1;
    }

    /// Mean score over the newest `window` records; `None` when empty.
    pub fn recent_average(&self, window: usize) -> Option<f64> {
        let take = window.max(1).min(self.records.len());
        if take == 0 {
            return None;
        }
        let sum: f64 = self.records.iter().rev().take(take).map(|r| r.score).sum();
        Some((sum / take as f64).clamp(0.0, 1.0))
    }

    /// Mean score over every stored record; `None` when empty.
    pub fn average(&self) -> Option<f64> {
        self.recent_average(self.records.len())
    }

    /// Newest record.
    pub fn latest(&self) -> Option<&PerformanceRecord> {
        self.records.back()
    }

    /// Stored records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &PerformanceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: f64, label: &str) -> PerformanceRecord {
        PerformanceRecord {
            timestamp: Utc::now(),
            score,
            task_type: label.to_string(),
            execution_time_ms: None,
        }
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut h = PerformanceHistory::with_capacity(3);
        for i in 0..5 {
            h.push(record(0.5, &format!("t{}", i)));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.total_recorded(), 5);
        let labels: Vec<&str> = h.records().map(|r| r.task_type.as_str()).collect();
        assert_eq!(labels, vec!["t2", "t3", "t4"]);
    }

    #[test]
    fn test_recent_average_uses_window() {
        let mut h = PerformanceHistory::with_capacity(50);
        for _ in 0..5 {
            h.push(record(0.0, "old"));
        }
        for _ in 0..2 {
            h.push(record(1.0, "new"));
        }
        assert_eq!(h.recent_average(2), Some(1.0));
        let avg = h.recent_average(4).unwrap();
        assert!((avg - 0.5).abs() < 1e-9);
        // Window larger than history averages everything.
        let all = h.recent_average(10).unwrap();
        assert!((all - 2.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut h = PerformanceHistory::with_capacity(usize::MAX);
        h.push(record(0.7, "only"));
        assert_eq!(h.len(), 1);
        assert_eq!(h.capacity(), usize::MAX);
        assert_eq!(h.latest().map(|r| r.score), Some(0.7));
    }

    #[test]
    fn test_empty_history() {
        let h = PerformanceHistory::with_capacity(0);
        assert_eq!(h.capacity(), 1);
        assert_eq!(h.recent_average(10), None);
        assert_eq!(h.average(), None);
        assert!(h.latest().is_none());
    }
}
