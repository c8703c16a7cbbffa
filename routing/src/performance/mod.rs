//! Performance tracking — rolling outcome history per profile.
//!
//! Each profile id owns a fixed-capacity [`PerformanceHistory`] behind its
//! own mutex, so concurrent writers to the same id are serialized while
//! writers to different ids only contend on the brief table lookup.
//! Scores are averaged over the newest records and feed the scoring
//! engine's performance component.

mod history;

pub use history::{PerformanceHistory, PerformanceRecord};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

use crate::error::{RoutingError, RoutingResult};

/// Records kept per profile.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;
/// Newest records averaged into the live score.
pub const DEFAULT_SCORE_WINDOW: usize = 10;
/// Score reported for a profile with no history.
pub const NEUTRAL_SCORE: f64 = 0.5;

const SUCCESS_BASE: f64 = 0.7;
const FAILURE_BASE: f64 = 0.2;
const HIGH_CONFIDENCE_BONUS: f64 = 0.2;
const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;
const FAST_EXECUTION_BONUS: f64 = 0.1;
const FAST_EXECUTION_MS: u64 = 5000;

fn default_task_type() -> String {
    "unknown".to_string()
}

/// Outcome reported by the caller after running the selected worker.
///
/// Every field is optional on the wire; a missing `success` counts as a
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, alias = "execution_time")]
    pub execution_time_ms: Option<u64>,
    #[serde(default = "default_task_type")]
    pub task_type: String,
}

impl Default for TaskOutcome {
    fn default() -> Self {
        Self {
            success: false,
            confidence: None,
            execution_time_ms: None,
            task_type: default_task_type(),
        }
    }
}

impl TaskOutcome {
    /// Successful outcome with no extra signals.
    pub fn success() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// Failed outcome with no extra signals.
    pub fn failure() -> Self {
        Self::default()
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_execution_time_ms(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    pub fn with_task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = task_type.into();
        self
    }

    /// Sample score in [0, 1].
    pub fn score(&self) -> f64 {
        let mut score = if self.success {
            SUCCESS_BASE
        } else {
            FAILURE_BASE
        };
        if self
            .confidence
            .is_some_and(|c| c > HIGH_CONFIDENCE_THRESHOLD)
        {
            score += HIGH_CONFIDENCE_BONUS;
        }
        if self
            .execution_time_ms
            .is_some_and(|ms| ms < FAST_EXECUTION_MS)
        {
            score += FAST_EXECUTION_BONUS;
        }
        score.clamp(0.0, 1.0)
    }
}

/// Aggregate view of one profile's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Mean over the stored records.
    pub average_score: f64,
    /// Every outcome ever recorded, including evicted ones.
    pub total_executions: u64,
    pub most_recent_score: Option<f64>,
}

impl PerformanceSummary {
    fn from_history(history: &PerformanceHistory) -> Self {
        Self {
            average_score: history.average().unwrap_or(NEUTRAL_SCORE),
            total_executions: history.total_recorded(),
            most_recent_score: history.latest().map(|r| r.score),
        }
    }
}

type Bucket = Arc<Mutex<PerformanceHistory>>;

#[derive(Debug, Default)]
struct HistoryTable {
    /// Ids in first-seen order.
    order: Vec<String>,
    buckets: HashMap<String, Bucket>,
}

/// Rolling per-profile outcome history.
#[derive(Debug)]
pub struct PerformanceTracker {
    table: RwLock<HistoryTable>,
    capacity: usize,
    window: usize,
}

impl PerformanceTracker {
    /// Tracker with the default capacity (50) and score window (10).
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_HISTORY_CAPACITY, DEFAULT_SCORE_WINDOW)
    }

    /// Tracker with explicit limits (each at least 1).
    pub fn with_limits(capacity: usize, window: usize) -> Self {
        Self {
            table: RwLock::new(HistoryTable::default()),
            capacity: capacity.max(1),
            window: window.max(1),
        }
    }

    fn existing_bucket(&self, profile_id: &str) -> RoutingResult<Option<Bucket>> {
        let table = self
            .table
            .read()
            .map_err(|e| RoutingError::LockPoisoned(e.to_string()))?;
        Ok(table.buckets.get(profile_id).cloned())
    }

    fn bucket_or_create(&self, profile_id: &str) -> RoutingResult<Bucket> {
        if let Some(bucket) = self.existing_bucket(profile_id)? {
            return Ok(bucket);
        }
        let mut table = self
            .table
            .write()
            .map_err(|e| RoutingError::LockPoisoned(e.to_string()))?;
        // Another writer may have created it between the two locks.
        if let Some(bucket) = table.buckets.get(profile_id) {
            return Ok(bucket.clone());
        }
        let bucket = Arc::new(Mutex::new(PerformanceHistory::with_capacity(
            self.capacity,
        )));
        table.order.push(profile_id.to_string());
        table
            .buckets
            .insert(profile_id.to_string(), bucket.clone());
        debug!(profile_id, "Created performance history bucket");
        Ok(bucket)
    }

    /// Append an outcome for `profile_id`. Unknown ids get a fresh bucket.
    pub fn record(
        &self,
        profile_id: &str,
        outcome: &TaskOutcome,
    ) -> RoutingResult<PerformanceRecord> {
        let record = PerformanceRecord {
            timestamp: Utc::now(),
            score: outcome.score(),
            task_type: outcome.task_type.clone(),
            execution_time_ms: outcome.execution_time_ms,
        };

        let bucket = self.bucket_or_create(profile_id)?;
        let mut history = bucket
            .lock()
            .map_err(|e| RoutingError::LockPoisoned(e.to_string()))?;
        history.push(record.clone());

        debug!(
            profile_id,
            score = record.score,
            stored = history.len(),
            "Recorded outcome"
        );
        Ok(record)
    }

    /// Mean of the newest records, or 0.5 with no history.
    pub fn score(&self, profile_id: &str) -> RoutingResult<f64> {
        let Some(bucket) = self.existing_bucket(profile_id)? else {
            return Ok(NEUTRAL_SCORE);
        };
        let history = bucket
            .lock()
            .map_err(|e| RoutingError::LockPoisoned(e.to_string()))?;
        Ok(history.recent_average(self.window).unwrap_or(NEUTRAL_SCORE))
    }

    /// Snapshot of stored records, oldest first. Empty for unknown ids.
    pub fn history(&self, profile_id: &str) -> RoutingResult<Vec<PerformanceRecord>> {
        let Some(bucket) = self.existing_bucket(profile_id)? else {
            return Ok(Vec::new());
        };
        let history = bucket
            .lock()
            .map_err(|e| RoutingError::LockPoisoned(e.to_string()))?;
        Ok(history.records().cloned().collect())
    }

    /// Summary for one id, if it has a bucket.
    pub fn summary(&self, profile_id: &str) -> RoutingResult<Option<PerformanceSummary>> {
        let Some(bucket) = self.existing_bucket(profile_id)? else {
            return Ok(None);
        };
        let history = bucket
            .lock()
            .map_err(|e| RoutingError::LockPoisoned(e.to_string()))?;
        Ok(Some(PerformanceSummary::from_history(&history)))
    }

    /// Ids with a history bucket, in first-seen order.
    pub fn tracked_ids(&self) -> RoutingResult<Vec<String>> {
        let table = self
            .table
            .read()
            .map_err(|e| RoutingError::LockPoisoned(e.to_string()))?;
        Ok(table.order.clone())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

#[cfg(test)]
impl PerformanceTracker {
    /// Poison `profile_id`'s bucket by panicking while holding its lock.
    pub(crate) fn poison_bucket(&self, profile_id: &str) {
        let bucket = self.bucket_or_create(profile_id).unwrap();
        let _ = std::thread::spawn(move || {
            let _guard = bucket.lock().unwrap();
            panic!("writer panicked mid-update");
        })
        .join();
    }
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new()
    }
}
