// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operation history and health metrics.
//!
//! Records are appended in the order this component observes them. With a
//! retention capacity the history behaves as a ring buffer: the oldest
//! record is evicted once the capacity is reached and rates are computed
//! over the retained window. Lifetime totals are kept separately and are
//! never evicted.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Outcome of one named operation. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    name: String,
    success: bool,
    recorded_at: DateTime<Utc>,
}

impl OperationRecord {
    pub fn new(name: impl Into<String>, success: bool) -> Self {
        Self {
            name: name.into(),
            success,
            recorded_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct Operations {
    history: VecDeque<OperationRecord>,
    retention: Option<usize>,
    failed_in_window: usize,
    total_recorded: u64,
    total_succeeded: u64,
    paused: bool,
    terminated: bool,
}

impl Operations {
    /// Unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History bounded to `retention` records (`None` = unbounded, minimum 1).
    pub fn with_retention(retention: Option<usize>) -> Self {
        Self {
            retention: retention.map(|r| r.max(1)),
            ..Self::default()
        }
    }

    pub fn retention(&self) -> Option<usize> {
        self.retention
    }

    /// Append an outcome. Names are not validated; empty and repeated names are fine.
    pub fn record(&mut self, name: impl Into<String>, success: bool) {
        if let Some(capacity) = self.retention {
            while self.history.len() >= capacity {
                if let Some(evicted) = self.history.pop_front() {
                    if !evicted.success {
                        self.failed_in_window -= 1;
                    }
                }
            }
        }

        if !success {
            self.failed_in_window += 1;
        } else {
            self.total_succeeded += 1;
        }
        self.total_recorded += 1;
        self.history.push_back(OperationRecord::new(name, success));
    }

    pub fn history(&self) -> impl Iterator<Item = &OperationRecord> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    pub fn total_succeeded(&self) -> u64 {
        self.total_succeeded
    }

    /// Failed / total over the retained window; `0.0` when nothing is recorded.
    pub fn failure_rate(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.failed_in_window as f64 / self.history.len() as f64
    }

    pub fn success_rate(&self) -> f64 {
        1.0 - self.failure_rate()
    }

    /// Strictly greater than: a rate equal to the threshold is aligned.
    pub fn is_misaligned(&self, threshold: f64) -> bool {
        self.failure_rate() > threshold
    }

    pub fn is_underperforming(&self, threshold: f64) -> bool {
        self.success_rate() < threshold
    }

    /// More than `window` operations over the lifetime and not one succeeded.
    ///
    /// Counts lifetime totals, not the retained history; the two differ only
    /// under a bounded retention.
    pub fn has_continuous_failure(&self, window: u64) -> bool {
        self.total_recorded > window && self.total_succeeded == 0
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn set_terminated(&mut self, terminated: bool) {
        self.terminated = terminated;
    }
}
