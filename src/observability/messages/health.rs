// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for operation history and health monitoring.
//!
//! This module contains message types for logging events related to:
//! * Operation outcomes being recorded
//! * Misalignment checks against the failure-rate threshold
//! * Performance analysis against the success-rate threshold
//! * Dangerous conditions (runaway workload, continuous failure)

use super::{tags, Severity, StructuredLog};
use std::fmt::{Display, Formatter};

/// Operation outcome appended to the history.
///
/// # Log Level
/// `debug!` - High-volume bookkeeping
pub struct OperationRecorded<'a> {
    pub operation: &'a str,
    pub success: bool,
    pub history_len: usize,
}

impl Display for OperationRecorded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let outcome = if self.success { "succeeded" } else { "failed" };
        write!(
            f,
            "Operation '{}' {} (history size {})",
            self.operation, outcome, self.history_len
        )
    }
}

impl StructuredLog for OperationRecorded<'_> {
    fn severity(&self) -> Severity {
        Severity::Debug
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::OPERATIONS]
    }
}

/// Misalignment check started.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct MisalignmentCheckStarted {
    pub history_len: usize,
}

impl Display for MisalignmentCheckStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Detecting misalignment over {} recorded operations",
            self.history_len
        )
    }
}

impl StructuredLog for MisalignmentCheckStarted {
    fn severity(&self) -> Severity {
        Severity::Debug
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::PERFORMANCE]
    }
}

/// Failure rate exceeded the misalignment threshold.
///
/// # Log Level
/// `warn!` - Component behaviour diverges from its reason
///
/// # Example
/// ```
/// use the_tubeline::observability::messages::health::MisalignmentDetected;
///
/// let msg = MisalignmentDetected {
///     failure_rate: 0.25,
///     threshold: 0.2,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Misalignment detected: failure rate 0.250 exceeds threshold 0.200"
/// );
/// ```
pub struct MisalignmentDetected {
    pub failure_rate: f64,
    pub threshold: f64,
}

impl Display for MisalignmentDetected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Misalignment detected: failure rate {:.3} exceeds threshold {:.3}",
            self.failure_rate, self.threshold
        )
    }
}

impl StructuredLog for MisalignmentDetected {
    fn severity(&self) -> Severity {
        Severity::Warn
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::PERFORMANCE, tags::MISALIGNMENT]
    }
}

/// Failure rate within the misalignment threshold.
///
/// # Log Level
/// `info!` - Important operational event
pub struct AlignmentConfirmed {
    pub failure_rate: f64,
    pub threshold: f64,
}

impl Display for AlignmentConfirmed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No misalignment detected: failure rate {:.3} within threshold {:.3}",
            self.failure_rate, self.threshold
        )
    }
}

impl StructuredLog for AlignmentConfirmed {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::PERFORMANCE]
    }
}

/// Success rate fell below the performance threshold.
///
/// # Log Level
/// `warn!` - Purpose evolution should be considered
pub struct PerformanceBelowThreshold {
    pub success_rate: f64,
    pub threshold: f64,
}

impl Display for PerformanceBelowThreshold {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Performance below threshold: success rate {:.3} < {:.3}, consider evolving purpose",
            self.success_rate, self.threshold
        )
    }
}

impl StructuredLog for PerformanceBelowThreshold {
    fn severity(&self) -> Severity {
        Severity::Warn
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::PERFORMANCE, tags::EVOLUTION]
    }
}

pub struct PerformanceAcceptable {
    pub success_rate: f64,
}

impl Display for PerformanceAcceptable {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Performance acceptable: success rate {:.3}", self.success_rate)
    }
}

impl StructuredLog for PerformanceAcceptable {
    fn severity(&self) -> Severity {
        Severity::Debug
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::PERFORMANCE]
    }
}

/// Workload exceeded the dangerous factor; the component was paused.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
pub struct DangerousWorkloadDetected {
    pub current: i64,
    pub assigned: i64,
}

impl Display for DangerousWorkloadDetected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dangerous workload detected (current={}, assigned={}), component paused",
            self.current, self.assigned
        )
    }
}

impl StructuredLog for DangerousWorkloadDetected {
    fn severity(&self) -> Severity {
        Severity::Warn
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::SAFETY, tags::SCALING]
    }
}

/// Every recorded operation failed over a long run; the component was terminated.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ContinuousFailureDetected {
    pub total_recorded: u64,
}

impl Display for ContinuousFailureDetected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Continuous failure detected over {} operations, component terminated",
            self.total_recorded
        )
    }
}

impl StructuredLog for ContinuousFailureDetected {
    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::SAFETY, tags::OPERATIONS]
    }
}
