// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use parking_lot::Mutex;

use crate::observability::logger::LogRecord;
use crate::observability::messages::Severity;
use crate::traits::LogSink;

/// Default sink: forwards every record to the `tracing` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn emit(&self, record: &LogRecord) {
        let component_id = record.scope.component_id.as_deref().unwrap_or("");
        let composite_id = record.scope.composite_id.as_deref().unwrap_or("");
        let machine_id = record.scope.machine_id.as_deref().unwrap_or("");
        let tags = record.tags.join(",");

        // tracing needs the level at compile time, hence one arm per severity
        match record.severity {
            Severity::Debug => tracing::debug!(
                component_id,
                composite_id,
                machine_id,
                tags = %tags,
                "{}", record.message
            ),
            Severity::Info => tracing::info!(
                component_id,
                composite_id,
                machine_id,
                tags = %tags,
                "{}", record.message
            ),
            Severity::Warn => tracing::warn!(
                component_id,
                composite_id,
                machine_id,
                tags = %tags,
                "{}", record.message
            ),
            Severity::Error => tracing::error!(
                component_id,
                composite_id,
                machine_id,
                tags = %tags,
                "{}", record.message
            ),
        }
    }
}

/// Sink that keeps every record in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Records carrying `tag`, in emission order.
    pub fn with_tag(&self, tag: &str) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.has_tag(tag))
            .cloned()
            .collect()
    }

    /// Whether any record has exactly `severity` and carries `tag`.
    pub fn contains(&self, severity: Severity, tag: &str) -> bool {
        self.records
            .lock()
            .iter()
            .any(|r| r.severity == severity && r.has_tag(tag))
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        self.records.lock().push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::LogScope;

    fn record(severity: Severity, tags: &'static [&'static str]) -> LogRecord {
        LogRecord {
            severity,
            message: "test".to_string(),
            tags,
            scope: LogScope::component("abc"),
        }
    }

    #[test]
    fn test_memory_sink_filters_by_severity_and_tag() {
        let sink = MemorySink::new();
        sink.emit(&record(Severity::Info, &["performance"]));
        sink.emit(&record(Severity::Warn, &["performance", "misalignment"]));

        assert_eq!(sink.len(), 2);
        assert!(sink.contains(Severity::Warn, "misalignment"));
        assert!(!sink.contains(Severity::Info, "misalignment"));
        assert_eq!(sink.with_tag("performance").len(), 2);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_tracing_sink_accepts_every_severity() {
        let sink = TracingSink::new();
        for severity in [Severity::Debug, Severity::Info, Severity::Warn, Severity::Error] {
            sink.emit(&record(severity, &["lifecycle"]));
        }
    }
}
