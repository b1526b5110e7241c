use crate::observability::LogRecord;

/// Destination for component-scoped log records.
///
/// Implementations must be cheap and non-blocking: components emit from
/// inside their public operations.
pub trait LogSink: Send + Sync {
    fn emit(&self, record: &LogRecord);
}
