// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;
use tracing::Span;

use crate::observability::messages::{Severity, StructuredLog};
use crate::traits::LogSink;

/// Identifiers that place a log record in the component / composite / machine hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogScope {
    pub component_id: Option<String>,
    pub composite_id: Option<String>,
    pub machine_id: Option<String>,
}

impl LogScope {
    pub fn component(component_id: impl Into<String>) -> Self {
        Self {
            component_id: Some(component_id.into()),
            ..Self::default()
        }
    }

    pub fn composite(composite_id: impl Into<String>, machine_id: Option<String>) -> Self {
        Self {
            component_id: None,
            composite_id: Some(composite_id.into()),
            machine_id,
        }
    }

    pub fn machine(machine_id: impl Into<String>) -> Self {
        Self {
            machine_id: Some(machine_id.into()),
            ..Self::default()
        }
    }

    pub fn with_composite(mut self, composite_id: Option<String>) -> Self {
        self.composite_id = composite_id;
        self
    }

    pub fn with_machine(mut self, machine_id: Option<String>) -> Self {
        self.machine_id = machine_id;
        self
    }
}

impl fmt::Display for LogScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [
            ("machine", &self.machine_id),
            ("composite", &self.composite_id),
            ("component", &self.component_id),
        ]
        .iter()
        .filter_map(|(label, id)| id.as_ref().map(|id| format!("{}={}", label, id)))
        .collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

/// One emitted signal, as handed to a [`LogSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub severity: Severity,
    pub message: String,
    pub tags: &'static [&'static str],
    pub scope: LogScope,
}

impl LogRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }
}

/// Logger bound to one scope. Cheap to clone; all clones share the sink.
#[derive(Clone)]
pub struct ScopedLogger {
    scope: LogScope,
    sink: Arc<dyn LogSink>,
}

impl ScopedLogger {
    pub fn new(scope: LogScope, sink: Arc<dyn LogSink>) -> Self {
        Self { scope, sink }
    }

    pub fn scope(&self) -> &LogScope {
        &self.scope
    }

    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    pub fn log(&self, message: &dyn StructuredLog) {
        let record = LogRecord {
            severity: message.severity(),
            message: message.to_string(),
            tags: message.tags(),
            scope: self.scope.clone(),
        };
        self.sink.emit(&record);
    }

    /// A `tracing` span carrying this scope's identifiers.
    pub fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "scope",
            span_name = name,
            component_id = self.scope.component_id.as_deref().unwrap_or(""),
            composite_id = self.scope.composite_id.as_deref().unwrap_or(""),
            machine_id = self.scope.machine_id.as_deref().unwrap_or(""),
        )
    }
}

impl fmt::Debug for ScopedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedLogger")
            .field("scope", &self.scope)
            .finish()
    }
}
