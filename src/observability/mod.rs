// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured, component-scoped logging.
//!
//! Every signal the runtime emits (operation recorded, misalignment detected,
//! replica requested, connection made, purpose evolved) is a message struct
//! from [`messages`] handed to a [`ScopedLogger`]. The logger stamps the
//! record with the identifiers of its origin and passes it to an injected
//! [`LogSink`](crate::traits::LogSink):
//!
//! * Message types keep wording out of call sites
//! * The scope makes each line traceable to its component, composite and machine
//! * The sink decouples the core from any particular log backend
//!
//! # Architecture
//!
//! ```text
//! Component ──► ScopedLogger { component_id, composite_id, machine_id }
//!                    │  LogRecord { severity, message, tags, scope }
//!                    ▼
//!              Arc<dyn LogSink>  ──►  TracingSink  (tracing events)
//!                                └─►  MemorySink   (in-memory, assertable)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use the_tubeline::observability::messages::connection::ConnectionEstablished;
//! use the_tubeline::observability::{LogScope, MemorySink, ScopedLogger, Severity};
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = ScopedLogger::new(LogScope::component("abc123"), sink.clone());
//!
//! logger.log(&ConnectionEstablished {
//!     peer_id: "def456",
//!     peer_reason: "transform",
//! });
//!
//! assert!(sink.contains(Severity::Info, "connection"));
//! ```

mod logger;
pub mod messages;
mod sink;

pub use logger::{LogRecord, LogScope, ScopedLogger};
pub use messages::{Severity, StructuredLog};
pub use sink::{MemorySink, TracingSink};
