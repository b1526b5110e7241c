// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] for its severity and filter tags.
//!
//! # Organization
//!
//! * `component` - construction and lifecycle status changes
//! * `health` - operation history, misalignment and performance signals
//! * `workload` - scaling decisions and replica provisioning
//! * `connection` - peer links
//! * `transformation` - purpose evolution and successor creation
//! * `assembly` - composite and machine events
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_tubeline::observability::messages::health::MisalignmentDetected;
//! use the_tubeline::observability::{Severity, StructuredLog};
//!
//! let msg = MisalignmentDetected {
//!     failure_rate: 0.25,
//!     threshold: 0.2,
//! };
//!
//! assert_eq!(msg.severity(), Severity::Warn);
//! assert!(msg.tags().contains(&"misalignment"));
//! ```

pub mod assembly;
pub mod component;
pub mod connection;
pub mod health;
pub mod transformation;
pub mod workload;

use std::fmt::{self, Display, Formatter};

/// Severity of a log record, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// Filter tags attached to log records.
pub mod tags {
    pub const INITIALIZATION: &str = "initialization";
    pub const LIFECYCLE: &str = "lifecycle";
    pub const OPERATIONS: &str = "operations";
    pub const PERFORMANCE: &str = "performance";
    pub const MISALIGNMENT: &str = "misalignment";
    pub const SAFETY: &str = "safety";
    pub const SCALING: &str = "scaling";
    pub const REPLICA: &str = "replica";
    pub const CONNECTION: &str = "connection";
    pub const EVOLUTION: &str = "evolution";
    pub const TRANSFORMATION: &str = "transformation";
    pub const COMPOSITE: &str = "composite";
    pub const MACHINE: &str = "machine";
}

/// A loggable message: its text comes from `Display`, its classification from here.
pub trait StructuredLog: Display {
    fn severity(&self) -> Severity;

    fn tags(&self) -> &'static [&'static str];
}
