// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for component construction and lifecycle events.

use super::{tags, Severity, StructuredLog};
use crate::component::Status;
use std::fmt::{Display, Formatter};

/// Component constructed and subsystems wired.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_tubeline::observability::messages::component::ComponentCreated;
///
/// let msg = ComponentCreated {
///     reason: "ingest",
///     parent_id: None,
///     lineage_depth: 1,
/// };
///
/// assert_eq!(msg.to_string(), "Created component for 'ingest' (lineage depth 1)");
/// ```
pub struct ComponentCreated<'a> {
    pub reason: &'a str,
    pub parent_id: Option<&'a str>,
    pub lineage_depth: usize,
}

impl Display for ComponentCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.parent_id {
            Some(parent) => write!(
                f,
                "Created component for '{}' with parent {} (lineage depth {})",
                self.reason, parent, self.lineage_depth
            ),
            None => write!(
                f,
                "Created component for '{}' (lineage depth {})",
                self.reason, self.lineage_depth
            ),
        }
    }
}

impl StructuredLog for ComponentCreated<'_> {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::INITIALIZATION]
    }
}

/// Lifecycle status changed.
///
/// # Log Level
/// `debug!` - Routine state bookkeeping
pub struct StatusChanged {
    pub from: Status,
    pub to: Status,
}

impl Display for StatusChanged {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Status changed: {} -> {}", self.from, self.to)
    }
}

impl StructuredLog for StatusChanged {
    fn severity(&self) -> Severity {
        Severity::Debug
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::LIFECYCLE]
    }
}

/// A status transition was refused by the transition table.
///
/// # Log Level
/// `warn!` - Caller attempted something the lifecycle forbids
pub struct StatusTransitionRejected {
    pub from: Status,
    pub to: Status,
}

impl Display for StatusTransitionRejected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected status transition: {} -> {}", self.from, self.to)
    }
}

impl StructuredLog for StatusTransitionRejected {
    fn severity(&self) -> Severity {
        Severity::Warn
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::LIFECYCLE]
    }
}

/// Paused or terminated flag flipped by a caller.
///
/// # Log Level
/// `info!` - Important operational event
pub struct FlagChanged {
    pub flag: &'static str,
    pub value: bool,
}

impl Display for FlagChanged {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Flag '{}' set to {}", self.flag, self.value)
    }
}

impl StructuredLog for FlagChanged {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::LIFECYCLE]
    }
}
