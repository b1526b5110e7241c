// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for workload scaling and replica provisioning.

use super::{tags, Severity, StructuredLog};
use std::fmt::{Display, Formatter};

/// Workload crossed the scale-up factor; the create-replica hook fires.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_tubeline::observability::messages::workload::ReplicaCreationRequested;
///
/// let msg = ReplicaCreationRequested {
///     current: 13,
///     assigned: 10,
///     replica_count: 0,
/// };
///
/// assert!(msg.to_string().starts_with("Replica creation requested"));
/// ```
pub struct ReplicaCreationRequested {
    pub current: i64,
    pub assigned: i64,
    pub replica_count: usize,
}

impl Display for ReplicaCreationRequested {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Replica creation requested: current={}, assigned={}, replicas={}",
            self.current, self.assigned, self.replica_count
        )
    }
}

impl StructuredLog for ReplicaCreationRequested {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::SCALING, tags::REPLICA]
    }
}

/// Workload fell under the scale-down factor with replicas present.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ReplicaRemovalRequested {
    pub current: i64,
    pub assigned: i64,
    pub replica_count: usize,
}

impl Display for ReplicaRemovalRequested {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Replica removal requested: current={}, assigned={}, replicas={}",
            self.current, self.assigned, self.replica_count
        )
    }
}

impl StructuredLog for ReplicaRemovalRequested {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::SCALING, tags::REPLICA]
    }
}

/// No scaling hook fired.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct ScalingNotRequired {
    pub current: i64,
    pub assigned: i64,
}

impl Display for ScalingNotRequired {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No scaling required: current={}, assigned={}",
            self.current, self.assigned
        )
    }
}

impl StructuredLog for ScalingNotRequired {
    fn severity(&self) -> Severity {
        Severity::Debug
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::SCALING]
    }
}

/// The provisioner produced a replica and it is now tracked.
pub struct ReplicaProvisioned<'a> {
    pub replica_id: &'a str,
    pub replica_count: usize,
}

impl Display for ReplicaProvisioned<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Replica {} provisioned ({} tracked)",
            self.replica_id, self.replica_count
        )
    }
}

impl StructuredLog for ReplicaProvisioned<'_> {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::REPLICA]
    }
}

/// A tracked replica was handed back to the provisioner.
pub struct ReplicaDecommissioned<'a> {
    pub replica_id: &'a str,
    pub replica_count: usize,
}

impl Display for ReplicaDecommissioned<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Replica {} decommissioned ({} tracked)",
            self.replica_id, self.replica_count
        )
    }
}

impl StructuredLog for ReplicaDecommissioned<'_> {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::REPLICA]
    }
}
