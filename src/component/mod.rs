// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The component: a long-lived processing unit with a content-addressed
//! identity, a mutable reason, and self-monitoring subsystems.
//!
//! A [`Component`] aggregates the following subsystems:
//!
//! * [`Lifecycle`]: the guarded [`Status`] table
//! * [`Operations`]: operation history, health metrics and the paused/terminated flags
//! * [`Workload`]: workload counters, scaling decisions and replicas
//! * [`Connections`]: outgoing links to peers
//! * [`Transformation`]: purpose evolutions and the transformation successor
//!
//! Each subsystem sits behind its own lock, so a component is `Send + Sync`
//! and every operation takes `&self`. Locks are never held while logging or
//! while calling into another component.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use the_tubeline::component::Component;
//! use the_tubeline::environment::{Environment, EnvironmentInfo};
//!
//! let env = Arc::new(Environment::from_info(EnvironmentInfo {
//!     cpu_architecture: "x86_64".to_string(),
//!     cpu_count: 4,
//!     hostname: "doc-host".to_string(),
//!     memory_mb: 4096,
//!     os: "Linux".to_string(),
//! }));
//!
//! let ingest = Component::new("ingest", env.clone());
//! let transform = Component::with_parent("transform", env, &ingest);
//!
//! assert_eq!(transform.lineage(), &["ingest".to_string(), "transform".to_string()]);
//! assert_eq!(transform.parents(), &[ingest.id().clone()]);
//!
//! ingest.connect_to(&transform);
//! assert_eq!(ingest.connected_components().get(transform.id()).map(String::as_str), Some("transform"));
//! ```

mod connections;
mod lifecycle;
mod operations;
mod transformation;
mod workload;


pub use connections::Connections;
pub use lifecycle::{Lifecycle, Status};
pub use operations::{OperationRecord, Operations};
pub use transformation::{Evolution, Transformation};
pub use workload::{decide_scaling, is_dangerous, ScalingDecision, Workload};

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::Thresholds;
use crate::environment::Environment;
use crate::errors::LifecycleError;
use crate::identity::{generate_id, ComponentId};
use crate::observability::messages::component::{
    ComponentCreated, FlagChanged, StatusChanged, StatusTransitionRejected,
};
use crate::observability::messages::connection::ConnectionEstablished;
use crate::observability::messages::health::{
    AlignmentConfirmed, ContinuousFailureDetected, DangerousWorkloadDetected,
    MisalignmentCheckStarted, MisalignmentDetected, OperationRecorded, PerformanceAcceptable,
    PerformanceBelowThreshold,
};
use crate::observability::messages::transformation::{PurposeEvolved, TransformedIntoNewEntity};
use crate::observability::messages::workload::{
    ReplicaCreationRequested, ReplicaDecommissioned, ReplicaProvisioned,
    ReplicaRemovalRequested, ScalingNotRequired,
};
use crate::observability::{LogScope, ScopedLogger, TracingSink};
use crate::provisioning::LogOnlyProvisioner;
use crate::traits::{LogSink, ReplicaProvisioner};

/// Settings a component carries and hands down to everything it creates
/// (children, replicas, transformation successors).
#[derive(Clone)]
pub struct ComponentSettings {
    pub thresholds: Thresholds,
    pub retention: Option<usize>,
    pub composite_id: Option<String>,
    pub machine_id: Option<String>,
    pub sink: Arc<dyn LogSink>,
    pub provisioner: Arc<dyn ReplicaProvisioner>,
}

impl Default for ComponentSettings {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            retention: None,
            composite_id: None,
            machine_id: None,
            sink: Arc::new(TracingSink::new()),
            provisioner: Arc::new(LogOnlyProvisioner::new()),
        }
    }
}

impl fmt::Debug for ComponentSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSettings")
            .field("thresholds", &self.thresholds)
            .field("retention", &self.retention)
            .field("composite_id", &self.composite_id)
            .field("machine_id", &self.machine_id)
            .field("provisioner", &self.provisioner.name())
            .finish()
    }
}

/// Builder for [`Component`].
///
/// Settings not given explicitly are taken from the parent when one is
/// set, otherwise from [`ComponentSettings::default`].
pub struct ComponentBuilder {
    reason: String,
    environment: Arc<Environment>,
    parent: Option<(ComponentId, Vec<String>, ComponentSettings)>,
    thresholds: Option<Thresholds>,
    retention: Option<Option<usize>>,
    composite_id: Option<String>,
    machine_id: Option<String>,
    sink: Option<Arc<dyn LogSink>>,
    provisioner: Option<Arc<dyn ReplicaProvisioner>>,
}

impl ComponentBuilder {
    pub fn new(reason: impl Into<String>, environment: Arc<Environment>) -> Self {
        Self {
            reason: reason.into(),
            environment,
            parent: None,
            thresholds: None,
            retention: None,
            composite_id: None,
            machine_id: None,
            sink: None,
            provisioner: None,
        }
    }

    pub fn parent(mut self, parent: &Component) -> Self {
        self.parent = Some((
            parent.id.clone(),
            parent.lineage.clone(),
            parent.settings.clone(),
        ));
        self
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Bound the operation history (`None` = unbounded).
    pub fn retention(mut self, retention: Option<usize>) -> Self {
        self.retention = Some(retention);
        self
    }

    pub fn composite_id(mut self, composite_id: impl Into<String>) -> Self {
        self.composite_id = Some(composite_id.into());
        self
    }

    pub fn machine_id(mut self, machine_id: impl Into<String>) -> Self {
        self.machine_id = Some(machine_id.into());
        self
    }

    pub fn log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn provisioner(mut self, provisioner: Arc<dyn ReplicaProvisioner>) -> Self {
        self.provisioner = Some(provisioner);
        self
    }

    pub fn build(self) -> Component {
        let (parents, mut lineage, inherited) = match self.parent {
            Some((id, lineage, settings)) => (vec![id], lineage, settings),
            None => (Vec::new(), Vec::new(), ComponentSettings::default()),
        };
        let reason = self.reason;
        lineage.push(reason.clone());

        let settings = ComponentSettings {
            thresholds: self.thresholds.unwrap_or(inherited.thresholds),
            retention: self.retention.unwrap_or(inherited.retention),
            composite_id: self.composite_id.or(inherited.composite_id),
            machine_id: self.machine_id.or(inherited.machine_id),
            sink: self.sink.unwrap_or(inherited.sink),
            provisioner: self.provisioner.unwrap_or(inherited.provisioner),
        };

        let id = generate_id(&reason, &self.environment);
        let scope = LogScope::component(id.as_str())
            .with_composite(settings.composite_id.clone())
            .with_machine(settings.machine_id.clone());
        let logger = ScopedLogger::new(scope, settings.sink.clone());

        let component = Component {
            id,
            reason: RwLock::new(reason.clone()),
            lineage,
            parents,
            environment: self.environment,
            logger,
            lifecycle: Mutex::new(Lifecycle::new()),
            operations: Mutex::new(Operations::with_retention(settings.retention)),
            workload: Mutex::new(Workload::new()),
            connections: RwLock::new(Connections::new()),
            transformation: Mutex::new(Transformation::new()),
            settings,
        };

        component.logger.log(&ComponentCreated {
            reason: &reason,
            parent_id: component.parents.first().map(ComponentId::as_str),
            lineage_depth: component.lineage.len(),
        });
        // Initializing -> Ready is always in the table
        let _ = component.transition_to(Status::Ready);
        component
    }
}

/// A long-lived processing unit. See the [module documentation](self).
pub struct Component {
    id: ComponentId,
    reason: RwLock<String>,
    lineage: Vec<String>,
    parents: Vec<ComponentId>,
    environment: Arc<Environment>,
    settings: ComponentSettings,
    logger: ScopedLogger,
    lifecycle: Mutex<Lifecycle>,
    operations: Mutex<Operations>,
    workload: Mutex<Workload>,
    connections: RwLock<Connections>,
    transformation: Mutex<Transformation>,
}

impl Component {
    /// Root component: no parents, lineage `[reason]`, default settings.
    pub fn new(reason: impl Into<String>, environment: Arc<Environment>) -> Self {
        ComponentBuilder::new(reason, environment).build()
    }

    /// Child component: parents `[parent.id()]`, lineage `parent.lineage() ++ [reason]`,
    /// settings inherited from `parent`.
    pub fn with_parent(
        reason: impl Into<String>,
        environment: Arc<Environment>,
        parent: &Component,
    ) -> Self {
        ComponentBuilder::new(reason, environment).parent(parent).build()
    }

    pub fn builder(reason: impl Into<String>, environment: Arc<Environment>) -> ComponentBuilder {
        ComponentBuilder::new(reason, environment)
    }

    /// Child of `self` in `self`'s environment.
    pub fn spawn_child(&self, reason: impl Into<String>) -> Component {
        Component::with_parent(reason, self.environment.clone(), self)
    }

    // ---- identity ----

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Current reason. Changes only through [`evolve_purpose`](Self::evolve_purpose).
    pub fn reason(&self) -> String {
        self.reason.read().clone()
    }

    /// Reasons from the root ancestor to this component, as they were at construction.
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    pub fn parents(&self) -> &[ComponentId] {
        &self.parents
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.environment
    }

    pub fn settings(&self) -> &ComponentSettings {
        &self.settings
    }

    pub fn composite_id(&self) -> Option<&str> {
        self.settings.composite_id.as_deref()
    }

    pub fn machine_id(&self) -> Option<&str> {
        self.settings.machine_id.as_deref()
    }

    pub fn logger(&self) -> &ScopedLogger {
        &self.logger
    }

    // ---- lifecycle ----

    pub fn status(&self) -> Status {
        self.lifecycle.lock().status()
    }

    /// Move to `next`; illegal moves leave the status unchanged.
    pub fn transition_to(&self, next: Status) -> Result<Status, LifecycleError> {
        let result = self.lifecycle.lock().transition(next);
        match result {
            Ok(from) => self.logger.log(&StatusChanged { from, to: next }),
            Err(LifecycleError::IllegalTransition { from, to }) => {
                self.logger.log(&StatusTransitionRejected { from, to })
            }
        }
        result
    }

    // ---- operations and health ----

    pub fn record_operation(&self, name: impl Into<String>, success: bool) {
        let name = name.into();
        let history_len = {
            let mut ops = self.operations.lock();
            ops.record(name.clone(), success);
            ops.len()
        };
        self.logger.log(&OperationRecorded {
            operation: &name,
            success,
            history_len,
        });
    }

    /// Failed / total over the retained history; `0.0` when empty.
    pub fn failure_rate(&self) -> f64 {
        self.operations.lock().failure_rate()
    }

    pub fn success_rate(&self) -> f64 {
        self.operations.lock().success_rate()
    }

    /// Snapshot of the retained history, oldest first.
    pub fn operation_history(&self) -> Vec<OperationRecord> {
        self.operations.lock().history().cloned().collect()
    }

    pub fn total_operations(&self) -> u64 {
        self.operations.lock().total_recorded()
    }

    /// Warn when the failure rate exceeds the misalignment threshold, confirm alignment otherwise.
    pub fn detect_misalignment(&self) {
        let threshold = self.settings.thresholds.misalignment;
        let (history_len, failure_rate) = {
            let ops = self.operations.lock();
            (ops.len(), ops.failure_rate())
        };

        self.logger.log(&MisalignmentCheckStarted { history_len });
        if failure_rate > threshold {
            self.logger.log(&MisalignmentDetected {
                failure_rate,
                threshold,
            });
        } else {
            self.logger.log(&AlignmentConfirmed {
                failure_rate,
                threshold,
            });
        }
    }

    /// Warn when the success rate drops below the performance threshold.
    pub fn analyze_performance(&self) {
        let threshold = self.settings.thresholds.performance;
        let success_rate = self.success_rate();

        if success_rate < threshold {
            self.logger.log(&PerformanceBelowThreshold {
                success_rate,
                threshold,
            });
        } else {
            self.logger.log(&PerformanceAcceptable { success_rate });
        }
    }

    /// Pause on a dangerous workload; terminate on continuous failure.
    pub fn detect_dangerous_conditions(&self) {
        let thresholds = self.settings.thresholds;

        let (dangerous, current, assigned) = {
            let workload = self.workload.lock();
            (
                workload.is_dangerous(&thresholds),
                workload.current(),
                workload.assigned(),
            )
        };
        if dangerous {
            self.set_paused(true);
            self.logger
                .log(&DangerousWorkloadDetected { current, assigned });
        }

        let (continuous, total_recorded) = {
            let ops = self.operations.lock();
            (
                ops.has_continuous_failure(thresholds.continuous_failure_window),
                ops.total_recorded(),
            )
        };
        if continuous {
            self.set_terminated(true);
            self.logger
                .log(&ContinuousFailureDetected { total_recorded });
        }
    }

    pub fn is_paused(&self) -> bool {
        self.operations.lock().is_paused()
    }

    pub fn set_paused(&self, paused: bool) {
        self.operations.lock().set_paused(paused);
        self.logger.log(&FlagChanged {
            flag: "paused",
            value: paused,
        });
    }

    pub fn is_terminated(&self) -> bool {
        self.operations.lock().is_terminated()
    }

    pub fn set_terminated(&self, terminated: bool) {
        self.operations.lock().set_terminated(terminated);
        self.logger.log(&FlagChanged {
            flag: "terminated",
            value: terminated,
        });
    }

    // ---- connections ----

    /// Record `peer` as an outgoing connection. `peer` is not modified.
    pub fn connect_to(&self, peer: &Component) {
        let peer_reason = peer.reason();
        self.connections
            .write()
            .connect(peer.id.clone(), peer_reason.clone());
        self.logger.log(&ConnectionEstablished {
            peer_id: peer.id.as_str(),
            peer_reason: &peer_reason,
        });
    }

    /// Detached snapshot of peer id to peer reason.
    pub fn connected_components(&self) -> HashMap<ComponentId, String> {
        self.connections.read().snapshot()
    }

    pub fn is_connected_to(&self, peer_id: &ComponentId) -> bool {
        self.connections.read().contains(peer_id)
    }

    // ---- transformation ----

    /// Change the reason in place. Identity and lineage are unchanged.
    pub fn evolve_purpose(&self, new_reason: impl Into<String>) {
        let new_reason = new_reason.into();
        let previous = self.set_reason(new_reason.clone());
        self.transformation
            .lock()
            .record_evolution(previous.clone(), new_reason.clone());
        self.logger.log(&PurposeEvolved {
            from: &previous,
            to: &new_reason,
        });
    }

    pub(crate) fn set_reason(&self, reason: String) -> String {
        std::mem::replace(&mut *self.reason.write(), reason)
    }

    pub fn evolutions(&self) -> Vec<Evolution> {
        self.transformation.lock().evolutions().to_vec()
    }

    /// Create a successor child with `new_reason`, remember it, and terminate `self`.
    pub fn transform_into_new_entity(&self, new_reason: impl Into<String>) -> Arc<Component> {
        let new_reason = new_reason.into();
        let successor = Arc::new(Component::with_parent(
            new_reason.clone(),
            self.environment.clone(),
            self,
        ));
        self.transformation.lock().set_successor(successor.clone());
        self.logger.log(&TransformedIntoNewEntity {
            new_reason: &new_reason,
            successor_id: successor.id.as_str(),
        });
        self.set_terminated(true);
        successor
    }

    /// Successor from the most recent transformation, if any.
    pub fn transformed(&self) -> Option<Arc<Component>> {
        self.transformation.lock().successor().cloned()
    }

    // ---- workload ----

    pub fn current_workload(&self) -> i64 {
        self.workload.lock().current()
    }

    pub fn set_current_workload(&self, value: i64) {
        self.workload.lock().set_current(value);
    }

    pub fn assigned_workload(&self) -> i64 {
        self.workload.lock().assigned()
    }

    pub fn set_assigned_workload(&self, value: i64) {
        self.workload.lock().set_assigned(value);
    }

    pub fn is_workload_dangerous(&self) -> bool {
        self.workload.lock().is_dangerous(&self.settings.thresholds)
    }

    pub fn replicas(&self) -> Vec<Arc<Component>> {
        self.workload.lock().replicas().to_vec()
    }

    /// Decide on scaling and hand the decision to the provisioner.
    pub fn detect_scaling_need(&self) -> ScalingDecision {
        let (decision, current, assigned, replica_count) = {
            let workload = self.workload.lock();
            (
                workload.scaling_decision(&self.settings.thresholds),
                workload.current(),
                workload.assigned(),
                workload.replica_count(),
            )
        };

        match decision {
            ScalingDecision::ScaleUp => {
                self.logger.log(&ReplicaCreationRequested {
                    current,
                    assigned,
                    replica_count,
                });
                if let Some(replica) = self.settings.provisioner.provision(self) {
                    let replica_count = {
                        let mut workload = self.workload.lock();
                        workload.push_replica(replica.clone());
                        workload.replica_count()
                    };
                    self.logger.log(&ReplicaProvisioned {
                        replica_id: replica.id.as_str(),
                        replica_count,
                    });
                }
            }
            ScalingDecision::ScaleDown => {
                self.logger.log(&ReplicaRemovalRequested {
                    current,
                    assigned,
                    replica_count,
                });
                let (removed, replica_count) = {
                    let mut workload = self.workload.lock();
                    let removed = workload.pop_replica();
                    (removed, workload.replica_count())
                };
                if let Some(replica) = removed {
                    self.settings.provisioner.decommission(&replica);
                    self.logger.log(&ReplicaDecommissioned {
                        replica_id: replica.id.as_str(),
                        replica_count,
                    });
                }
            }
            ScalingDecision::Steady => {
                self.logger.log(&ScalingNotRequired { current, assigned });
            }
        }
        decision
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id.short())
            .field("reason", &*self.reason.read())
            .field("lineage", &self.lineage)
            .field("status", &self.status())
            .finish()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component[{}:{}]", self.id.short(), self.reason.read())
    }
}
