// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Orchestrated collections of composites.
//!
//! ```text
//!  INITIALIZING ──activate──► ACTIVE ◄──activate── DEACTIVATED
//!       │                       │  └──deactivate──►    │
//!       └────────shutdown───────┴──────shutdown────────┘
//!                               ▼
//!                  SHUTTING_DOWN ──► TERMINATED
//! ```
//!
//! A new machine is active (status `INITIALIZING`). Shutdown deactivates
//! every composite and is final: later calls to `shutdown`, `activate` or
//! `deactivate` have no effect.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::component::ComponentSettings;
use crate::composite::{AssemblyEvent, Composite};
use crate::environment::Environment;
use crate::errors::AssemblyError;
use crate::observability::messages::assembly::{
    Container, ContainerStateChanged, MemberAdded, MemberReplaced, MembersLinked,
};
use crate::observability::{LogScope, ScopedLogger};

/// Key under which the status is mirrored in the machine state map.
pub const STATUS_KEY: &str = "status";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineStatus {
    Initializing,
    Active,
    Deactivated,
    ShuttingDown,
    Terminated,
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MachineStatus::Initializing => "INITIALIZING",
            MachineStatus::Active => "ACTIVE",
            MachineStatus::Deactivated => "DEACTIVATED",
            MachineStatus::ShuttingDown => "SHUTTING_DOWN",
            MachineStatus::Terminated => "TERMINATED",
        };
        f.write_str(name)
    }
}

pub struct Machine {
    id: String,
    environment: Arc<Environment>,
    settings: ComponentSettings,
    logger: ScopedLogger,
    composites: BTreeMap<String, Composite>,
    connections: BTreeMap<String, Vec<String>>,
    state: BTreeMap<String, String>,
    events: Vec<AssemblyEvent>,
    status: MachineStatus,
    active: bool,
}

impl Machine {
    pub fn new(id: impl Into<String>, environment: Arc<Environment>) -> Self {
        Self::with_settings(id, environment, ComponentSettings::default())
    }

    /// `settings` are handed to every composite this machine creates.
    pub fn with_settings(
        id: impl Into<String>,
        environment: Arc<Environment>,
        mut settings: ComponentSettings,
    ) -> Self {
        let id = id.into();
        settings.machine_id = Some(id.clone());
        settings.composite_id = None;
        let logger = ScopedLogger::new(LogScope::machine(id.clone()), settings.sink.clone());

        let mut machine = Self {
            composites: BTreeMap::new(),
            connections: BTreeMap::new(),
            state: BTreeMap::new(),
            events: Vec::new(),
            status: MachineStatus::Initializing,
            active: true,
            id,
            environment,
            settings,
            logger,
        };
        machine
            .state
            .insert(STATUS_KEY.to_string(), MachineStatus::Initializing.to_string());
        machine
            .state
            .insert("created_at".to_string(), chrono::Utc::now().to_rfc3339());
        machine.record(format!("Machine initialized: {}", machine.id));
        machine
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.environment
    }

    pub fn settings(&self) -> &ComponentSettings {
        &self.settings
    }

    pub fn logger(&self) -> &ScopedLogger {
        &self.logger
    }

    /// Add `composite` under `name`, replacing any composite already there.
    pub fn add_composite(&mut self, name: impl Into<String>, composite: Composite) {
        let name = name.into();
        self.announce(&name);
        self.composites.insert(name, composite);
    }

    /// Create an empty composite carrying this machine's id and settings.
    pub fn create_composite(&mut self, id: impl Into<String>) -> &mut Composite {
        let id = id.into();
        let composite =
            Composite::with_settings(id.clone(), self.environment.clone(), self.settings.clone());
        self.announce(&id);
        match self.composites.entry(id) {
            Entry::Occupied(mut entry) => {
                entry.insert(composite);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(composite),
        }
    }

    pub fn connect(&mut self, source: &str, target: &str) -> Result<(), AssemblyError> {
        self.require(source)?;
        self.require(target)?;

        self.connections
            .entry(source.to_string())
            .or_default()
            .push(target.to_string());
        self.logger.log(&MembersLinked {
            container: Container::Machine,
            container_id: &self.id,
            source,
            target,
        });
        self.record(format!("Connected composites: {} -> {}", source, target));
        Ok(())
    }

    pub fn composite(&self, name: &str) -> Option<&Composite> {
        self.composites.get(name)
    }

    pub fn composite_mut(&mut self, name: &str) -> Option<&mut Composite> {
        self.composites.get_mut(name)
    }

    pub fn composites(&self) -> &BTreeMap<String, Composite> {
        &self.composites
    }

    pub fn connections(&self) -> &BTreeMap<String, Vec<String>> {
        &self.connections
    }

    pub fn event_log(&self) -> &[AssemblyEvent] {
        &self.events
    }

    pub fn state(&self) -> &BTreeMap<String, String> {
        &self.state
    }

    pub fn update_state(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        self.record(format!("State updated: {} = {}", key, value));
        self.state.insert(key, value);
    }

    pub fn status(&self) -> MachineStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Move to `ACTIVE`, from a fresh or deactivated machine.
    pub fn activate(&mut self) {
        let startable = match self.status {
            MachineStatus::Initializing => true,
            MachineStatus::Deactivated => !self.active,
            _ => false,
        };
        if !startable {
            return;
        }
        self.active = true;
        self.set_status(MachineStatus::Active);
        self.state_changed("activated");
    }

    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.set_status(MachineStatus::Deactivated);
        self.state_changed("deactivated");
    }

    /// Deactivate every composite and terminate. Only the first call has effect.
    pub fn shutdown(&mut self) {
        if matches!(
            self.status,
            MachineStatus::ShuttingDown | MachineStatus::Terminated
        ) {
            return;
        }
        let _span = self.logger.span("machine.shutdown").entered();
        self.active = false;
        self.set_status(MachineStatus::ShuttingDown);
        self.state_changed("shutdown initiated");

        let mut deactivated = Vec::new();
        for (name, composite) in self.composites.iter_mut() {
            composite.deactivate();
            deactivated.push(name.clone());
        }
        for name in deactivated {
            self.record(format!("Composite deactivated during shutdown: {}", name));
        }

        self.set_status(MachineStatus::Terminated);
        self.state_changed("shutdown completed");
    }

    fn announce(&mut self, name: &str) {
        if self.composites.contains_key(name) {
            self.logger.log(&MemberReplaced {
                container: Container::Machine,
                container_id: &self.id,
                member: name,
            });
        }
        self.logger.log(&MemberAdded {
            container: Container::Machine,
            container_id: &self.id,
            member: name,
        });
        self.record(format!("Composite added to machine: {}", name));
    }

    fn require(&self, name: &str) -> Result<(), AssemblyError> {
        if self.composites.contains_key(name) {
            Ok(())
        } else {
            Err(AssemblyError::UnknownComposite {
                machine_id: self.id.clone(),
                composite: name.to_string(),
            })
        }
    }

    fn set_status(&mut self, status: MachineStatus) {
        self.status = status;
        self.update_state(STATUS_KEY, status.to_string());
    }

    fn state_changed(&mut self, state: &str) {
        self.logger.log(&ContainerStateChanged {
            container: Container::Machine,
            container_id: &self.id,
            state,
        });
        self.record(format!("Machine {}: {}", state, self.id));
    }

    fn record(&mut self, description: String) {
        self.events.push(AssemblyEvent::new(description));
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("composites", &self.composites.keys().collect::<Vec<_>>())
            .field("connections", &self.connections)
            .finish()
    }
}
