// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Named groups of components wired into a pipeline.
//!
//! A [`Composite`] owns its components (as `Arc<Component>`, since peers and
//! children refer to them), records name-level connections alongside the
//! component-level ones, and keeps an append-only [`AssemblyEvent`] log.
//! Components created through a composite share its environment and carry
//! its settings with `composite_id` set to the composite's id.
//!
//! It is also the registry that turns the parent ids a child carries back
//! into components ([`Composite::resolve_parents`]).

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::component::{Component, ComponentSettings};
use crate::environment::Environment;
use crate::errors::AssemblyError;
use crate::identity::ComponentId;
use crate::observability::messages::assembly::{
    Container, ContainerStateChanged, MemberAdded, MemberReplaced, MembersLinked,
};
use crate::observability::{LogScope, ScopedLogger};

/// One entry of a container's event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyEvent {
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl AssemblyEvent {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for AssemblyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.to_rfc3339(), self.description)
    }
}

pub struct Composite {
    id: String,
    environment: Arc<Environment>,
    settings: ComponentSettings,
    logger: ScopedLogger,
    components: BTreeMap<String, Arc<Component>>,
    connections: BTreeMap<String, Vec<String>>,
    events: Vec<AssemblyEvent>,
    active: bool,
}

impl Composite {
    pub fn new(id: impl Into<String>, environment: Arc<Environment>) -> Self {
        Self::with_settings(id, environment, ComponentSettings::default())
    }

    /// `settings` become the template for every component this composite creates.
    pub fn with_settings(
        id: impl Into<String>,
        environment: Arc<Environment>,
        mut settings: ComponentSettings,
    ) -> Self {
        let id = id.into();
        settings.composite_id = Some(id.clone());
        let logger = ScopedLogger::new(
            LogScope::composite(id.clone(), settings.machine_id.clone()),
            settings.sink.clone(),
        );

        let mut composite = Self {
            events: Vec::new(),
            components: BTreeMap::new(),
            connections: BTreeMap::new(),
            active: true,
            id,
            environment,
            settings,
            logger,
        };
        composite.record(format!("Composite initialized: {}", composite.id));
        composite
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

    pub fn machine_id(&self) -> Option<&str> {
        self.settings.machine_id.as_deref()
    }

    pub fn logger(&self) -> &ScopedLogger {
        &self.logger
    }

    /// Add `component` under `name`, replacing any component already there.
    pub fn add_component(&mut self, name: impl Into<String>, component: Arc<Component>) {
        let name = name.into();
        if self.components.contains_key(&name) {
            self.logger.log(&MemberReplaced {
                container: Container::Composite,
                container_id: &self.id,
                member: &name,
            });
        }
        self.components.insert(name.clone(), component);
        self.logger.log(&MemberAdded {
            container: Container::Composite,
            container_id: &self.id,
            member: &name,
        });
        self.record(format!("Component added to composite: {}", name));
    }

    /// Create a root component with this composite's settings and add it under `name`.
    pub fn create_component(
        &mut self,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Arc<Component> {
        let component = Arc::new(self.component_builder(reason).build());
        self.add_component(name, component.clone());
        component
    }

    /// Create a child of the component named `parent` and add it under `name`.
    pub fn create_child_component(
        &mut self,
        name: impl Into<String>,
        reason: impl Into<String>,
        parent: &str,
    ) -> Result<Arc<Component>, AssemblyError> {
        let parent = self.require(parent)?.clone();
        let component = Arc::new(self.component_builder(reason).parent(&parent).build());
        self.add_component(name, component.clone());
        Ok(component)
    }

    /// Link `source` to `target`: records the name edge and connects the components.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<(), AssemblyError> {
        let _span = self.logger.span("composite.connect").entered();
        let source_component = self.require(source)?.clone();
        let target_component = self.require(target)?.clone();

        self.connections
            .entry(source.to_string())
            .or_default()
            .push(target.to_string());
        source_component.connect_to(&target_component);

        self.logger.log(&MembersLinked {
            container: Container::Composite,
            container_id: &self.id,
            source,
            target,
        });
        self.record(format!("Connected components: {} -> {}", source, target));
        Ok(())
    }

    pub fn component(&self, name: &str) -> Option<&Arc<Component>> {
        self.components.get(name)
    }

    pub fn component_by_id(&self, id: &ComponentId) -> Option<&Arc<Component>> {
        self.components.values().find(|c| c.id() == id)
    }

    /// Parents of `component` that this composite holds, in parent order.
    pub fn resolve_parents(&self, component: &Component) -> Vec<Arc<Component>> {
        component
            .parents()
            .iter()
            .filter_map(|id| self.component_by_id(id).cloned())
            .collect()
    }

    pub fn components(&self) -> &BTreeMap<String, Arc<Component>> {
        &self.components
    }

    /// Source name to target names, in connection order.
    pub fn connections(&self) -> &BTreeMap<String, Vec<String>> {
        &self.connections
    }

    pub fn event_log(&self) -> &[AssemblyEvent] {
        &self.events
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        if !self.active {
            self.active = true;
            self.state_changed("activated");
        }
    }

    pub fn deactivate(&mut self) {
        if self.active {
            self.active = false;
            self.state_changed("deactivated");
        }
    }

    fn component_builder(&self, reason: impl Into<String>) -> crate::component::ComponentBuilder {
        let mut builder = Component::builder(reason, self.environment.clone())
            .thresholds(self.settings.thresholds)
            .retention(self.settings.retention)
            .composite_id(self.id.clone())
            .log_sink(self.settings.sink.clone())
            .provisioner(self.settings.provisioner.clone());
        if let Some(machine_id) = &self.settings.machine_id {
            builder = builder.machine_id(machine_id.clone());
        }
        builder
    }

    fn require(&self, name: &str) -> Result<&Arc<Component>, AssemblyError> {
        self.components
            .get(name)
            .ok_or_else(|| AssemblyError::UnknownComponent {
                composite_id: self.id.clone(),
                component: name.to_string(),
            })
    }

    fn state_changed(&mut self, state: &str) {
        self.logger.log(&ContainerStateChanged {
            container: Container::Composite,
            container_id: &self.id,
            state,
        });
        self.record(format!("Composite {}: {}", state, self.id));
    }

    fn record(&mut self, description: String) {
        self.events.push(AssemblyEvent::new(description));
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("id", &self.id)
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .field("connections", &self.connections)
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::test_environment;
    use crate::observability::messages::{tags, Severity};
    use crate::observability::MemorySink;

    fn composite_with_sink() -> (Composite, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let settings = ComponentSettings {
            sink: sink.clone(),
            machine_id: Some("m1".to_string()),
            ..ComponentSettings::default()
        };
        (
            Composite::with_settings("c1", Arc::new(test_environment()), settings),
            sink,
        )
    }

    #[test]
    fn test_created_components_carry_composite_scope() {
        let (mut composite, sink) = composite_with_sink();

        let ingest = composite.create_component("ingest", "ingest");

        assert_eq!(ingest.composite_id(), Some("c1"));
        assert_eq!(ingest.machine_id(), Some("m1"));
        let created = sink.with_tag(tags::INITIALIZATION);
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].scope.composite_id.as_deref(), Some("c1"));
        assert_eq!(created[0].scope.machine_id.as_deref(), Some("m1"));
    }

    #[test]
    fn test_connect_links_components_and_records_edge() {
        let (mut composite, _sink) = composite_with_sink();
        let ingest = composite.create_component("ingest", "ingest");
        let transform = composite
            .create_child_component("transform", "transform", "ingest")
            .unwrap();

        composite.connect("ingest", "transform").unwrap();

        assert_eq!(
            composite.connections().get("ingest"),
            Some(&vec!["transform".to_string()])
        );
        assert_eq!(
            ingest.connected_components().get(transform.id()).map(String::as_str),
            Some("transform")
        );
        assert!(transform.connected_components().is_empty());
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        struct TestCase {
            name: &'static str,
            source: &'static str,
            target: &'static str,
            missing: &'static str,
        }

        let test_cases = vec![
            TestCase {
                name: "unknown source",
                source: "nope",
                target: "ingest",
                missing: "nope",
            },
            TestCase {
                name: "unknown target",
                source: "ingest",
                target: "nope",
                missing: "nope",
            },
        ];

        for case in test_cases {
            let (mut composite, _sink) = composite_with_sink();
            composite.create_component("ingest", "ingest");

            let result = composite.connect(case.source, case.target);

            assert_eq!(
                result,
                Err(AssemblyError::UnknownComponent {
                    composite_id: "c1".to_string(),
                    component: case.missing.to_string(),
                }),
                "{}",
                case.name
            );
            assert!(composite.connections().is_empty(), "{}", case.name);
        }

        let (mut composite, _sink) = composite_with_sink();
        assert!(composite
            .create_child_component("child", "child", "missing")
            .is_err());
        assert!(composite.components().is_empty());
    }

    #[test]
    fn test_resolve_parents_and_lookup_by_id() {
        let (mut composite, _sink) = composite_with_sink();
        let ingest = composite.create_component("ingest", "ingest");
        let transform = composite
            .create_child_component("transform", "transform", "ingest")
            .unwrap();

        let parents = composite.resolve_parents(&transform);

        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].id(), ingest.id());
        assert!(composite.resolve_parents(&ingest).is_empty());
        assert_eq!(
            composite.component_by_id(transform.id()).map(|c| c.reason()),
            Some("transform".to_string())
        );
    }

    #[test]
    fn test_replacing_member_warns() {
        let (mut composite, sink) = composite_with_sink();
        composite.create_component("ingest", "ingest");
        composite.create_component("ingest", "ingest-v2");

        assert!(sink.contains(Severity::Warn, tags::COMPOSITE));
        assert_eq!(composite.components().len(), 1);
        assert_eq!(
            composite.component("ingest").map(|c| c.reason()),
            Some("ingest-v2".to_string())
        );
    }

    #[test]
    fn test_activation_is_idempotent() {
        let (mut composite, _sink) = composite_with_sink();
        assert!(composite.is_active());
        let initial_events = composite.event_log().len();

        composite.activate();
        assert_eq!(composite.event_log().len(), initial_events);

        composite.deactivate();
        composite.deactivate();
        assert!(!composite.is_active());
        assert_eq!(composite.event_log().len(), initial_events + 1);

        composite.activate();
        assert!(composite.is_active());
        assert_eq!(
            composite.event_log().last().map(|e| e.description.as_str()),
            Some("Composite activated: c1")
        );
    }
}
