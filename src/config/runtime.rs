// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::component::ComponentSettings;
use crate::config::{CompositeConfig, ComponentConfig, Config, ReplicaPolicy};
use crate::environment::Environment;
use crate::errors::AssemblyError;
use crate::machine::Machine;
use crate::provisioning::{ChildReplicaProvisioner, LogOnlyProvisioner};
use crate::traits::{LogSink, ReplicaProvisioner};

/// Machine builder - turns a validated configuration into a wired, active [`Machine`].
///
/// Every component receives the resolved thresholds, history retention,
/// replica policy and log sink. Components are created parents first, so
/// declaration order in the file does not matter.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use the_tubeline::config::{Config, MachineBuilder};
/// use the_tubeline::environment::{Environment, EnvironmentInfo};
/// use the_tubeline::observability::MemorySink;
///
/// let config: Config = serde_yaml::from_str(r#"
/// machine_id: m1
/// composites:
///   - id: c1
///     components:
///       - { name: transform, reason: transform, parent: ingest }
///       - { name: ingest, reason: ingest }
///     connections:
///       - { from: ingest, to: transform }
/// "#).unwrap();
///
/// let env = Arc::new(Environment::from_info(EnvironmentInfo {
///     cpu_architecture: "x86_64".to_string(),
///     cpu_count: 2,
///     hostname: "doc-host".to_string(),
///     memory_mb: 2048,
///     os: "Linux".to_string(),
/// }));
///
/// let machine = MachineBuilder::from_config(&config, env, Arc::new(MemorySink::new())).unwrap();
/// let transform = machine.composite("c1").and_then(|c| c.component("transform")).unwrap();
/// assert_eq!(transform.lineage(), &["ingest".to_string(), "transform".to_string()]);
/// ```
pub struct MachineBuilder;

impl MachineBuilder {
    /// Build a machine from `cfg`.
    ///
    /// `cfg` should have passed [`validate_config`](crate::config::validate_config);
    /// unresolved names still surface as [`AssemblyError`]s rather than panics.
    pub fn from_config(
        cfg: &Config,
        environment: Arc<Environment>,
        sink: Arc<dyn LogSink>,
    ) -> Result<Machine, AssemblyError> {
        let settings = ComponentSettings {
            thresholds: cfg.thresholds.resolve(),
            retention: cfg.history.retention,
            sink,
            provisioner: provisioner_for(cfg.replicas),
            ..ComponentSettings::default()
        };

        let mut machine = Machine::with_settings(cfg.machine_id.clone(), environment, settings);
        for composite_cfg in &cfg.composites {
            build_composite(&mut machine, composite_cfg)?;
        }
        for link in &cfg.links {
            machine.connect(&link.from, &link.to)?;
        }
        machine.activate();

        tracing::info!(
            machine_id = %cfg.machine_id,
            composites = cfg.composites.len(),
            links = cfg.links.len(),
            "Machine built from configuration"
        );
        Ok(machine)
    }
}

fn provisioner_for(policy: ReplicaPolicy) -> Arc<dyn ReplicaProvisioner> {
    match policy {
        ReplicaPolicy::LogOnly => Arc::new(LogOnlyProvisioner::new()),
        ReplicaPolicy::Child => Arc::new(ChildReplicaProvisioner::new()),
    }
}

fn build_composite(machine: &mut Machine, cfg: &CompositeConfig) -> Result<(), AssemblyError> {
    let order = parents_first(cfg)?;
    let composite = machine.create_composite(cfg.id.clone());

    for component_cfg in order {
        let component = match &component_cfg.parent {
            Some(parent) => composite.create_child_component(
                component_cfg.name.clone(),
                component_cfg.reason.clone(),
                parent,
            )?,
            None => {
                composite.create_component(component_cfg.name.clone(), component_cfg.reason.clone())
            }
        };
        if let Some(assigned) = component_cfg.assigned_workload {
            component.set_assigned_workload(assigned);
        }
    }

    for connection in &cfg.connections {
        composite.connect(&connection.from, &connection.to)?;
    }
    Ok(())
}

/// Components ordered so that every parent precedes its children.
fn parents_first(cfg: &CompositeConfig) -> Result<Vec<&ComponentConfig>, AssemblyError> {
    let mut ordered: Vec<&ComponentConfig> = Vec::with_capacity(cfg.components.len());
    let mut pending: Vec<&ComponentConfig> = cfg.components.iter().collect();

    while !pending.is_empty() {
        let before = pending.len();
        let mut waiting = Vec::new();
        for component in pending {
            let ready = match &component.parent {
                None => true,
                Some(parent) => ordered.iter().any(|c| &c.name == parent),
            };
            if ready {
                ordered.push(component);
            } else {
                waiting.push(component);
            }
        }

        if waiting.len() == before {
            // no progress: the first stuck parent is missing or part of a loop
            let stuck = waiting[0];
            return Err(AssemblyError::UnknownComponent {
                composite_id: cfg.id.clone(),
                component: stuck.parent.clone().unwrap_or_default(),
            });
        }
        pending = waiting;
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str, parent: Option<&str>) -> ComponentConfig {
        ComponentConfig {
            name: name.to_string(),
            reason: name.to_string(),
            parent: parent.map(str::to_string),
            assigned_workload: None,
        }
    }

    #[test]
    fn test_parents_first_reorders_children_after_parents() {
        let cfg = CompositeConfig {
            id: "c1".to_string(),
            components: vec![
                component("emit", Some("transform")),
                component("transform", Some("ingest")),
                component("ingest", None),
            ],
            connections: vec![],
        };

        let order: Vec<&str> = parents_first(&cfg)
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(order, vec!["ingest", "transform", "emit"]);
    }

    #[test]
    fn test_parents_first_rejects_unbuildable_parentage() {
        let cfg = CompositeConfig {
            id: "c1".to_string(),
            components: vec![component("a", Some("b")), component("b", Some("a"))],
            connections: vec![],
        };

        assert_eq!(
            parents_first(&cfg).unwrap_err(),
            AssemblyError::UnknownComponent {
                composite_id: "c1".to_string(),
                component: "b".to_string(),
            }
        );
    }
}
