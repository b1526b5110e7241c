// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for machine descriptions.
//!
//! A machine file is validated before anything is built, so a successful
//! validation guarantees the [`MachineBuilder`](crate::config::MachineBuilder)
//! can wire every component, connection and link it names.
//!
//! # Validation Pipeline
//!
//! 1. **Uniqueness**: composite ids are unique; component names are unique within a composite
//! 2. **References**: parents, connection endpoints and machine links name declared members
//! 3. **Cycle Detection**: parent declarations inside each composite form no loop
//! 4. **Ranges**: resolved thresholds and history retention are meaningful
//!
//! Cycle detection needs every parent reference to resolve, so it only runs
//! when stages 1 and 2 found nothing. Range checks are independent and
//! always run. All errors found are returned together.
//!
//! # Cycle Detection Algorithm
//! Depth-first search over `parent -> child` edges with a recursion stack.
//! Meeting a node that is still on the stack closes a cycle; the path from
//! that node to the current one is reported. O(V + E) per composite.
//!
//! # Example
//! ```rust
//! use the_tubeline::config::{validate_config, ComponentConfig, CompositeConfig, Config};
//! use the_tubeline::errors::ValidationError;
//!
//! let config = Config {
//!     machine_id: "m1".to_string(),
//!     thresholds: Default::default(),
//!     history: Default::default(),
//!     replicas: Default::default(),
//!     composites: vec![CompositeConfig {
//!         id: "c1".to_string(),
//!         components: vec![ComponentConfig {
//!             name: "transform".to_string(),
//!             reason: "transform".to_string(),
//!             parent: Some("ingest".to_string()),
//!             assigned_workload: None,
//!         }],
//!         connections: vec![],
//!     }],
//!     links: vec![],
//! };
//!
//! let errors = validate_config(&config).unwrap_err();
//! assert!(matches!(errors[0], ValidationError::UnresolvedParent { .. }));
//! ```

use std::collections::{BTreeMap, HashSet};

use crate::config::{CompositeConfig, Config};
use crate::errors::ValidationError;

/// Validates a machine configuration for structural integrity.
///
/// # Returns
///
/// * `Ok(())` - Configuration can be built
/// * `Err(Vec<ValidationError>)` - Every validation error found
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    errors.extend(validate_unique_ids(config));
    errors.extend(validate_references(config));

    if errors.is_empty() {
        for composite in &config.composites {
            if let Some(cycle) = find_parent_cycle(composite) {
                errors.push(ValidationError::CyclicParentage { cycle });
            }
        }
    }

    errors.extend(validate_ranges(config));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_ids(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut composite_ids = HashSet::new();

    for composite in &config.composites {
        if !composite_ids.insert(&composite.id) {
            errors.push(ValidationError::DuplicateCompositeId {
                composite_id: composite.id.clone(),
            });
        }

        let mut names = HashSet::new();
        for component in &composite.components {
            if !names.insert(&component.name) {
                errors.push(ValidationError::DuplicateComponentName {
                    composite_id: composite.id.clone(),
                    component_name: component.name.clone(),
                });
            }
        }
    }

    errors
}

fn validate_references(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for composite in &config.composites {
        let names: HashSet<&String> = composite.components.iter().map(|c| &c.name).collect();

        for component in &composite.components {
            if let Some(parent) = &component.parent {
                if !names.contains(parent) {
                    errors.push(ValidationError::UnresolvedParent {
                        composite_id: composite.id.clone(),
                        component_name: component.name.clone(),
                        missing_parent: parent.clone(),
                    });
                }
            }
        }

        for connection in &composite.connections {
            for endpoint in [&connection.from, &connection.to] {
                if !names.contains(endpoint) {
                    errors.push(ValidationError::UnresolvedConnection {
                        composite_id: composite.id.clone(),
                        missing_component: endpoint.clone(),
                    });
                }
            }
        }
    }

    let composite_ids: HashSet<&String> = config.composites.iter().map(|c| &c.id).collect();
    for link in &config.links {
        for endpoint in [&link.from, &link.to] {
            if !composite_ids.contains(endpoint) {
                errors.push(ValidationError::UnresolvedLink {
                    missing_composite: endpoint.clone(),
                });
            }
        }
    }

    errors
}

/// First parent cycle inside `composite`, as a closed path of component names.
///
/// Assumes every parent reference resolves.
fn find_parent_cycle(composite: &CompositeConfig) -> Option<Vec<String>> {
    // parent -> children, ordered so the reported cycle is deterministic
    let mut graph: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for component in &composite.components {
        graph.entry(component.name.as_str()).or_default();
    }
    for component in &composite.components {
        if let Some(parent) = &component.parent {
            graph
                .entry(parent.as_str())
                .or_default()
                .push(component.name.as_str());
        }
    }

    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();
    let mut path = Vec::new();

    for &node in graph.keys() {
        if !visited.contains(node) {
            if let Some(cycle) = dfs(node, &graph, &mut visited, &mut on_stack, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn dfs<'a>(
    node: &'a str,
    graph: &BTreeMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    on_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    on_stack.insert(node);
    path.push(node);

    if let Some(children) = graph.get(node) {
        for &child in children {
            if !visited.contains(child) {
                if let Some(cycle) = dfs(child, graph, visited, on_stack, path) {
                    return Some(cycle);
                }
            } else if on_stack.contains(child) {
                let start = path.iter().position(|n| *n == child).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(child.to_string());
                return Some(cycle);
            }
        }
    }

    on_stack.remove(node);
    path.pop();
    None
}

fn validate_ranges(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let t = config.thresholds.resolve();

    let unit_interval = [
        ("misalignment", t.misalignment),
        ("performance", t.performance),
    ];
    for (name, value) in unit_interval {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::ThresholdOutOfRange {
                name,
                value,
                expected: "between 0.0 and 1.0",
            });
        }
    }

    let positive = [
        ("dangerous_workload_factor", t.dangerous_workload_factor),
        ("scaling_up_factor", t.scaling_up_factor),
        ("scaling_down_factor", t.scaling_down_factor),
    ];
    for (name, value) in positive {
        if value <= 0.0 || value.is_nan() {
            errors.push(ValidationError::ThresholdOutOfRange {
                name,
                value,
                expected: "greater than 0.0",
            });
        }
    }

    if t.scaling_down_factor > 0.0 && t.scaling_down_factor >= t.scaling_up_factor {
        errors.push(ValidationError::ThresholdOutOfRange {
            name: "scaling_down_factor",
            value: t.scaling_down_factor,
            expected: "less than scaling_up_factor",
        });
    }

    if config.history.retention == Some(0) {
        errors.push(ValidationError::ThresholdOutOfRange {
            name: "history.retention",
            value: 0.0,
            expected: "at least 1",
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComponentConfig, ConnectionConfig, ThresholdConfig};

    fn component(name: &str, parent: Option<&str>) -> ComponentConfig {
        ComponentConfig {
            name: name.to_string(),
            reason: name.to_string(),
            parent: parent.map(str::to_string),
            assigned_workload: None,
        }
    }

    fn composite(id: &str, components: Vec<ComponentConfig>) -> CompositeConfig {
        CompositeConfig {
            id: id.to_string(),
            components,
            connections: vec![],
        }
    }

    fn config(composites: Vec<CompositeConfig>) -> Config {
        Config {
            machine_id: "m1".to_string(),
            thresholds: ThresholdConfig::default(),
            history: Default::default(),
            replicas: Default::default(),
            composites,
            links: vec![],
        }
    }

    #[test]
    fn test_valid_empty_config() {
        assert!(validate_config(&config(vec![])).is_ok());
    }

    #[test]
    fn test_valid_parent_chain() {
        let cfg = config(vec![composite(
            "c1",
            vec![
                component("ingest", None),
                component("transform", Some("ingest")),
                component("emit", Some("transform")),
            ],
        )]);
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_duplicates_are_reported() {
        let cfg = config(vec![
            composite("c1", vec![component("a", None), component("a", None)]),
            composite("c1", vec![]),
        ]);

        let errors = validate_config(&cfg).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateComponentName {
            composite_id: "c1".to_string(),
            component_name: "a".to_string(),
        }));
        assert!(errors.contains(&ValidationError::DuplicateCompositeId {
            composite_id: "c1".to_string(),
        }));
    }

    #[test]
    fn test_component_names_may_repeat_across_composites() {
        let cfg = config(vec![
            composite("c1", vec![component("ingest", None)]),
            composite("c2", vec![component("ingest", None)]),
        ]);
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_unresolved_references() {
        let mut cfg = config(vec![composite("c1", vec![component("a", None)])]);
        cfg.composites[0].connections.push(ConnectionConfig {
            from: "a".to_string(),
            to: "ghost".to_string(),
        });
        cfg.links.push(ConnectionConfig {
            from: "c1".to_string(),
            to: "c9".to_string(),
        });

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnresolvedConnection {
                    composite_id: "c1".to_string(),
                    missing_component: "ghost".to_string(),
                },
                ValidationError::UnresolvedLink {
                    missing_composite: "c9".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_cycles_are_detected() {
        struct TestCase {
            name: &'static str,
            components: Vec<ComponentConfig>,
            expected_cycle: Vec<&'static str>,
        }

        let test_cases = vec![
            TestCase {
                name: "self parent",
                components: vec![component("a", Some("a"))],
                expected_cycle: vec!["a", "a"],
            },
            TestCase {
                name: "two node loop",
                components: vec![component("a", Some("b")), component("b", Some("a"))],
                expected_cycle: vec!["a", "b", "a"],
            },
            TestCase {
                name: "loop behind a root",
                components: vec![
                    component("root", None),
                    component("x", Some("z")),
                    component("y", Some("x")),
                    component("z", Some("y")),
                ],
                expected_cycle: vec!["x", "y", "z", "x"],
            },
        ];

        for case in test_cases {
            let cfg = config(vec![composite("c1", case.components)]);
            let errors = validate_config(&cfg).unwrap_err();
            assert_eq!(
                errors,
                vec![ValidationError::CyclicParentage {
                    cycle: case.expected_cycle.iter().map(|s| s.to_string()).collect()
                }],
                "{}",
                case.name
            );
        }
    }

    #[test]
    fn test_cycle_detection_skipped_when_references_fail() {
        let cfg = config(vec![composite(
            "c1",
            vec![
                component("a", Some("b")),
                component("b", Some("a")),
                component("c", Some("missing")),
            ],
        )]);

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::UnresolvedParent { .. }));
    }

    #[test]
    fn test_threshold_ranges() {
        struct TestCase {
            name: &'static str,
            thresholds: ThresholdConfig,
            retention: Option<usize>,
            invalid: Option<&'static str>,
        }

        let test_cases = vec![
            TestCase {
                name: "defaults",
                thresholds: ThresholdConfig::default(),
                retention: None,
                invalid: None,
            },
            TestCase {
                name: "misalignment above one",
                thresholds: ThresholdConfig {
                    misalignment: Some(1.5),
                    ..Default::default()
                },
                retention: None,
                invalid: Some("misalignment"),
            },
            TestCase {
                name: "negative dangerous factor",
                thresholds: ThresholdConfig {
                    dangerous_workload_factor: Some(-1.0),
                    ..Default::default()
                },
                retention: None,
                invalid: Some("dangerous_workload_factor"),
            },
            TestCase {
                name: "scale down above scale up",
                thresholds: ThresholdConfig {
                    scaling_down_factor: Some(1.3),
                    ..Default::default()
                },
                retention: None,
                invalid: Some("scaling_down_factor"),
            },
            TestCase {
                name: "zero retention",
                thresholds: ThresholdConfig::default(),
                retention: Some(0),
                invalid: Some("history.retention"),
            },
        ];

        for case in test_cases {
            let mut cfg = config(vec![]);
            cfg.thresholds = case.thresholds;
            cfg.history.retention = case.retention;

            match (validate_config(&cfg), case.invalid) {
                (Ok(()), None) => {}
                (Err(errors), Some(field)) => {
                    assert_eq!(errors.len(), 1, "{}", case.name);
                    assert!(
                        matches!(errors[0], ValidationError::ThresholdOutOfRange { name, .. } if name == field),
                        "{}",
                        case.name
                    );
                }
                (result, _) => panic!("{}: unexpected {:?}", case.name, result),
            }
        }
    }
}
