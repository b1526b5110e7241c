// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::thresholds::ThresholdConfig;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure describing one machine.
///
/// A machine file declares the machine id, optional threshold and history
/// overrides, the replica policy, the composites with their components and
/// connections, and the links between composites. It is typically loaded
/// from a YAML file.
///
/// # Fields
/// * `machine_id` - Identifier of the machine to build
/// * `thresholds` - Threshold overrides (optional, defaults from `consts`)
/// * `history` - Operation history settings (optional, unbounded by default)
/// * `replicas` - Replica provisioning policy (optional, defaults to `log_only`)
/// * `composites` - Composites and their components
/// * `links` - Composite-to-composite connections (optional)
///
/// # Example
/// ```yaml
/// machine_id: m1
/// thresholds:
///   misalignment: 0.2
/// history:
///   retention: 500
/// replicas: child
/// composites:
///   - id: c1
///     components:
///       - { name: ingest, reason: ingest, assigned_workload: 10 }
///       - { name: transform, reason: transform, parent: ingest }
///     connections:
///       - { from: ingest, to: transform }
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub machine_id: String,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub replicas: ReplicaPolicy,
    #[serde(default)]
    pub composites: Vec<CompositeConfig>,
    #[serde(default)]
    pub links: Vec<ConnectionConfig>,
}

/// Operation history settings.
///
/// # Fields
/// * `retention` - Maximum number of records kept per component; unbounded when absent
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct HistoryConfig {
    pub retention: Option<usize>,
}

/// How a component answers a scaling request.
///
/// # Variants
/// * `LogOnly` - Log the request and create nothing
/// * `Child` - Create a child component with the origin's reason
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplicaPolicy {
    #[default]
    LogOnly,
    Child,
}

/// One composite and its members.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CompositeConfig {
    pub id: String,
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
}

/// One component inside a composite.
///
/// # Fields
/// * `name` - Name the composite knows the component by
/// * `reason` - The component's reason for existence
/// * `parent` - Name of the parent component in the same composite (optional)
/// * `assigned_workload` - Expected workload (optional, zero when absent)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ComponentConfig {
    pub name: String,
    pub reason: String,
    pub parent: Option<String>,
    pub assigned_workload: Option<i64>,
}

/// Directed link between two named members.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub from: String,
    pub to: String,
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load and validate a config from a YAML file
///
/// All validation errors are collected into [`ConfigError::Invalid`].
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
machine_id: m1
composites:
  - id: c1
    components:
      - { name: ingest, reason: ingest, assigned_workload: 10 }
      - { name: transform, reason: transform, parent: ingest }
    connections:
      - { from: ingest, to: transform }
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.machine_id, "m1");
        assert_eq!(cfg.replicas, ReplicaPolicy::LogOnly);
        assert_eq!(cfg.history.retention, None);
        assert_eq!(cfg.composites[0].components.len(), 2);
        assert_eq!(cfg.composites[0].components[0].assigned_workload, Some(10));
        assert_eq!(
            cfg.composites[0].components[1].parent.as_deref(),
            Some("ingest")
        );
        assert!(cfg.links.is_empty());
    }

    #[test]
    fn parse_replica_policy() {
        let cfg: Config = serde_yaml::from_str("machine_id: m1\nreplicas: child\n").unwrap();
        assert_eq!(cfg.replicas, ReplicaPolicy::Child);

        let result: Result<Config, _> = serde_yaml::from_str("machine_id: m1\nreplicas: cloned\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
machine_id: m1
history:
  retention: 100
composites:
  - id: c1
    components:
      - {{ name: ingest, reason: ingest }}
"#
        )
        .unwrap();

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.history.retention, Some(100));
    }

    #[test]
    fn test_load_and_validate_reports_every_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
machine_id: m1
composites:
  - id: c1
    components:
      - {{ name: ingest, reason: ingest, parent: missing }}
    connections:
      - {{ from: ingest, to: nowhere }}
"#
        )
        .unwrap();

        match load_and_validate_config(file.path()) {
            Err(ConfigError::Invalid(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_config("does/not/exist.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_malformed_yaml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "machine_id: [unterminated").unwrap();

        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }
}
