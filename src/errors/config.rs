// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Errors that can occur while validating a machine configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two composites share the same ID
    DuplicateCompositeId {
        composite_id: String,
    },
    /// Two components inside one composite share the same name
    DuplicateComponentName {
        composite_id: String,
        component_name: String,
    },
    /// A component names a parent that is not declared in its composite
    UnresolvedParent {
        composite_id: String,
        component_name: String,
        missing_parent: String,
    },
    /// A connection references a component that is not declared in its composite
    UnresolvedConnection {
        composite_id: String,
        missing_component: String,
    },
    /// A machine link references a composite that is not declared
    UnresolvedLink {
        missing_composite: String,
    },
    /// Parent declarations form a loop, so no component could be built first
    CyclicParentage {
        /// The path of component names closing the loop
        cycle: Vec<String>,
    },
    /// A threshold value is outside the range it is meaningful in
    ThresholdOutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateCompositeId { composite_id } => {
                write!(f, "Duplicate composite ID: '{}'", composite_id)
            }
            ValidationError::DuplicateComponentName {
                composite_id,
                component_name,
            } => {
                write!(
                    f,
                    "Duplicate component name '{}' in composite '{}'",
                    component_name, composite_id
                )
            }
            ValidationError::UnresolvedParent {
                composite_id,
                component_name,
                missing_parent,
            } => {
                write!(
                    f,
                    "Component '{}' in composite '{}' names parent '{}' which does not exist",
                    component_name, composite_id, missing_parent
                )
            }
            ValidationError::UnresolvedConnection {
                composite_id,
                missing_component,
            } => {
                write!(
                    f,
                    "Connection in composite '{}' references '{}' which does not exist",
                    composite_id, missing_component
                )
            }
            ValidationError::UnresolvedLink { missing_composite } => {
                write!(
                    f,
                    "Machine link references composite '{}' which does not exist",
                    missing_composite
                )
            }
            ValidationError::CyclicParentage { cycle } => {
                write!(f, "Cyclic parentage detected: {}", cycle.join(" -> "))
            }
            ValidationError::ThresholdOutOfRange {
                name,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Threshold '{}' has value {} but must be {}",
                    name, value, expected
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
