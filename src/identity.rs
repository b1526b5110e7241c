// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Content-addressed component identifiers.
//!
//! An identifier is the lowercase hex SHA-256 of
//! `reason ++ environment parameters ++ timestamp`. The timestamp (RFC 3339,
//! nanosecond precision) makes two components created with the same reason
//! in the same environment at different instants differ with overwhelming
//! probability. This is best-effort uniqueness, not a collision-free scheme.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::environment::Environment;

/// Length of a hex-encoded identifier.
pub const ID_LENGTH: usize = 64;

/// Unique identifier of a component. Assigned once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight hex characters, for compact display.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComponentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ComponentId> for String {
    fn from(id: ComponentId) -> Self {
        id.0
    }
}

/// Pure digest over the three identity inputs.
pub fn derive_id(reason: &str, parameters: &str, timestamp: &DateTime<Utc>) -> ComponentId {
    let mut hasher = Sha256::new();
    hasher.update(reason.as_bytes());
    hasher.update(parameters.as_bytes());
    hasher.update(timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());
    ComponentId(hex::encode(hasher.finalize()))
}

/// Identifier for a component created now.
pub fn generate_id(reason: &str, environment: &Environment) -> ComponentId {
    derive_id(reason, environment.parameters(), &Utc::now())
}
