// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host environment snapshot used as context for identity generation.
//!
//! An [`Environment`] is captured once per process (or per logical
//! deployment context), never changes afterwards, and is shared by
//! reference (`Arc<Environment>`) across every component it seeds.
//!
//! # Failure policy
//!
//! * Hostname lookup failure degrades to [`UNKNOWN_HOSTNAME`]; it never fails capture.
//! * CPU count falls back to 1 when the platform cannot report parallelism.
//! * Memory and OS details come from `sysinfo`, which reports zero / `None`
//!   rather than failing; `None` becomes `"unknown"`.
//! * `memory_mb` is the total physical memory of the host, not a per-process
//!   or runtime heap limit.
//!
//! # Example
//! ```
//! use the_tubeline::environment::{Environment, EnvironmentInfo};
//!
//! let env = Environment::from_info(EnvironmentInfo {
//!     cpu_architecture: "x86_64".to_string(),
//!     cpu_count: 8,
//!     hostname: "build-01".to_string(),
//!     memory_mb: 16384,
//!     os: "Linux 6.1".to_string(),
//! });
//!
//! assert_eq!(
//!     env.parameters(),
//!     r#"{"cpu_architecture":"x86_64","cpu_count":8,"hostname":"build-01","memory_mb":16384,"os":"Linux 6.1"}"#
//! );
//! assert_eq!(env.environment_hash().len(), 64);
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use sysinfo::System;

pub const UNKNOWN_HOSTNAME: &str = "unknown";

const UNKNOWN: &str = "unknown";
const BYTES_PER_MB: u64 = 1024 * 1024;

/// Host characteristics captured at one instant.
///
/// Field order is alphabetical so the serialized parameter string is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentInfo {
    pub cpu_architecture: String,
    pub cpu_count: usize,
    pub hostname: String,
    /// Total host memory, in MB.
    pub memory_mb: u64,
    pub os: String,
}

impl EnvironmentInfo {
    /// Query the running host.
    pub fn detect() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();

        let os = match (System::name(), System::os_version()) {
            (Some(name), Some(version)) => format!("{} {}", name, version),
            (Some(name), None) => name,
            _ => UNKNOWN.to_string(),
        };

        Self {
            cpu_architecture: std::env::consts::ARCH.to_string(),
            cpu_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            hostname: detect_hostname(),
            memory_mb: sys.total_memory() / BYTES_PER_MB,
            os,
        }
    }
}

fn detect_hostname() -> String {
    match hostname::get() {
        Ok(name) => {
            let name = name.to_string_lossy().trim().to_string();
            if name.is_empty() {
                UNKNOWN_HOSTNAME.to_string()
            } else {
                name
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Hostname lookup failed, using '{}'", UNKNOWN_HOSTNAME);
            UNKNOWN_HOSTNAME.to_string()
        }
    }
}

/// Immutable snapshot of the host a component runs on.
#[derive(Debug, Clone)]
pub struct Environment {
    info: EnvironmentInfo,
    parameters: String,
    captured_at: DateTime<Utc>,
}

impl Environment {
    /// Capture the current host.
    pub fn detect() -> Self {
        let env = Self::from_info(EnvironmentInfo::detect());
        tracing::info!(
            hostname = %env.info.hostname,
            os = %env.info.os,
            cpu_count = env.info.cpu_count,
            "Environment captured"
        );
        env
    }

    /// Build an environment from already-known characteristics.
    pub fn from_info(info: EnvironmentInfo) -> Self {
        let parameters = render_parameters(&info);
        Self {
            info,
            parameters,
            captured_at: Utc::now(),
        }
    }

    pub fn info(&self) -> &EnvironmentInfo {
        &self.info
    }

    /// Stable, human-readable parameter string (compact JSON, sorted keys).
    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    /// Lowercase hex SHA-256 of [`parameters`](Self::parameters); always 64 characters.
    pub fn environment_hash(&self) -> String {
        hex::encode(Sha256::digest(self.parameters.as_bytes()))
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Flat key/value view for diagnostics.
    pub fn context(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("cpu_architecture", self.info.cpu_architecture.clone()),
            ("cpu_count", self.info.cpu_count.to_string()),
            ("env_hash", self.environment_hash()),
            ("hostname", self.info.hostname.clone()),
            ("memory_mb", self.info.memory_mb.to_string()),
            ("os", self.info.os.clone()),
        ])
    }
}

fn render_parameters(info: &EnvironmentInfo) -> String {
    // plain strings and integers always serialize
    serde_json::to_string(info).unwrap_or_else(|_| {
        format!(
            "{}|{}|{}|{}|{}",
            info.cpu_architecture, info.cpu_count, info.hostname, info.memory_mb, info.os
        )
    })
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Environment[host={}, os={}, cpus={}, memory={}MB]",
            self.info.hostname, self.info.os, self.info.cpu_count, self.info.memory_mb
        )
    }
}

#[cfg(test)]
pub(crate) fn test_environment() -> Environment {
    Environment::from_info(EnvironmentInfo {
        cpu_architecture: "x86_64".to_string(),
        cpu_count: 4,
        hostname: "test-host".to_string(),
        memory_mb: 8192,
        os: "Linux 6.1".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_embed_every_attribute() {
        let env = test_environment();
        let params = env.parameters();

        for expected in ["x86_64", "\"cpu_count\":4", "test-host", "8192", "Linux 6.1"] {
            assert!(params.contains(expected), "missing {} in {}", expected, params);
        }
    }

    #[test]
    fn test_environment_hash_is_stable_lowercase_hex() {
        let env = test_environment();
        let hash = env.environment_hash();

        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(hash, env.environment_hash());
        assert_eq!(hash, test_environment().environment_hash());
    }

    #[test]
    fn test_environment_hash_tracks_parameters() {
        let mut info = test_environment().info().clone();
        info.hostname = "other-host".to_string();
        let other = Environment::from_info(info);

        assert_ne!(other.environment_hash(), test_environment().environment_hash());
    }

    #[test]
    fn test_detect_never_fails() {
        let env = Environment::detect();

        assert!(!env.info().hostname.is_empty());
        assert!(env.info().cpu_count >= 1);
        assert_eq!(env.environment_hash().len(), 64);
    }

    #[test]
    fn test_context_includes_hash() {
        let env = test_environment();
        let context = env.context();

        assert_eq!(context.get("env_hash"), Some(&env.environment_hash()));
        assert_eq!(context.get("hostname").map(String::as_str), Some("test-host"));
    }
}
