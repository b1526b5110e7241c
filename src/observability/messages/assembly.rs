// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for composite and machine assembly.
//!
//! This module contains message types for logging events related to:
//! * Components joining a composite
//! * Links between members of a composite or machine
//! * Activation, deactivation and shutdown of containers

use super::{tags, Severity, StructuredLog};
use std::fmt::{Display, Formatter};

/// Which kind of container emitted an assembly message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Composite,
    Machine,
}

impl Container {
    fn label(self) -> &'static str {
        match self {
            Container::Composite => "Composite",
            Container::Machine => "Machine",
        }
    }

    fn tags(self) -> &'static [&'static str] {
        match self {
            Container::Composite => &[tags::COMPOSITE],
            Container::Machine => &[tags::MACHINE],
        }
    }
}

/// Member (component or composite) added to a container.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_tubeline::observability::messages::assembly::{Container, MemberAdded};
///
/// let msg = MemberAdded {
///     container: Container::Composite,
///     container_id: "c1",
///     member: "ingest",
/// };
///
/// assert_eq!(msg.to_string(), "Composite 'c1' added member 'ingest'");
/// ```
pub struct MemberAdded<'a> {
    pub container: Container,
    pub container_id: &'a str,
    pub member: &'a str,
}

impl Display for MemberAdded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' added member '{}'",
            self.container.label(),
            self.container_id,
            self.member
        )
    }
}

impl StructuredLog for MemberAdded<'_> {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        self.container.tags()
    }
}

/// An existing member was replaced under the same name.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
pub struct MemberReplaced<'a> {
    pub container: Container,
    pub container_id: &'a str,
    pub member: &'a str,
}

impl Display for MemberReplaced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' replaced existing member '{}'",
            self.container.label(),
            self.container_id,
            self.member
        )
    }
}

impl StructuredLog for MemberReplaced<'_> {
    fn severity(&self) -> Severity {
        Severity::Warn
    }

    fn tags(&self) -> &'static [&'static str] {
        self.container.tags()
    }
}

/// Two members linked inside a container.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct MembersLinked<'a> {
    pub container: Container,
    pub container_id: &'a str,
    pub source: &'a str,
    pub target: &'a str,
}

impl Display for MembersLinked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' linked {} -> {}",
            self.container.label(),
            self.container_id,
            self.source,
            self.target
        )
    }
}

impl StructuredLog for MembersLinked<'_> {
    fn severity(&self) -> Severity {
        Severity::Debug
    }

    fn tags(&self) -> &'static [&'static str] {
        self.container.tags()
    }
}

/// Container activity state changed (activated, deactivated, shutting down, ...).
///
/// # Log Level
/// `info!` - Important operational event
pub struct ContainerStateChanged<'a> {
    pub container: Container,
    pub container_id: &'a str,
    pub state: &'a str,
}

impl Display for ContainerStateChanged<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' {}",
            self.container.label(),
            self.container_id,
            self.state
        )
    }
}

impl StructuredLog for ContainerStateChanged<'_> {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        self.container.tags()
    }
}
