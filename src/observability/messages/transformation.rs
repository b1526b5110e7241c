// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for purpose evolution and identity transformation.

use super::{tags, Severity, StructuredLog};
use std::fmt::{Display, Formatter};

/// Purpose evolved in place; identity unchanged.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_tubeline::observability::messages::transformation::PurposeEvolved;
///
/// let msg = PurposeEvolved {
///     from: "parse",
///     to: "validate",
/// };
///
/// assert_eq!(msg.to_string(), "Purpose evolved: 'parse' -> 'validate'");
/// ```
pub struct PurposeEvolved<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

impl Display for PurposeEvolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Purpose evolved: '{}' -> '{}'", self.from, self.to)
    }
}

impl StructuredLog for PurposeEvolved<'_> {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::EVOLUTION]
    }
}

/// Successor component created; the origin is terminated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TransformedIntoNewEntity<'a> {
    pub new_reason: &'a str,
    pub successor_id: &'a str,
}

impl Display for TransformedIntoNewEntity<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Transformed into new entity {} with reason '{}'",
            self.successor_id, self.new_reason
        )
    }
}

impl StructuredLog for TransformedIntoNewEntity<'_> {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::TRANSFORMATION]
    }
}
