// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{tags, Severity, StructuredLog};
use std::fmt::{Display, Formatter};

/// Directed link to a peer recorded (or its stored reason overwritten).
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConnectionEstablished<'a> {
    pub peer_id: &'a str,
    pub peer_reason: &'a str,
}

impl Display for ConnectionEstablished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connected to {} (reason '{}')",
            self.peer_id, self.peer_reason
        )
    }
}

impl StructuredLog for ConnectionEstablished<'_> {
    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn tags(&self) -> &'static [&'static str] {
        &[tags::CONNECTION]
    }
}
