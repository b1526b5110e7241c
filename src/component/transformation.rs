// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use crate::component::Component;

/// One change of reason, in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evolution {
    pub from: String,
    pub to: String,
    pub at: DateTime<Utc>,
}

/// Record of purpose evolutions and the successor created by a transformation.
#[derive(Default)]
pub struct Transformation {
    evolutions: Vec<Evolution>,
    successor: Option<Arc<Component>>,
}

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_evolution(&mut self, from: String, to: String) {
        self.evolutions.push(Evolution {
            from,
            to,
            at: Utc::now(),
        });
    }

    pub fn evolutions(&self) -> &[Evolution] {
        &self.evolutions
    }

    /// Set the successor; a later transformation replaces an earlier one.
    pub fn set_successor(&mut self, successor: Arc<Component>) -> Option<Arc<Component>> {
        self.successor.replace(successor)
    }

    pub fn successor(&self) -> Option<&Arc<Component>> {
        self.successor.as_ref()
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformation")
            .field("evolutions", &self.evolutions)
            .field("successor", &self.successor.as_ref().map(|s| s.id().short().to_string()))
            .finish()
    }
}
