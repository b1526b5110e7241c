// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::component::Component;
use crate::traits::ReplicaProvisioner;

/// Default policy: scaling requests are logged by the component and nothing is created.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyProvisioner;

impl LogOnlyProvisioner {
    pub fn new() -> Self {
        Self
    }
}

impl ReplicaProvisioner for LogOnlyProvisioner {
    fn provision(&self, _origin: &Component) -> Option<Arc<Component>> {
        None
    }

    fn decommission(&self, _replica: &Component) {}

    fn name(&self) -> &'static str {
        "log_only"
    }
}
