// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::component::Component;
use crate::traits::ReplicaProvisioner;

/// Replicas are children of their origin carrying the origin's current reason.
///
/// A replica inherits the origin's settings, this provisioner included, so
/// an overloaded replica can scale in turn.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChildReplicaProvisioner;

impl ChildReplicaProvisioner {
    pub fn new() -> Self {
        Self
    }
}

impl ReplicaProvisioner for ChildReplicaProvisioner {
    fn provision(&self, origin: &Component) -> Option<Arc<Component>> {
        Some(Arc::new(origin.spawn_child(origin.reason())))
    }

    fn decommission(&self, replica: &Component) {
        replica.set_terminated(true);
    }

    fn name(&self) -> &'static str {
        "child"
    }
}
