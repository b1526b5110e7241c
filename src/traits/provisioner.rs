use std::sync::Arc;

use crate::component::Component;

/// Replica provisioning policy invoked by a component's scaling check.
///
/// The scaling check only decides *whether* a replica is needed; what a
/// replica is, how it relates to its origin and how it is torn down belongs
/// to the provisioner.
pub trait ReplicaProvisioner: Send + Sync {
    /// Produce a replica of `origin`, or `None` to only acknowledge the request.
    fn provision(&self, origin: &Component) -> Option<Arc<Component>>;

    /// Release a replica the origin no longer tracks.
    fn decommission(&self, replica: &Component);

    fn name(&self) -> &'static str;
}
