// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Replica provisioning policies.
//!
//! | Policy | Provision | Decommission |
//! |--------|-----------|--------------|
//! | [`LogOnlyProvisioner`] | acknowledges, creates nothing | no-op |
//! | [`ChildReplicaProvisioner`] | child of the origin with the same reason | marks the replica terminated |

mod child;
mod log_only;

pub use child::ChildReplicaProvisioner;
pub use log_only::LogOnlyProvisioner;
