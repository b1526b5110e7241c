// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod component;      // component aggregate + subsystems
pub mod composite;      // named groups of components
pub mod config;         // config + machine builder
pub mod environment;    // host snapshot
pub mod errors;         // error handling
pub mod identity;       // content-addressed ids
pub mod machine;        // orchestrated collections of composites
pub mod observability;
pub mod provisioning;   // replica provisioning policies
pub mod traits;         // injected capabilities

pub use component::{Component, ComponentBuilder, Status};
pub use composite::Composite;
pub use environment::Environment;
pub use identity::ComponentId;
pub use machine::Machine;
