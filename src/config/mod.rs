// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod runtime;
mod thresholds;
mod validation;

#[cfg(test)]
mod integration_tests;
pub mod consts;

pub use loader::{
    load_and_validate_config, load_config, ComponentConfig, CompositeConfig, Config,
    ConnectionConfig, HistoryConfig, ReplicaPolicy,
};
pub use runtime::MachineBuilder;
pub use thresholds::{ThresholdConfig, Thresholds};
pub use validation::validate_config;
