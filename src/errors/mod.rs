// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod assembly;
mod config;
mod lifecycle;

pub use assembly::AssemblyError;
pub use config::{ConfigError, ValidationError};
pub use lifecycle::LifecycleError;
