// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for composite and machine assembly.

use thiserror::Error;

/// Failures while wiring components into composites and composites into machines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    /// A component name was used that the composite does not hold.
    #[error("Component '{component}' not found in composite '{composite_id}'")]
    UnknownComponent {
        composite_id: String,
        component: String,
    },

    /// A composite name was used that the machine does not hold.
    #[error("Composite '{composite}' not found in machine '{machine_id}'")]
    UnknownComposite {
        machine_id: String,
        composite: String,
    },
}
