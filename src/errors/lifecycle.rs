// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::component::Status;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Illegal status transition: {from} -> {to}")]
    IllegalTransition { from: Status, to: Status },
}
