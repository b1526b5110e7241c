// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Lifecycle status set and its transition table.
//!
//! ```text
//!  INITIALIZING ──► READY ──► RECEIVING_INPUT ──► PROCESSING_INPUT ──► OUTPUTTING_RESULT
//!                    ▲ │                                                     │
//!                    │ ├──► DORMANT ◄──┐                                     │
//!                    │ └──► RECOVERING ┘◄── (any active phase)               │
//!                    └───────────────────────────────────────────────────────┘
//!  every non-terminal status ──► DEACTIVATING (terminal)
//! ```

use std::fmt;

use crate::errors::LifecycleError;

/// Named phase a component occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Initializing,
    Ready,
    ReceivingInput,
    ProcessingInput,
    OutputtingResult,
    Recovering,
    Dormant,
    Deactivating,
}

impl Status {
    pub const ALL: [Status; 8] = [
        Status::Initializing,
        Status::Ready,
        Status::ReceivingInput,
        Status::ProcessingInput,
        Status::OutputtingResult,
        Status::Recovering,
        Status::Dormant,
        Status::Deactivating,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Status::Initializing => "Wiring subsystems",
            Status::Ready => "Prepared to accept input",
            Status::ReceivingInput => "Accepting incoming data",
            Status::ProcessingInput => "Performing operations on data",
            Status::OutputtingResult => "Emitting results",
            Status::Recovering => "Attempting to recover from an error",
            Status::Dormant => "Inactive but available to reactivate",
            Status::Deactivating => "Shutting down",
        }
    }

    /// Statuses directly reachable from `self`.
    pub fn allowed_transitions(self) -> &'static [Status] {
        use Status::*;
        match self {
            Initializing => &[Ready, Deactivating],
            Ready => &[ReceivingInput, Dormant, Recovering, Deactivating],
            ReceivingInput => &[ProcessingInput, Recovering, Deactivating],
            ProcessingInput => &[OutputtingResult, Recovering, Deactivating],
            OutputtingResult => &[Ready, Recovering, Deactivating],
            Recovering => &[Ready, Dormant, Deactivating],
            Dormant => &[Ready, Deactivating],
            Deactivating => &[],
        }
    }

    pub fn can_transition_to(self, next: Status) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Initializing => "INITIALIZING",
            Status::Ready => "READY",
            Status::ReceivingInput => "RECEIVING_INPUT",
            Status::ProcessingInput => "PROCESSING_INPUT",
            Status::OutputtingResult => "OUTPUTTING_RESULT",
            Status::Recovering => "RECOVERING",
            Status::Dormant => "DORMANT",
            Status::Deactivating => "DEACTIVATING",
        };
        f.write_str(name)
    }
}

/// Current status of one component.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    status: Status,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            status: Status::Initializing,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Move to `next` if the table allows it; returns the previous status.
    pub fn transition(&mut self, next: Status) -> Result<Status, LifecycleError> {
        if !self.status.can_transition_to(next) {
            return Err(LifecycleError::IllegalTransition {
                from: self.status,
                to: next,
            });
        }
        let previous = self.status;
        self.status = next;
        Ok(previous)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_processing_cycle() {
        let mut lifecycle = Lifecycle::new();
        let path = [
            Status::Ready,
            Status::ReceivingInput,
            Status::ProcessingInput,
            Status::OutputtingResult,
            Status::Ready,
            Status::Dormant,
            Status::Ready,
            Status::Deactivating,
        ];

        for next in path {
            assert!(lifecycle.transition(next).is_ok(), "-> {}", next);
        }
        assert_eq!(lifecycle.status(), Status::Deactivating);
    }

    #[test]
    fn test_illegal_transitions_are_rejected() {
        struct TestCase {
            name: &'static str,
            setup: Vec<Status>,
            attempt: Status,
        }

        let test_cases = vec![
            TestCase {
                name: "skip ready",
                setup: vec![],
                attempt: Status::ProcessingInput,
            },
            TestCase {
                name: "self transition",
                setup: vec![Status::Ready],
                attempt: Status::Ready,
            },
            TestCase {
                name: "output before processing",
                setup: vec![Status::Ready, Status::ReceivingInput],
                attempt: Status::OutputtingResult,
            },
            TestCase {
                name: "leave terminal status",
                setup: vec![Status::Deactivating],
                attempt: Status::Ready,
            },
        ];

        for case in test_cases {
            let mut lifecycle = Lifecycle::new();
            for step in &case.setup {
                lifecycle.transition(*step).unwrap();
            }
            let before = lifecycle.status();

            let result = lifecycle.transition(case.attempt);

            assert_eq!(
                result,
                Err(LifecycleError::IllegalTransition {
                    from: before,
                    to: case.attempt
                }),
                "{}",
                case.name
            );
            assert_eq!(lifecycle.status(), before, "{}", case.name);
        }
    }

    #[test]
    fn test_only_deactivating_is_terminal() {
        for status in Status::ALL {
            assert_eq!(status.is_terminal(), status == Status::Deactivating);
            if !status.is_terminal() {
                assert!(status.can_transition_to(Status::Deactivating));
            }
        }
    }

    #[test]
    fn test_display_uses_phase_names() {
        assert_eq!(Status::ReceivingInput.to_string(), "RECEIVING_INPUT");
        assert_eq!(Status::Deactivating.to_string(), "DEACTIVATING");
    }
}
