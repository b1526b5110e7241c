// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Workload counters, scaling decisions and replica tracking.
//!
//! Both workloads are plain signed integers set by the host; nothing here
//! validates them. Products are computed in `f64` and compared strictly, so
//! an assigned workload of zero makes any positive load dangerous.

use std::fmt;
use std::sync::Arc;

use crate::component::Component;
use crate::config::Thresholds;

/// Outcome of one scaling check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingDecision {
    ScaleUp,
    ScaleDown,
    Steady,
}

/// Decide whether a replica should be added or released.
///
/// * `current > assigned * up_factor` → [`ScalingDecision::ScaleUp`]
/// * `current < assigned * down_factor` with at least one replica → [`ScalingDecision::ScaleDown`]
/// * otherwise → [`ScalingDecision::Steady`]
pub fn decide_scaling(
    current: i64,
    assigned: i64,
    replica_count: usize,
    up_factor: f64,
    down_factor: f64,
) -> ScalingDecision {
    let current = current as f64;
    let assigned = assigned as f64;

    if current > assigned * up_factor {
        ScalingDecision::ScaleUp
    } else if current < assigned * down_factor && replica_count > 0 {
        ScalingDecision::ScaleDown
    } else {
        ScalingDecision::Steady
    }
}

/// `current > assigned * factor`.
pub fn is_dangerous(current: i64, assigned: i64, factor: f64) -> bool {
    current as f64 > assigned as f64 * factor
}

#[derive(Default)]
pub struct Workload {
    current: i64,
    assigned: i64,
    replicas: Vec<Arc<Component>>,
}

impl Workload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn set_current(&mut self, value: i64) {
        self.current = value;
    }

    pub fn assigned(&self) -> i64 {
        self.assigned
    }

    pub fn set_assigned(&mut self, value: i64) {
        self.assigned = value;
    }

    pub fn replicas(&self) -> &[Arc<Component>] {
        &self.replicas
    }

    pub fn replica_count(&self) -> usize {
        self.replicas.len()
    }

    pub fn scaling_decision(&self, thresholds: &Thresholds) -> ScalingDecision {
        decide_scaling(
            self.current,
            self.assigned,
            self.replicas.len(),
            thresholds.scaling_up_factor,
            thresholds.scaling_down_factor,
        )
    }

    pub fn is_dangerous(&self, thresholds: &Thresholds) -> bool {
        is_dangerous(self.current, self.assigned, thresholds.dangerous_workload_factor)
    }

    pub(crate) fn push_replica(&mut self, replica: Arc<Component>) {
        self.replicas.push(replica);
    }

    /// Most recently added replica first.
    pub(crate) fn pop_replica(&mut self) -> Option<Arc<Component>> {
        self.replicas.pop()
    }
}

impl fmt::Debug for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workload")
            .field("current", &self.current)
            .field("assigned", &self.assigned)
            .field("replica_count", &self.replicas.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_scaling_table_driven() {
        struct TestCase {
            name: &'static str,
            current: i64,
            assigned: i64,
            replicas: usize,
            expected: ScalingDecision,
        }

        let test_cases = vec![
            TestCase {
                name: "overloaded",
                current: 13,
                assigned: 10,
                replicas: 0,
                expected: ScalingDecision::ScaleUp,
            },
            TestCase {
                name: "exactly at up factor",
                current: 12,
                assigned: 10,
                replicas: 0,
                expected: ScalingDecision::Steady,
            },
            TestCase {
                name: "underloaded with replica",
                current: 4,
                assigned: 10,
                replicas: 1,
                expected: ScalingDecision::ScaleDown,
            },
            TestCase {
                name: "underloaded without replica",
                current: 4,
                assigned: 10,
                replicas: 0,
                expected: ScalingDecision::Steady,
            },
            TestCase {
                name: "exactly at down factor",
                current: 5,
                assigned: 10,
                replicas: 2,
                expected: ScalingDecision::Steady,
            },
            TestCase {
                name: "nothing assigned, any load",
                current: 5,
                assigned: 0,
                replicas: 0,
                expected: ScalingDecision::ScaleUp,
            },
            TestCase {
                name: "nothing assigned, negative load with replica",
                current: -1,
                assigned: 0,
                replicas: 1,
                expected: ScalingDecision::ScaleDown,
            },
            TestCase {
                name: "nothing assigned, idle",
                current: 0,
                assigned: 0,
                replicas: 1,
                expected: ScalingDecision::Steady,
            },
            TestCase {
                name: "negative workloads compare as numbers",
                current: -20,
                assigned: -10,
                replicas: 1,
                expected: ScalingDecision::ScaleDown,
            },
        ];

        for case in test_cases {
            let decision = decide_scaling(case.current, case.assigned, case.replicas, 1.2, 0.5);
            assert_eq!(decision, case.expected, "{}", case.name);
        }
    }

    #[test]
    fn test_is_dangerous_boundaries() {
        assert!(!is_dangerous(15, 10, 1.5));
        assert!(is_dangerous(16, 10, 1.5));
        assert!(is_dangerous(5, 0, 1.5));
        assert!(!is_dangerous(0, 0, 1.5));
        assert!(!is_dangerous(-1, 0, 1.5));
    }

    #[test]
    fn test_workload_uses_threshold_factors() {
        let mut workload = Workload::new();
        workload.set_assigned(10);
        workload.set_current(13);

        let mut thresholds = Thresholds::default();
        assert_eq!(workload.scaling_decision(&thresholds), ScalingDecision::ScaleUp);

        thresholds.scaling_up_factor = 2.0;
        assert_eq!(workload.scaling_decision(&thresholds), ScalingDecision::Steady);
        assert!(!workload.is_dangerous(&thresholds));
    }
}
