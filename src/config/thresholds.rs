// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::config::consts::{
    DEFAULT_CONTINUOUS_FAILURE_WINDOW, DEFAULT_DANGEROUS_WORKLOAD_FACTOR,
    DEFAULT_MISALIGNMENT_THRESHOLD, DEFAULT_PERFORMANCE_THRESHOLD, DEFAULT_SCALING_DOWN_FACTOR,
    DEFAULT_SCALING_UP_FACTOR,
};

/// Resolved decision thresholds used by a component's health and workload checks.
///
/// Every comparison against these values is strict: a rate or ratio equal
/// to its threshold never triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub misalignment: f64,
    pub performance: f64,
    pub dangerous_workload_factor: f64,
    pub scaling_up_factor: f64,
    pub scaling_down_factor: f64,
    pub continuous_failure_window: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            misalignment: DEFAULT_MISALIGNMENT_THRESHOLD,
            performance: DEFAULT_PERFORMANCE_THRESHOLD,
            dangerous_workload_factor: DEFAULT_DANGEROUS_WORKLOAD_FACTOR,
            scaling_up_factor: DEFAULT_SCALING_UP_FACTOR,
            scaling_down_factor: DEFAULT_SCALING_DOWN_FACTOR,
            continuous_failure_window: DEFAULT_CONTINUOUS_FAILURE_WINDOW,
        }
    }
}

/// Threshold overrides as written in a machine file. Unset fields fall back to the built-in defaults.
///
/// # Example
/// ```yaml
/// thresholds:
///   misalignment: 0.1
///   scaling_up_factor: 1.5
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ThresholdConfig {
    pub misalignment: Option<f64>,
    pub performance: Option<f64>,
    pub dangerous_workload_factor: Option<f64>,
    pub scaling_up_factor: Option<f64>,
    pub scaling_down_factor: Option<f64>,
    pub continuous_failure_window: Option<u64>,
}

impl ThresholdConfig {
    pub fn resolve(&self) -> Thresholds {
        let defaults = Thresholds::default();
        Thresholds {
            misalignment: self.misalignment.unwrap_or(defaults.misalignment),
            performance: self.performance.unwrap_or(defaults.performance),
            dangerous_workload_factor: self
                .dangerous_workload_factor
                .unwrap_or(defaults.dangerous_workload_factor),
            scaling_up_factor: self.scaling_up_factor.unwrap_or(defaults.scaling_up_factor),
            scaling_down_factor: self
                .scaling_down_factor
                .unwrap_or(defaults.scaling_down_factor),
            continuous_failure_window: self
                .continuous_failure_window
                .unwrap_or(defaults.continuous_failure_window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_resolves_to_defaults() {
        assert_eq!(ThresholdConfig::default().resolve(), Thresholds::default());
    }

    #[test]
    fn test_partial_override_keeps_remaining_defaults() {
        let config: ThresholdConfig =
            serde_yaml::from_str("misalignment: 0.1\ncontinuous_failure_window: 50\n").unwrap();
        let resolved = config.resolve();

        assert_eq!(resolved.misalignment, 0.1);
        assert_eq!(resolved.continuous_failure_window, 50);
        assert_eq!(resolved.performance, DEFAULT_PERFORMANCE_THRESHOLD);
        assert_eq!(resolved.scaling_up_factor, DEFAULT_SCALING_UP_FACTOR);
    }
}
