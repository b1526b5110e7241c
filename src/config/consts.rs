/// Failure rate above which a component is considered misaligned with its reason
pub const DEFAULT_MISALIGNMENT_THRESHOLD: f64 = 0.2;
/// Success rate below which purpose evolution is suggested
pub const DEFAULT_PERFORMANCE_THRESHOLD: f64 = 0.8;
/// Current/assigned workload ratio above which the workload is dangerous
pub const DEFAULT_DANGEROUS_WORKLOAD_FACTOR: f64 = 1.5;
/// Current/assigned workload ratio above which a replica is requested
pub const DEFAULT_SCALING_UP_FACTOR: f64 = 1.2;
/// Current/assigned workload ratio below which a replica is released
pub const DEFAULT_SCALING_DOWN_FACTOR: f64 = 0.5;
/// Lifetime operation count that must be exceeded, with no success, to count as continuous failure
pub const DEFAULT_CONTINUOUS_FAILURE_WINDOW: u64 = 1000;
