pub mod log_sink;
pub mod provisioner;

pub use log_sink::LogSink;
pub use provisioner::ReplicaProvisioner;
