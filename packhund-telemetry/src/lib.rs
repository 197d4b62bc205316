//! # Packhund Telemetry and Monitoring
//!
//! Crate for logging and metrics around packet allocation.

pub mod logging;
pub mod metrics;

pub use logging::AllocLogger;
pub use metrics::MetricsRecorder;
