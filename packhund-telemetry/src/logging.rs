//! ## packhund-telemetry::logging
//! **Structured logging for the allocation path**
//!
//! ### Expectations:
//! - Negligible overhead when the trace level is filtered out
//! - Structured events carrying packet sizes and lifecycle operations
//!
//! ### Components:
//! - `metrics/`: Prometheus exporter for allocator counters
//! - `logging/`: tracing subscriber setup and lifecycle event helper
//!
//! Structured logging with tracing and OpenTelemetry

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct AllocLogger;

impl AllocLogger {
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_thread_names(true)
            .with_span_events(FmtSpan::ENTER)
            .init()
    }

    /// Emits one structured lifecycle event for a packet operation.
    pub fn log_packet_event(operation: &str, metadata: Vec<KeyValue>) {
        let span = info_span!(
            "packet_event",
            operation = operation,
            otel.kind = "INTERNAL"
        );

        span.in_scope(|| {
            tracing::info!(
                metadata = ?metadata,
                "Packet lifecycle event"
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_logging() {
        AllocLogger::log_packet_event("duplicate", vec![KeyValue::new("len", 188i64)]);
        assert!(logs_contain("Packet lifecycle event"));
    }
}
