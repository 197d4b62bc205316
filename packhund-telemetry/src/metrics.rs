//! ## packhund-telemetry::metrics
//! **Prometheus exporter for allocator counters**
//!
//! ### Expectations:
//! - Counter updates off the critical path cost a single atomic add
//! - Gatherable as Prometheus text format by the embedding process
//!
//! ### Components:
//! - `metrics/`: Prometheus exporter for allocator counters
//! - `logging/`: tracing subscriber setup and lifecycle event helper

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: prometheus::Registry,
    pub packets_total: prometheus::Counter,
    pub alloc_failures_total: prometheus::Counter,
    pub packet_bytes: prometheus::Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let packets_total =
            Counter::new("packhund_packets_total", "Total packets allocated").unwrap();

        let alloc_failures_total = Counter::new(
            "packhund_alloc_failures_total",
            "Backing buffer allocations that failed",
        )
        .unwrap();

        let packet_bytes = Histogram::with_opts(
            HistogramOpts::new("packhund_packet_bytes", "Logical packet size in bytes").buckets(
                vec![64.0, 1_024.0, 16_384.0, 262_144.0, 4_194_304.0],
            ),
        )
        .unwrap();

        registry.register(Box::new(packets_total.clone())).unwrap();
        registry
            .register(Box::new(alloc_failures_total.clone()))
            .unwrap();
        registry.register(Box::new(packet_bytes.clone())).unwrap();

        Self {
            registry,
            packets_total,
            alloc_failures_total,
            packet_bytes,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    pub fn inc_packets(&self) {
        self.packets_total.inc();
    }

    pub fn inc_alloc_failures(&self) {
        self.alloc_failures_total.inc();
    }

    pub fn observe_packet_bytes(&self, bytes: f64) {
        self.packet_bytes.observe(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_gathered_text() {
        let recorder = MetricsRecorder::new();
        recorder.inc_packets();
        recorder.inc_packets();
        recorder.inc_alloc_failures();
        recorder.observe_packet_bytes(188.0);

        let text = recorder.gather_metrics().unwrap();
        assert!(text.contains("packhund_packets_total 2"));
        assert!(text.contains("packhund_alloc_failures_total 1"));
        assert!(text.contains("packhund_packet_bytes"));
    }
}
