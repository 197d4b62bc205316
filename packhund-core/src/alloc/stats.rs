//! ## packhund-core::alloc::stats
//! **Allocation statistics and tracking**
//!
//! This module provides functionality for tracking and reporting
//! packet allocation statistics within packhund's allocation system.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Allocator-wide statistics block.
///
/// This struct uses atomic operations for thread-safe statistics tracking.
#[derive(Debug)]
pub struct AllocStats {
    packets_allocated: AtomicUsize,
    packets_released: AtomicUsize,
    bytes_copied: AtomicUsize,
    failed_allocations: AtomicUsize,
}

impl AllocStats {
    /// Creates a new `AllocStats` instance with all counters initialized to zero.
    pub fn new() -> Self {
        AllocStats {
            packets_allocated: AtomicUsize::new(0),
            packets_released: AtomicUsize::new(0),
            bytes_copied: AtomicUsize::new(0),
            failed_allocations: AtomicUsize::new(0),
        }
    }

    /// Records a successful packet allocation.
    #[inline]
    pub fn record_allocation(&self) {
        self.packets_allocated.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a packet release.
    #[inline]
    pub fn record_release(&self) {
        self.packets_released.fetch_add(1, Ordering::Relaxed);
    }

    /// Records `count` bytes copied out of an external buffer.
    #[inline]
    pub fn record_bytes_copied(&self, count: usize) {
        self.bytes_copied.fetch_add(count, Ordering::Relaxed);
    }

    /// Records a failed backing-buffer allocation.
    #[inline]
    pub fn record_failure(&self) {
        self.failed_allocations.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total count of packets allocated so far.
    pub fn packets_allocated(&self) -> usize {
        self.packets_allocated.load(Ordering::Relaxed)
    }

    /// Returns the total count of packets released so far.
    pub fn packets_released(&self) -> usize {
        self.packets_released.load(Ordering::Relaxed)
    }

    /// Returns the total count of bytes copied from external buffers.
    pub fn bytes_copied(&self) -> usize {
        self.bytes_copied.load(Ordering::Relaxed)
    }

    /// Returns the total count of failed allocations.
    pub fn failed_allocations(&self) -> usize {
        self.failed_allocations.load(Ordering::Relaxed)
    }

    /// Returns the number of packets currently alive.
    pub fn live_packets(&self) -> usize {
        self.packets_allocated()
            .saturating_sub(self.packets_released())
    }
}

impl Default for AllocStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let stats = AllocStats::new();
        assert_eq!(stats.packets_allocated(), 0);
        assert_eq!(stats.packets_released(), 0);
        assert_eq!(stats.bytes_copied(), 0);
        assert_eq!(stats.failed_allocations(), 0);
        assert_eq!(stats.live_packets(), 0);
    }

    #[test]
    fn live_packets_tracks_alloc_release_balance() {
        let stats = AllocStats::new();
        stats.record_allocation();
        stats.record_allocation();
        stats.record_allocation();
        stats.record_release();
        assert_eq!(stats.live_packets(), 2);
        stats.record_release();
        stats.record_release();
        assert_eq!(stats.live_packets(), 0);
    }

    #[test]
    fn bytes_copied_accumulates() {
        let stats = AllocStats::new();
        stats.record_bytes_copied(100);
        stats.record_bytes_copied(28);
        assert_eq!(stats.bytes_copied(), 128);
    }
}
