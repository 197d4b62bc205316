//! ## packhund-core::alloc::packet
//! **Demuxed packet entity and its allocator**
//!
//! A `Packet` carries one unit of still-encoded media data plus the timing
//! and position metadata the demuxer attaches on its way to the decoder.
//! The `PacketAllocator` component owns every lifecycle operation: creation
//! from an external descriptor, from a raw byte span, or zero-filled;
//! explicit duplication; release via `Drop`.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{trace, warn};

use packhund_telemetry::MetricsRecorder;

use crate::alloc::buffer::{BufferProvider, HeapProvider, PaddedBuffer};
use crate::alloc::stats::AllocStats;
use crate::config::AllocatorConfig;
use crate::error::PacketError;

/// Hard ceiling on any single backing allocation, guarding against corrupt
/// or malicious size fields read out of a container.
pub const MAX_ALLOC_CEILING: usize = 1_000_000_000;

/// Practical ceiling on a packet's logical length.
pub const MAX_PACKET_LEN: usize = i32::MAX as usize;

/// Externally-owned buffer descriptor accepted by the primary entry point.
///
/// `data` may be absent while `size` is non-zero, meaning: allocate fresh
/// zero-filled storage of that size instead of copying.
#[derive(Clone, Copy, Debug)]
pub struct ExternalBuffer<'a> {
    data: Option<&'a [u8]>,
    size: usize,
}

impl<'a> ExternalBuffer<'a> {
    /// Descriptor over an external byte span. The span is copied during
    /// allocation; its lifetime is never trusted past the call.
    pub fn bytes(data: &'a [u8]) -> Self {
        Self {
            data: Some(data),
            size: data.len(),
        }
    }

    /// Descriptor with no data: requests fresh zero-filled storage.
    pub fn zeroed(size: usize) -> Self {
        Self { data: None, size }
    }

    /// Requested size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Storage behind a packet's byte view.
///
/// The two cases are handled exhaustively everywhere: packets built by the
/// allocator own guard-padded storage, while packets wrapped around foreign
/// shared bytes carry no guard region.
#[derive(Debug)]
enum Backing {
    /// Allocator-owned storage with the zero-filled guard region.
    Padded(PaddedBuffer),
    /// Foreign shared bytes adopted from outside the allocator.
    View(Bytes),
}

/// One unit of still-encoded media data with timing/position metadata.
///
/// Single-ownership value: there is no `Clone`; duplication is always the
/// explicit [`PacketAllocator::duplicate`] operation, which copies the
/// backing storage. Dropping a packet releases its backing reference
/// exactly once.
#[derive(Debug)]
pub struct Packet {
    backing: Backing,

    /// Presentation timestamp. `None` means no value.
    pub pts: Option<i64>,

    /// Decode timestamp. `None` means no value.
    pub dts: Option<i64>,

    /// Packet duration. `-1` means unknown.
    pub duration: i64,

    /// Byte offset into the source stream. `-1` means unknown.
    pub pos: i64,

    /// Elementary stream index. `-1` means unset.
    pub stream: i32,

    stats: Option<Arc<AllocStats>>,
}

impl Packet {
    fn fresh(backing: Backing, stats: Option<Arc<AllocStats>>) -> Self {
        Self {
            backing,
            pts: None,
            dts: None,
            duration: -1,
            pos: -1,
            stream: -1,
            stats,
        }
    }

    /// Wraps foreign shared bytes in a packet without copying.
    ///
    /// The result has no guard region, so decoders must not over-read it.
    /// Duplicating such a packet through the allocator yields a regular
    /// guard-padded copy.
    pub fn from_shared(data: Bytes) -> Self {
        Self::fresh(Backing::View(data), None)
    }

    /// Logical length in bytes. Zero-length packets are valid.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.backing {
            Backing::Padded(buffer) => buffer.len(),
            Backing::View(view) => view.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The logical bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        match &self.backing {
            Backing::Padded(buffer) => buffer.as_slice(),
            Backing::View(view) => view.as_ref(),
        }
    }

    /// Mutable access to the logical bytes. `None` for packets wrapped
    /// around foreign shared bytes, which may alias other owners.
    #[inline]
    pub fn data_mut(&mut self) -> Option<&mut [u8]> {
        match &mut self.backing {
            Backing::Padded(buffer) => Some(buffer.as_mut_slice()),
            Backing::View(_) => None,
        }
    }

    /// The logical bytes plus the zero-filled guard region, for bulk
    /// readers that over-read past the logical end. `None` for packets
    /// without a guard region.
    #[inline]
    pub fn padded_data(&self) -> Option<&[u8]> {
        match &self.backing {
            Backing::Padded(buffer) => Some(buffer.padded_slice()),
            Backing::View(_) => None,
        }
    }

    /// Whether this packet owns guard-padded storage from the allocator.
    #[inline]
    pub fn has_padded_backing(&self) -> bool {
        matches!(self.backing, Backing::Padded(_))
    }

    /// Reduces the logical length to `new_len`.
    ///
    /// On padded backings the guard region following the new end is
    /// re-zeroed, so bulk readers keep seeing zeros instead of stale tail
    /// data. There is no inverse operation: a shortened packet cannot
    /// regain its tail without being recreated.
    ///
    /// # Panics
    ///
    /// Panics if `new_len > len()`; that is a caller defect, not a
    /// recoverable condition.
    pub fn shorten(&mut self, new_len: usize) {
        assert!(
            new_len <= self.len(),
            "Shorten to {} bytes exceeds packet length {}",
            new_len,
            self.len()
        );
        match &mut self.backing {
            Backing::Padded(buffer) => buffer.truncate(new_len),
            Backing::View(view) => view.truncate(new_len),
        }
    }
}

impl Drop for Packet {
    fn drop(&mut self) {
        // Backing storage is released by its own Drop; only the accounting
        // happens here.
        if let Some(stats) = &self.stats {
            stats.record_release();
        }
    }
}

/// Constructs, duplicates, and releases packets over a buffer provider.
///
/// Metadata fields (`pts`, `dts`, `pos`, `stream`, ...) are left at their
/// defaults by every entry point; attaching real values is the demuxer's
/// job after construction.
pub struct PacketAllocator {
    provider: Arc<dyn BufferProvider>,
    stats: Arc<AllocStats>,
    max_packet_len: usize,
    collect_stats: bool,
    metrics: Option<MetricsRecorder>,
}

impl PacketAllocator {
    /// Allocator over the global heap with default limits.
    pub fn new() -> Self {
        Self::with_provider(Arc::new(HeapProvider))
    }

    /// Allocator over a caller-supplied buffer provider.
    pub fn with_provider(provider: Arc<dyn BufferProvider>) -> Self {
        Self {
            provider,
            stats: Arc::new(AllocStats::new()),
            max_packet_len: MAX_PACKET_LEN,
            collect_stats: true,
            metrics: None,
        }
    }

    /// Allocator configured from a validated [`AllocatorConfig`].
    pub fn from_config(config: &AllocatorConfig) -> Self {
        let mut allocator = Self::new();
        allocator.max_packet_len = config.max_packet_len;
        allocator.collect_stats = config.collect_stats;
        allocator
    }

    /// Attaches a Prometheus recorder; allocation outcomes are counted on it.
    pub fn with_metrics(mut self, metrics: MetricsRecorder) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// The allocator's statistics block.
    pub fn stats(&self) -> &AllocStats {
        &self.stats
    }

    /// Creates a packet from an externally-owned buffer descriptor.
    ///
    /// With data present, the external bytes are copied into fresh padded
    /// storage; with data absent, zero-filled storage of the requested size
    /// is allocated. On failure nothing leaks and no partial packet
    /// escapes.
    pub fn packet_from_external(
        &self,
        external: ExternalBuffer<'_>,
    ) -> Result<Packet, PacketError> {
        let size = external.size();
        if size > MAX_ALLOC_CEILING {
            warn!(size, "Rejected packet above the allocation ceiling");
            return Err(PacketError::TooLarge(size));
        }

        let buffer = match external.data {
            Some(data) => self.provider.acquire_copy(data),
            None => self.provider.acquire_zeroed(size),
        };
        let Some(buffer) = buffer else {
            if self.collect_stats {
                self.stats.record_failure();
            }
            if let Some(metrics) = &self.metrics {
                metrics.inc_alloc_failures();
            }
            warn!(size, "Backing buffer allocation failed");
            return Err(PacketError::AllocationFailed);
        };

        if self.collect_stats {
            if external.data.is_some() {
                self.stats.record_bytes_copied(size);
            }
            self.stats.record_allocation();
        }
        if let Some(metrics) = &self.metrics {
            metrics.inc_packets();
            metrics.observe_packet_bytes(size as f64);
        }
        trace!(len = size, "Allocated packet");

        let stats = self.collect_stats.then(|| Arc::clone(&self.stats));
        Ok(Packet::fresh(Backing::Padded(buffer), stats))
    }

    /// Creates a packet holding a copy of `data`.
    pub fn packet_from_bytes(&self, data: &[u8]) -> Result<Packet, PacketError> {
        if data.len() > self.max_packet_len {
            warn!(len = data.len(), "Rejected packet above the length ceiling");
            return Err(PacketError::TooLarge(data.len()));
        }
        self.packet_from_external(ExternalBuffer::bytes(data))
    }

    /// Creates a packet of `len` zero bytes.
    pub fn packet_zeroed(&self, len: usize) -> Result<Packet, PacketError> {
        if len > self.max_packet_len {
            warn!(len, "Rejected packet above the length ceiling");
            return Err(PacketError::TooLarge(len));
        }
        self.packet_from_external(ExternalBuffer::zeroed(len))
    }

    /// Creates an independent copy of `packet` with its own backing
    /// storage; the refcount of the source backing is never shared.
    ///
    /// `pts`, `dts`, and `duration` carry over; `pos` and `stream` reset to
    /// their defaults, since a duplicate has no source-position identity.
    /// On failure the source packet is untouched.
    pub fn duplicate(&self, packet: &Packet) -> Result<Packet, PacketError> {
        let mut copy = match &packet.backing {
            Backing::Padded(buffer) => {
                self.packet_from_external(ExternalBuffer::bytes(buffer.as_slice()))?
            }
            // Packets wrapped around foreign bytes go through the raw-span
            // path and come back guard-padded.
            Backing::View(view) => self.packet_from_bytes(view)?,
        };
        copy.pts = packet.pts;
        copy.dts = packet.dts;
        copy.duration = packet.duration;
        Ok(copy)
    }

    /// Consumes and releases a packet.
    ///
    /// Equivalent to dropping it; provided for callsites that pair every
    /// creation with an explicit release.
    pub fn release(&self, packet: Packet) {
        trace!(len = packet.len(), "Released packet");
        drop(packet);
    }
}

impl Default for PacketAllocator {
    fn default() -> Self {
        Self::new()
    }
}
