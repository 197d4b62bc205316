//! ## packhund-core::alloc
//! **Packet lifecycle management over guard-padded buffers**
//!
//! ### Expectations (Production):
//! - No allocation beyond the per-packet size ceilings
//! - Exactly-once release of every backing buffer
//! - Guard region kept zero-filled across every length reduction
//!
//! ### Key Submodules:
//! - `buffer/`: Guard-padded buffers and the provider seam
//! - `packet/`: The packet entity and its allocator
//! - `stats/`: Allocation tracking with atomic counters

pub mod buffer;
pub mod packet;
pub mod stats;

pub use buffer::{BufferProvider, HeapProvider, PaddedBuffer, PACKET_PADDING};
pub use packet::{
    ExternalBuffer, Packet, PacketAllocator, MAX_ALLOC_CEILING, MAX_PACKET_LEN,
};
pub use stats::AllocStats;
