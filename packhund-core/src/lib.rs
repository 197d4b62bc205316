//! # packhund-core
//!
//! Foundation layer for demuxed media packet lifecycle management.
//! Built with safety, performance, and maintainability as primary design constraints.
//!
//! Packets carry still-encoded media data from a demuxer to a decoder. Each
//! one wraps a reference-counted backing buffer with a zero-filled guard
//! region past its logical end, so downstream bulk readers can over-read
//! without per-byte bounds checks.
//!
//! ### Expectations (Production):
//! - Exactly-once release of every backing buffer, enforced by ownership
//! - Bounded allocation: hard 1 GB ceiling per backing buffer
//! - No internal locking; packets are single-ownership values
//!
//! ### Key Submodules:
//! - `alloc`: Packet entity, allocator, guard-padded buffers, statistics
//! - `config`: Allocator tuning with YAML loading and validation
//! - `error`: Allocation error taxonomy

pub mod alloc;
pub mod config;
pub mod error;

pub mod prelude {
    pub use crate::alloc::*;
    pub use crate::config::*;
    pub use crate::error::*;
}

pub use error::PacketError;
