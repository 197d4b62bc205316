//! ## packhund-core::alloc::buffer
//! **Guard-padded byte buffers on top of `bytes`**
//!
//! This module implements the backing storage for demuxed packets: a
//! reference-counted allocation (via `bytes::BytesMut`) that always carries
//! a fixed trailing guard region of zero bytes past the logical end, so
//! downstream bulk readers can over-read without bounds-checking every byte.

use bytes::BytesMut;

/// Trailing guard region, in bytes, appended to every allocation.
///
/// Kept zero-filled at all times, including after every length reduction.
/// Bulk readers may read up to this many bytes past the logical end.
pub const PACKET_PADDING: usize = 64;

/// A uniquely-owned, guard-padded byte buffer.
///
/// The physical allocation is always `len + PACKET_PADDING` bytes; the
/// trailing `PACKET_PADDING` bytes are zero. `BytesMut` guarantees unique
/// write access while keeping the underlying allocation reference counted,
/// so dropping the buffer releases the backing memory exactly once.
#[derive(Debug)]
pub struct PaddedBuffer {
    buf: BytesMut,
    len: usize,
}

impl PaddedBuffer {
    /// Allocates padded storage and copies `data` into it.
    pub fn copy_of(data: &[u8]) -> Self {
        let mut buf = BytesMut::with_capacity(data.len() + PACKET_PADDING);
        buf.extend_from_slice(data);
        buf.resize(data.len() + PACKET_PADDING, 0);
        Self {
            buf,
            len: data.len(),
        }
    }

    /// Allocates zero-filled padded storage of `len` logical bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            buf: BytesMut::zeroed(len + PACKET_PADDING),
            len,
        }
    }

    /// Logical length in bytes, excluding the guard region.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical size of the allocation, guard region included.
    #[inline]
    pub fn padded_capacity(&self) -> usize {
        self.buf.len()
    }

    /// The logical bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Mutable access to the logical bytes. The guard region stays private
    /// so its zero-fill invariant cannot be broken from outside.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }

    /// The logical bytes plus the guard region, for bulk readers that
    /// over-read past the logical end.
    #[inline]
    pub fn padded_slice(&self) -> &[u8] {
        &self.buf[..self.len + PACKET_PADDING]
    }

    /// Reduces the logical length to `new_len` and re-zeroes the guard
    /// region now starting at the new end, so stale tail bytes never leak
    /// into the over-read window.
    ///
    /// # Panics
    ///
    /// Panics if `new_len > len()`. Growing is not supported; a silent
    /// clamp here would hide corruption bugs upstream.
    pub fn truncate(&mut self, new_len: usize) {
        assert!(
            new_len <= self.len,
            "Truncation to {} bytes exceeds buffer length {}",
            new_len,
            self.len
        );
        self.len = new_len;
        self.buf[new_len..new_len + PACKET_PADDING].fill(0);
    }
}

/// Acquire-side boundary to the reference-counted buffer collaborator.
///
/// `None` signals allocation failure, mirroring the null-handle convention
/// of the underlying primitive. Release is not part of the trait: dropping
/// a [`PaddedBuffer`] releases its reference.
pub trait BufferProvider: Send + Sync {
    /// Allocates padded storage holding a copy of `data`.
    fn acquire_copy(&self, data: &[u8]) -> Option<PaddedBuffer>;

    /// Allocates padded zero-filled storage of `len` logical bytes.
    fn acquire_zeroed(&self, len: usize) -> Option<PaddedBuffer>;
}

/// Production provider backed by the global heap.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapProvider;

impl BufferProvider for HeapProvider {
    fn acquire_copy(&self, data: &[u8]) -> Option<PaddedBuffer> {
        Some(PaddedBuffer::copy_of(data))
    }

    fn acquire_zeroed(&self, len: usize) -> Option<PaddedBuffer> {
        Some(PaddedBuffer::zeroed(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_of_preserves_data_and_zeroes_guard() {
        let buffer = PaddedBuffer::copy_of(b"media payload");
        assert_eq!(buffer.as_slice(), b"media payload");
        assert_eq!(buffer.padded_capacity(), 13 + PACKET_PADDING);
        assert!(buffer.padded_slice()[13..].iter().all(|&b| b == 0));
    }

    #[test]
    fn zeroed_is_all_zero_including_guard() {
        let buffer = PaddedBuffer::zeroed(256);
        assert_eq!(buffer.len(), 256);
        assert!(buffer.padded_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_length_buffer_still_has_guard() {
        let buffer = PaddedBuffer::zeroed(0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.padded_capacity(), PACKET_PADDING);
        assert!(buffer.padded_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn truncate_rezeroes_exposed_tail() {
        let mut buffer = PaddedBuffer::copy_of(&[0xff; 32]);
        buffer.truncate(8);
        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.as_slice(), &[0xff; 8]);
        assert!(buffer.padded_slice()[8..].iter().all(|&b| b == 0));
    }

    #[test]
    #[should_panic]
    fn truncate_beyond_length_panics() {
        let mut buffer = PaddedBuffer::zeroed(4);
        buffer.truncate(5);
    }
}
