//! Chunked digesting of images through a small bounded buffer.

use crate::image::Image;
use imgsum_schema::Algorithm;
use std::num::NonZeroUsize;

/// Default size of the local copy buffer.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = NonZeroUsize::new(128).unwrap();

/// Feeds an image to a digest one buffer-full at a time.
///
/// Memory use is bounded by the buffer capacity regardless of image length.
/// The capacity never changes the result, only the number of updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkedReader {
    capacity: NonZeroUsize,
}

impl Default for ChunkedReader {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ChunkedReader {
    /// Create a reader with the given buffer capacity.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }

    /// Buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of updates needed to digest `len` bytes.
    pub fn chunks_for(&self, len: u64) -> u64 {
        len.div_ceil(self.capacity.get() as u64)
    }

    /// Digest the whole of `image` with a fresh state.
    pub fn digest(&self, algorithm: Algorithm, image: &Image) -> Vec<u8> {
        let mut state = algorithm.init();
        let mut buf = vec![0u8; self.capacity.get()];
        let mut offset = 0u64;
        let mut remaining = image.len();

        tracing::trace!(
            image = image.name(),
            len = remaining,
            chunks = self.chunks_for(remaining),
            "digesting"
        );

        while remaining > 0 {
            let n = remaining.min(buf.len() as u64) as usize;
            image.read_at(offset, &mut buf[..n]);
            state.update(&buf[..n]);
            offset += n as u64;
            remaining -= n as u64;
        }

        state.finalize()
    }
}
