//! Streaming checksum trait.
//!
//! - **Performance**: zero-cost, inline-friendly
//! - **Streaming**: incremental updates over caller-sized chunks

use core::fmt::Debug;

/// Streaming checksum algorithm.
///
/// # Usage
///
/// ```rust,ignore
/// use fast_cksum::{Checksum, Cksum};
///
/// // One-shot (fastest for data already in memory)
/// let crc = Cksum::checksum(b"hello\n");
///
/// // Streaming (for incremental or large data)
/// let mut hasher = Cksum::new();
/// hasher.update(b"hel");
/// hasher.update(b"lo\n");
/// assert_eq!(hasher.finalize(), crc);
/// ```
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()`
/// - `finalize()` must not mutate the hasher, so calling it repeatedly returns
///   the same value until the next `update()`
/// - `reset()` must restore the hasher to its initial state
pub trait Checksum: Clone + Default {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// The checksum output type.
  type Output: Copy + Eq + Debug + Default;

  /// Create a new hasher in its initial state.
  #[must_use]
  fn new() -> Self;

  /// Update the hasher with additional data.
  ///
  /// This method can be called multiple times to process data incrementally.
  fn update(&mut self, data: &[u8]);

  /// Update the hasher with multiple non-contiguous buffers.
  ///
  /// Semantics are identical to calling [`update`](Self::update) on each buffer
  /// in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Update the hasher with `std::io::IoSlice` buffers.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Return the checksum of everything processed so far.
  ///
  /// This method does not consume the hasher, allowing further updates.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Reset the hasher to its initial state.
  fn reset(&mut self);

  /// Compute the checksum of data in one shot.
  #[inline]
  #[must_use]
  fn checksum(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }

  /// Compute the checksum of multiple buffers in one shot.
  #[inline]
  #[must_use]
  fn checksum_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    h.update_vectored(bufs);
    h.finalize()
  }

  /// Wrap a reader to compute the checksum transparently during I/O.
  ///
  /// ```rust,ignore
  /// use std::fs::File;
  ///
  /// use fast_cksum::{Checksum, Cksum};
  ///
  /// let mut reader = Cksum::reader(File::open("data.bin")?);
  /// std::io::copy(&mut reader, &mut std::io::sink())?;
  /// println!("{} {}", reader.crc(), reader.hasher().len());
  /// ```
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn reader<R>(inner: R) -> crate::io::ChecksumReader<R, Self>
  where
    Self: Sized,
  {
    crate::io::ChecksumReader::new(inner)
  }

  /// Wrap a writer to compute the checksum transparently during I/O.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn writer<W>(inner: W) -> crate::io::ChecksumWriter<W, Self>
  where
    Self: Sized,
  {
    crate::io::ChecksumWriter::new(inner)
  }
}
