//! I/O adapters that checksum data as it flows through.
//!
//! [`ChecksumReader`] and [`ChecksumWriter`] wrap [`std::io::Read`] and
//! [`std::io::Write`] implementations. Only bytes actually transferred are
//! hashed, so short reads and short writes keep the checksum exact.
//!
//! # Example
//!
//! ```rust
//! # use traits::Checksum;
//! # #[derive(Clone, Default)]
//! # struct Sum(u32);
//! # impl Checksum for Sum {
//! #   const OUTPUT_SIZE: usize = 4;
//! #   type Output = u32;
//! #   fn new() -> Self { Self(0) }
//! #   fn update(&mut self, data: &[u8]) {
//! #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(u32::from(b)));
//! #   }
//! #   fn finalize(&self) -> Self::Output { self.0 }
//! #   fn reset(&mut self) { self.0 = 0; }
//! # }
//! # use std::io::Cursor;
//! let mut reader = Sum::reader(Cursor::new(b"abc".to_vec()));
//! std::io::copy(&mut reader, &mut std::io::sink())?;
//! assert_eq!(
//!   reader.crc(),
//!   u32::from(b'a') + u32::from(b'b') + u32::from(b'c')
//! );
//! # Ok::<(), std::io::Error>(())
//! ```

#![cfg(feature = "std")]

use std::io::{IoSlice, IoSliceMut, Read, Result, Write};

use crate::Checksum;

/// Feed the first `n` bytes spread across `bufs` to `on_data`.
#[inline]
fn hash_prefix<'a>(bufs: impl IntoIterator<Item = &'a [u8]>, n: usize, mut on_data: impl FnMut(&[u8])) {
  let mut remaining = n;
  for buf in bufs {
    if remaining == 0 {
      break;
    }
    let to_hash = remaining.min(buf.len());
    if to_hash == 0 {
      continue;
    }
    if let Some(data) = buf.get(..to_hash) {
      on_data(data);
    }
    remaining -= to_hash;
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reader
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps a [`Read`] and computes a checksum over the bytes read.
///
/// # Type Parameters
///
/// - `R`: The inner reader type
/// - `C`: The checksum algorithm type
#[derive(Clone, Debug)]
pub struct ChecksumReader<R, C: Checksum> {
  inner: R,
  hasher: C,
}

impl<R, C: Checksum> ChecksumReader<R, C> {
  /// Wrap `inner` with a fresh hasher.
  #[inline]
  #[must_use]
  pub fn new(inner: R) -> Self {
    Self {
      inner,
      hasher: C::new(),
    }
  }

  /// Wrap `inner`, continuing from an existing hasher state.
  #[inline]
  #[must_use]
  pub fn with_hasher(inner: R, hasher: C) -> Self {
    Self { inner, hasher }
  }

  /// Checksum of everything read so far.
  #[inline]
  #[must_use]
  pub fn crc(&self) -> C::Output {
    self.hasher.finalize()
  }

  #[inline]
  pub fn hasher(&self) -> &C {
    &self.hasher
  }

  #[inline]
  pub fn hasher_mut(&mut self) -> &mut C {
    &mut self.hasher
  }

  /// Consume the adapter, returning the inner reader and the checksum.
  #[inline]
  pub fn into_parts(self) -> (R, C::Output) {
    let crc = self.hasher.finalize();
    (self.inner, crc)
  }

  #[inline]
  pub fn into_inner(self) -> R {
    self.inner
  }

  #[inline]
  pub fn inner(&self) -> &R {
    &self.inner
  }

  #[inline]
  pub fn inner_mut(&mut self) -> &mut R {
    &mut self.inner
  }
}

impl<R: Read, C: Checksum> Read for ChecksumReader<R, C> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
    let n = self.inner.read(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data);
    }
    Ok(n)
  }

  #[inline]
  fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> Result<usize> {
    let n = self.inner.read_vectored(bufs)?;
    let hasher = &mut self.hasher;
    hash_prefix(bufs.iter().map(|b| &**b), n, |data| hasher.update(data));
    Ok(n)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Writer
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps a [`Write`] and computes a checksum over the bytes written.
#[derive(Clone, Debug)]
pub struct ChecksumWriter<W, C: Checksum> {
  inner: W,
  hasher: C,
}

impl<W, C: Checksum> ChecksumWriter<W, C> {
  /// Wrap `inner` with a fresh hasher.
  #[inline]
  #[must_use]
  pub fn new(inner: W) -> Self {
    Self {
      inner,
      hasher: C::new(),
    }
  }

  /// Wrap `inner`, continuing from an existing hasher state.
  #[inline]
  #[must_use]
  pub fn with_hasher(inner: W, hasher: C) -> Self {
    Self { inner, hasher }
  }

  /// Checksum of everything written so far.
  #[inline]
  #[must_use]
  pub fn crc(&self) -> C::Output {
    self.hasher.finalize()
  }

  #[inline]
  pub fn hasher(&self) -> &C {
    &self.hasher
  }

  #[inline]
  pub fn hasher_mut(&mut self) -> &mut C {
    &mut self.hasher
  }

  /// Consume the adapter, returning the inner writer and the checksum.
  #[inline]
  pub fn into_parts(self) -> (W, C::Output) {
    let crc = self.hasher.finalize();
    (self.inner, crc)
  }

  #[inline]
  pub fn into_inner(self) -> W {
    self.inner
  }

  #[inline]
  pub fn inner(&self) -> &W {
    &self.inner
  }

  #[inline]
  pub fn inner_mut(&mut self) -> &mut W {
    &mut self.inner
  }
}

impl<W: Write, C: Checksum> Write for ChecksumWriter<W, C> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> Result<usize> {
    let n = self.inner.write(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data);
    }
    Ok(n)
  }

  #[inline]
  fn flush(&mut self) -> Result<()> {
    self.inner.flush()
  }

  #[inline]
  fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> Result<usize> {
    let n = self.inner.write_vectored(bufs)?;
    let hasher = &mut self.hasher;
    hash_prefix(bufs.iter().map(|b| &**b), n, |data| hasher.update(data));
    Ok(n)
  }
}

#[cfg(test)]
mod tests {
  use std::{
    io::{Cursor, Read, Write},
    vec::Vec,
  };

  use super::*;

  /// Order-sensitive toy checksum so that dropped or reordered bytes show up.
  #[derive(Clone, Default)]
  struct Poly(u32);

  impl Checksum for Poly {
    const OUTPUT_SIZE: usize = 4;
    type Output = u32;

    fn new() -> Self {
      Self(7)
    }
    fn update(&mut self, data: &[u8]) {
      for &b in data {
        self.0 = self.0.wrapping_mul(31).wrapping_add(u32::from(b));
      }
    }
    fn finalize(&self) -> u32 {
      self.0
    }
    fn reset(&mut self) {
      self.0 = 7;
    }
  }

  /// Writer that accepts at most `limit` bytes per call.
  struct Trickle {
    out: Vec<u8>,
    limit: usize,
  }

  impl Write for Trickle {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
      let n = buf.len().min(self.limit);
      self.out.extend_from_slice(&buf[..n]);
      Ok(n)
    }
    fn flush(&mut self) -> Result<()> {
      Ok(())
    }
  }

  #[test]
  fn reader_hashes_everything_read() {
    let data = b"the quick brown fox".to_vec();
    let mut reader = Poly::reader(Cursor::new(data.clone()));
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
    assert_eq!(reader.crc(), Poly::checksum(&data));
  }

  #[test]
  fn reader_small_buffer_reads() {
    let data: Vec<u8> = (0..=255u8).collect();
    let mut reader = Poly::reader(Cursor::new(data.clone()));
    let mut buf = [0u8; 7];
    loop {
      let n = reader.read(&mut buf).unwrap();
      if n == 0 {
        break;
      }
    }
    assert_eq!(reader.crc(), Poly::checksum(&data));
  }

  #[test]
  fn writer_short_writes_hash_only_accepted_bytes() {
    let data = b"0123456789abcdef0123456789abcdef";
    let mut writer = Poly::writer(Trickle { out: Vec::new(), limit: 5 });
    writer.write_all(data).unwrap();
    let (inner, crc) = writer.into_parts();
    assert_eq!(inner.out, data);
    assert_eq!(crc, Poly::checksum(data));
  }

  #[test]
  fn writer_vectored_matches_contiguous() {
    let a = b"hello ";
    let b = b"world";
    let mut writer = Poly::writer(Vec::new());
    let n = writer.write_vectored(&[IoSlice::new(a), IoSlice::new(b)]).unwrap();
    assert_eq!(n, a.len() + b.len());
    assert_eq!(writer.crc(), Poly::checksum(b"hello world"));
  }

  #[test]
  fn writer_vectored_skips_empty_slices() {
    let mut writer = Poly::writer(Vec::new());
    let bufs = [IoSlice::new(b""), IoSlice::new(b"hel"), IoSlice::new(b""), IoSlice::new(b"lo")];
    let n = writer.write_vectored(&bufs).unwrap();
    assert_eq!(n, 5);
    assert_eq!(writer.crc(), Poly::checksum(b"hello"));
  }

  #[test]
  fn reader_vectored_skips_empty_slices() {
    let mut reader = Poly::reader(Cursor::new(b"hello".to_vec()));
    let mut empty: [u8; 0] = [];
    let mut head = [0u8; 2];
    let mut gap: [u8; 0] = [];
    let mut tail = [0u8; 8];
    let mut bufs = [
      IoSliceMut::new(&mut empty),
      IoSliceMut::new(&mut head),
      IoSliceMut::new(&mut gap),
      IoSliceMut::new(&mut tail),
    ];
    let n = reader.read_vectored(&mut bufs).unwrap();
    assert_eq!(n, 5);
    assert_eq!(reader.crc(), Poly::checksum(b"hello"));
  }

  #[test]
  fn with_hasher_continues_state() {
    let mut h = Poly::new();
    h.update(b"prefix-");
    let mut writer = ChecksumWriter::with_hasher(Vec::new(), h);
    writer.write_all(b"suffix").unwrap();
    assert_eq!(writer.crc(), Poly::checksum(b"prefix-suffix"));
  }
}
