//! Streaming hasher over the engine.

use traits::Checksum;

use crate::engine::{self, SEED};

/// POSIX `cksum` checksum as a streaming hasher.
///
/// Tracks the running register and the byte count that [`finalize`]
/// needs, so callers do not have to carry the length themselves.
///
/// # Properties
///
/// - **Polynomial**: 0x04C11DB7 (normal, MSB-first)
/// - **Initial value**: 0x00000000
/// - **Length**: appended low byte first, until the remaining length is zero
/// - **Final XOR**: 0xFFFFFFFF
///
/// # Example
///
/// ```rust
/// use fast_cksum::{Checksum, Cksum};
///
/// let mut hasher = Cksum::new();
/// hasher.update(b"hello");
/// hasher.update(b"\n");
/// assert_eq!(hasher.finalize(), 3_015_617_425);
/// assert_eq!(hasher.len(), 6);
/// ```
///
/// [`finalize`]: Checksum::finalize
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cksum {
  register: u32,
  len: u64,
}

impl Default for Cksum {
  #[inline]
  fn default() -> Self {
    Self { register: SEED, len: 0 }
  }
}

impl Cksum {
  /// Resume from a running register and the bytes already processed.
  #[inline]
  #[must_use]
  pub const fn resume(register: u32, len: u64) -> Self {
    Self { register, len }
  }

  /// Running (unfinalized) register.
  #[inline]
  #[must_use]
  pub const fn register(&self) -> u32 {
    self.register
  }

  /// Bytes processed so far.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> u64 {
    self.len
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Get the name of the currently selected backend.
  #[must_use]
  pub fn backend_name() -> &'static str {
    engine::backend_name()
  }

  /// Ledger entry for everything processed so far under `name`.
  #[cfg(feature = "std")]
  #[must_use]
  pub fn record(&self, name: impl Into<std::string::String>) -> crate::ledger::LedgerEntry {
    crate::ledger::LedgerEntry::new(self.finalize(), self.len, name)
  }
}

impl Checksum for Cksum {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.register = engine::partial(data, self.register);
    self.len += data.len() as u64;
  }

  #[inline]
  fn finalize(&self) -> u32 {
    engine::finalize(self.len, self.register)
  }

  #[inline]
  fn reset(&mut self) {
    *self = Self::default();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fresh_hasher_is_seed() {
    let h = Cksum::new();
    assert_eq!(h.register(), SEED);
    assert!(h.is_empty());
    assert_eq!(h.finalize(), 4_294_967_295);
  }

  #[test]
  fn finalize_does_not_consume() {
    let mut h = Cksum::new();
    h.update(b"1234");
    assert_eq!(h.finalize(), h.finalize());
    h.update(b"56789");
    assert_eq!(h.finalize(), 930_766_865);
    assert_eq!(h.len(), 9);
  }

  #[test]
  fn resume_continues_stream() {
    let mut a = Cksum::new();
    a.update(b"AB");
    let mut b = Cksum::resume(a.register(), a.len());
    b.update(b"CD");
    assert_eq!(b.finalize(), 3_189_099_728);
  }

  #[test]
  fn reset_restores_initial_state() {
    let mut h = Cksum::new();
    h.update(b"data");
    h.reset();
    assert_eq!(h, Cksum::new());
  }

  #[test]
  fn vectored_matches_contiguous() {
    let parts: [&[u8]; 3] = [b"The quick brown fox ", b"", b"jumps over the lazy dog"];
    let mut h = Cksum::new();
    h.update_vectored(&parts);
    assert_eq!(h.finalize(), 2_074_844_392);

    let halves: [&[u8]; 2] = [b"hel", b"lo\n"];
    assert_eq!(Cksum::checksum_vectored(&halves), Cksum::checksum(b"hello\n"));
  }
}
