//! The cksum engine: kernel variants, the streaming contract and finalize.
//!
//! # Register convention
//!
//! Callers thread a *public* register through successive calls. It starts at
//! [`SEED`] and is the bitwise complement of the internal division register,
//! so every kernel complements on entry and on exit. [`finalize`] undoes the
//! complement, appends the total length and complements the result.

use backend::dispatch::Selected;

use crate::{
  common::{
    kernels, portable, reference,
    tables::{TABLES_16, TABLES_32},
  },
  config,
  dispatchers::{CksumDispatcher, CksumFn},
};

/// Starting register for a fresh stream.
pub const SEED: u32 = 0xFFFF_FFFF;

/// Prefetch look-ahead in bytes when none is given.
pub const DEFAULT_PREFETCH_DISTANCE: usize = 256;

/// Per-call options for an explicit kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
  /// Register to continue from ([`SEED`] for a fresh stream).
  pub seed: u32,
  /// Bytes ahead of the current block to prefetch. Ignored by kernels
  /// without prefetch.
  pub prefetch_distance: usize,
}

impl Default for Options {
  fn default() -> Self {
    Self::new()
  }
}

impl Options {
  /// Fresh stream, default prefetch distance.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self {
      seed: SEED,
      prefetch_distance: DEFAULT_PREFETCH_DISTANCE,
    }
  }

  /// Continue from `seed` instead of [`SEED`].
  #[inline]
  #[must_use]
  pub const fn with_seed(mut self, seed: u32) -> Self {
    self.seed = seed;
    self
  }

  /// Prefetch `distance` bytes ahead in the prefetching kernels.
  #[inline]
  #[must_use]
  pub const fn with_prefetch_distance(mut self, distance: usize) -> Self {
    self.prefetch_distance = distance;
    self
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kernel
// ─────────────────────────────────────────────────────────────────────────────

/// Every kernel the engine provides.
///
/// All kernels produce identical registers for identical input; they differ
/// only in speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kernel {
  /// Bit-at-a-time, no tables. Test oracle and benchmark baseline.
  Reference,
  /// One table lookup per byte.
  Bytewise,
  /// 16 bytes per iteration.
  Slice16,
  /// Slice-by-16 with software prefetch.
  Slice16Prefetch,
  /// 32 bytes per iteration.
  Slice32,
  /// Slice-by-32 with software prefetch.
  Slice32Prefetch,
}

impl Kernel {
  /// Every kernel, the bitwise reference first.
  pub const ALL: [Self; 6] = [
    Self::Reference,
    Self::Bytewise,
    Self::Slice16,
    Self::Slice16Prefetch,
    Self::Slice32,
    Self::Slice32Prefetch,
  ];

  /// Canonical kernel name (e.g. "portable/slice16").
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Reference => kernels::REFERENCE,
      Self::Bytewise => kernels::PORTABLE_BYTEWISE,
      Self::Slice16 => kernels::PORTABLE_SLICE16,
      Self::Slice16Prefetch => kernels::PORTABLE_SLICE16_PREFETCH,
      Self::Slice32 => kernels::PORTABLE_SLICE32,
      Self::Slice32Prefetch => kernels::PORTABLE_SLICE32_PREFETCH,
    }
  }

  /// Bytes consumed per main-loop iteration.
  #[must_use]
  pub const fn block_size(self) -> usize {
    match self {
      Self::Reference | Self::Bytewise => 1,
      Self::Slice16 | Self::Slice16Prefetch => 16,
      Self::Slice32 | Self::Slice32Prefetch => 32,
    }
  }

  /// Whether the kernel issues software prefetch hints.
  #[must_use]
  pub const fn uses_prefetch(self) -> bool {
    matches!(self, Self::Slice16Prefetch | Self::Slice32Prefetch)
  }

  /// Process `data` starting from `opts.seed` and return the new register.
  #[must_use]
  pub fn partial(self, data: &[u8], opts: Options) -> u32 {
    let Options {
      seed,
      prefetch_distance,
    } = opts;
    match self {
      Self::Reference => reference::cksum_reference(seed, data),
      Self::Bytewise => bytewise_partial(data, seed),
      Self::Slice16 => slice16_partial(data, seed),
      Self::Slice16Prefetch => slice16_prefetch_partial(data, seed, prefetch_distance),
      Self::Slice32 => slice32_partial(data, seed),
      Self::Slice32Prefetch => slice32_prefetch_partial(data, seed, prefetch_distance),
    }
  }

  /// [`partial`](Self::partial) followed by [`finalize`] with `data.len()`.
  ///
  /// Only meaningful when `opts.seed` is [`SEED`]; otherwise the length
  /// folded in is not the length of the whole stream.
  #[must_use]
  pub fn full(self, data: &[u8], opts: Options) -> u32 {
    finalize(data.len() as u64, self.partial(data, opts))
  }

  const fn dispatch_fn(self) -> CksumFn {
    match self {
      Self::Reference => reference::cksum_reference,
      Self::Bytewise => dispatch_bytewise,
      Self::Slice16 => dispatch_slice16,
      Self::Slice16Prefetch => dispatch_slice16_prefetch,
      Self::Slice32 => dispatch_slice32,
      Self::Slice32Prefetch => dispatch_slice32_prefetch,
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Explicit variants
// ─────────────────────────────────────────────────────────────────────────────

/// cksum of `data` using the bytewise kernel.
#[must_use]
pub fn bytewise(data: &[u8]) -> u32 {
  finalize(data.len() as u64, bytewise_partial(data, SEED))
}

/// Continue a stream with the bytewise kernel.
#[inline]
#[must_use]
pub fn bytewise_partial(data: &[u8], previous: u32) -> u32 {
  !portable::bytewise(!previous, data, &TABLES_16[0])
}

/// cksum of `data` using slice-by-16.
#[must_use]
pub fn slice16(data: &[u8]) -> u32 {
  finalize(data.len() as u64, slice16_partial(data, SEED))
}

/// Continue a stream with slice-by-16.
#[inline]
#[must_use]
pub fn slice16_partial(data: &[u8], previous: u32) -> u32 {
  !portable::slice16(!previous, data, &TABLES_16)
}

/// cksum of `data` using slice-by-16 with the default prefetch distance.
#[must_use]
pub fn slice16_prefetch(data: &[u8]) -> u32 {
  finalize(
    data.len() as u64,
    slice16_prefetch_partial(data, SEED, DEFAULT_PREFETCH_DISTANCE),
  )
}

/// Continue a stream with slice-by-16, prefetching `distance` bytes ahead.
#[inline]
#[must_use]
pub fn slice16_prefetch_partial(data: &[u8], previous: u32, distance: usize) -> u32 {
  !portable::slice16_prefetch(!previous, data, &TABLES_16, distance)
}

/// cksum of `data` using slice-by-32.
#[must_use]
pub fn slice32(data: &[u8]) -> u32 {
  finalize(data.len() as u64, slice32_partial(data, SEED))
}

/// Continue a stream with slice-by-32.
#[inline]
#[must_use]
pub fn slice32_partial(data: &[u8], previous: u32) -> u32 {
  !portable::slice32(!previous, data, &TABLES_32)
}

/// cksum of `data` using slice-by-32 with the default prefetch distance.
#[must_use]
pub fn slice32_prefetch(data: &[u8]) -> u32 {
  finalize(
    data.len() as u64,
    slice32_prefetch_partial(data, SEED, DEFAULT_PREFETCH_DISTANCE),
  )
}

/// Continue a stream with slice-by-32, prefetching `distance` bytes ahead.
#[inline]
#[must_use]
pub fn slice32_prefetch_partial(data: &[u8], previous: u32, distance: usize) -> u32 {
  !portable::slice32_prefetch(!previous, data, &TABLES_32, distance)
}

/// Turn a running register into the reported checksum.
///
/// `total_length` must be the number of bytes fed through the whole stream.
/// Call it once per stream: finalizing an already finalized value yields a
/// different number.
#[inline]
#[must_use]
pub fn finalize(total_length: u64, previous: u32) -> u32 {
  !portable::fold_length(!previous, total_length, &TABLES_16[0])
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher Selection
// ─────────────────────────────────────────────────────────────────────────────

fn dispatch_bytewise(previous: u32, data: &[u8]) -> u32 {
  bytewise_partial(data, previous)
}

fn dispatch_slice16(previous: u32, data: &[u8]) -> u32 {
  slice16_partial(data, previous)
}

fn dispatch_slice16_prefetch(previous: u32, data: &[u8]) -> u32 {
  slice16_prefetch_partial(data, previous, config::get().prefetch_distance)
}

fn dispatch_slice32(previous: u32, data: &[u8]) -> u32 {
  slice32_partial(data, previous)
}

fn dispatch_slice32_prefetch(previous: u32, data: &[u8]) -> u32 {
  slice32_prefetch_partial(data, previous, config::get().prefetch_distance)
}

/// Size-tiered selection on every call.
fn dispatch_auto(previous: u32, data: &[u8]) -> u32 {
  let cfg = config::get();
  let opts = Options {
    seed: previous,
    prefetch_distance: cfg.prefetch_distance,
  };
  cfg.kernel_for_len(data.len()).partial(data, opts)
}

fn select_cksum() -> Selected<CksumFn> {
  let cfg = config::get();
  let selected = match cfg.force.kernel() {
    Some(kernel) => Selected::new(kernel.name(), kernel.dispatch_fn()),
    None => Selected::new(kernels::AUTO, dispatch_auto as CksumFn),
  };
  #[cfg(feature = "std")]
  tracing::debug!(
    kernel = selected.name,
    force = cfg.force.as_str(),
    bytewise_to_slice16 = cfg.tunables.bytewise_to_slice16,
    slice16_to_slice32 = cfg.tunables.slice16_to_slice32,
    slice32_to_prefetch = cfg.tunables.slice32_to_prefetch,
    prefetch_distance = cfg.prefetch_distance,
    "selected cksum kernel"
  );
  selected
}

static CKSUM_DISPATCHER: CksumDispatcher = CksumDispatcher::new(select_cksum);

// ─────────────────────────────────────────────────────────────────────────────
// Convenience API
// ─────────────────────────────────────────────────────────────────────────────

/// cksum of `data` in one call.
///
/// ```
/// assert_eq!(fast_cksum::full(b"123456789"), 930_766_865);
/// ```
#[inline]
#[must_use]
pub fn full(data: &[u8]) -> u32 {
  finalize(data.len() as u64, partial(data, SEED))
}

/// Continue a stream with the auto-selected kernel.
///
/// ```
/// use fast_cksum::{SEED, finalize, full, partial};
///
/// let reg = partial(b"AB", SEED);
/// let reg = partial(b"CD", reg);
/// assert_eq!(finalize(4, reg), full(b"ABCD"));
/// ```
#[inline]
#[must_use]
pub fn partial(data: &[u8], previous: u32) -> u32 {
  CKSUM_DISPATCHER.call(previous, data)
}

/// Name of the kernel the dispatcher resolved to ("auto/size-tiered" unless
/// a kernel is forced).
#[must_use]
pub fn backend_name() -> &'static str {
  CKSUM_DISPATCHER.backend_name()
}

/// Name of the kernel [`partial`] runs for a buffer of `len` bytes.
#[must_use]
pub fn kernel_name_for_len(len: usize) -> &'static str {
  let cfg = config::get();
  match cfg.force.kernel() {
    Some(kernel) => kernel.name(),
    None => cfg.kernel_for_len(len).name(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reference_vectors() {
    assert_eq!(full(b""), 4_294_967_295);
    assert_eq!(full(b"a"), 1_220_704_766);
    assert_eq!(full(b"hello\n"), 3_015_617_425);
    assert_eq!(full(b"123456789"), 930_766_865);
    assert_eq!(full(b"ABCD"), 3_189_099_728);
    assert_eq!(partial(b"123456789", SEED), 0x765E_7680);
  }

  #[test]
  fn seed_identity() {
    assert_eq!(finalize(0, SEED), 0xFFFF_FFFF);
    for kernel in Kernel::ALL {
      assert_eq!(kernel.partial(b"", Options::default()), SEED, "{}", kernel.name());
    }
  }

  #[test]
  fn every_kernel_matches_reference_vector() {
    for kernel in Kernel::ALL {
      assert_eq!(kernel.full(b"123456789", Options::default()), 930_766_865, "{}", kernel.name());
    }
  }

  #[test]
  fn named_variants_agree() {
    let data: [u8; 1000] = core::array::from_fn(|i| ((i * 31 + (i >> 8)) & 0xFF) as u8);
    let expected = 962_644_352;
    assert_eq!(full(&data), expected);
    assert_eq!(bytewise(&data), expected);
    assert_eq!(slice16(&data), expected);
    assert_eq!(slice16_prefetch(&data), expected);
    assert_eq!(slice32(&data), expected);
    assert_eq!(slice32_prefetch(&data), expected);
  }

  #[test]
  fn finalize_is_not_idempotent() {
    let once = full(b"123456789");
    assert_eq!(finalize(9, once), 590_060_753);
    assert_ne!(finalize(9, once), once);
  }

  #[test]
  fn finalize_appends_inner_zero_length_bytes() {
    use crate::common::{reference::cksum_length_bitwise, tables::CKSUM_POLY};

    for len in [1u64, 255, 256, 0x1_0000, 0x0100_0001, u64::MAX] {
      for reg in [SEED, 0, 0x1234_5678] {
        assert_eq!(
          finalize(len, reg),
          !cksum_length_bitwise(CKSUM_POLY, !reg, len),
          "len={len:#x} reg={reg:#x}"
        );
      }
    }
    // 256 is fed as 0x00 then 0x01.
    let reg = 0x1234_5678;
    assert_eq!(
      finalize(256, reg),
      !crate::common::reference::cksum_bitwise(CKSUM_POLY, !reg, &[0x00, 0x01])
    );
  }

  #[test]
  fn two_call_stream() {
    let reg = partial(b"AB", SEED);
    let reg = partial(b"CD", reg);
    assert_eq!(finalize(4, reg), full(b"ABCD"));
  }

  #[test]
  fn options_builders() {
    let opts = Options::new().with_seed(7).with_prefetch_distance(64);
    assert_eq!(opts.seed, 7);
    assert_eq!(opts.prefetch_distance, 64);
    assert_eq!(Options::default(), Options::new());
  }

  #[test]
  fn kernel_metadata() {
    assert_eq!(Kernel::Slice16.block_size(), 16);
    assert_eq!(Kernel::Slice32Prefetch.block_size(), 32);
    assert!(Kernel::Slice16Prefetch.uses_prefetch());
    assert!(!Kernel::Bytewise.uses_prefetch());
    assert_eq!(Kernel::Reference.name(), "reference/bitwise");
  }
}
