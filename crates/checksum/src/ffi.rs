//! C ABI matching `include/fast_cksum.h`.
//!
//! Every function takes a `(data, length)` pair. A null `data` is read as an
//! empty buffer, and the one-shot forms then return the empty checksum
//! whatever `length` says. There are no default arguments: pass
//! `CRC32_FAST_SEED` as `previous` to start a stream and
//! `CRC32_FAST_DEFAULT_PREFETCH` as `prefetch_ahead` for the usual distance.

// SAFETY: The only unsafe operation is turning the caller's pointer and
// length into a slice; the contract is documented on every entry point.
#![allow(unsafe_code)]

use core::ffi::c_void;

use crate::engine::{self, SEED};

/// A null `data` reads as an empty buffer whatever `length` says.
///
/// # Safety
///
/// `data` must be null or valid for reads of `length` bytes.
#[inline]
unsafe fn bytes<'a>(data: *const c_void, length: usize) -> &'a [u8] {
  if length == 0 || data.is_null() {
    return &[];
  }
  // SAFETY: non-null and valid for `length` bytes per the caller contract.
  unsafe { core::slice::from_raw_parts(data.cast::<u8>(), length) }
}

macro_rules! ffi_variant {
  ($(#[$meta:meta])* $one_shot:ident, $partial:ident => $engine_partial:path) => {
    $(#[$meta])*
    ///
    /// # Safety
    ///
    /// `data` must be null or valid for reads of `length` bytes.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn $one_shot(data: *const c_void, length: usize) -> u32 {
      // SAFETY: forwarded caller contract.
      let data = unsafe { bytes(data, length) };
      engine::finalize(data.len() as u64, $engine_partial(data, SEED))
    }

    $(#[$meta])*
    ///
    /// # Safety
    ///
    /// `data` must be null or valid for reads of `length` bytes.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn $partial(data: *const c_void, length: usize, previous: u32) -> u32 {
      // SAFETY: forwarded caller contract.
      let data = unsafe { bytes(data, length) };
      $engine_partial(data, previous)
    }
  };
}

macro_rules! ffi_prefetch_variant {
  ($(#[$meta:meta])* $one_shot:ident, $partial:ident => $engine_partial:path) => {
    $(#[$meta])*
    ///
    /// # Safety
    ///
    /// `data` must be null or valid for reads of `length` bytes.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn $one_shot(data: *const c_void, length: usize, prefetch_ahead: usize) -> u32 {
      // SAFETY: forwarded caller contract.
      let data = unsafe { bytes(data, length) };
      engine::finalize(data.len() as u64, $engine_partial(data, SEED, prefetch_ahead))
    }

    $(#[$meta])*
    ///
    /// # Safety
    ///
    /// `data` must be null or valid for reads of `length` bytes.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn $partial(
      data: *const c_void,
      length: usize,
      previous: u32,
      prefetch_ahead: usize,
    ) -> u32 {
      // SAFETY: forwarded caller contract.
      let data = unsafe { bytes(data, length) };
      $engine_partial(data, previous, prefetch_ahead)
    }
  };
}

ffi_variant!(
  /// cksum with the auto-selected kernel.
  crc32_fast, crc32_fast_partial => engine::partial
);

ffi_variant!(
  /// Byte-at-a-time kernel.
  crc32_fast_bytewise, crc32_fast_bytewise_partial => engine::bytewise_partial
);

ffi_variant!(
  /// Slice-by-16 kernel.
  crc32_fast_16bytes, crc32_fast_16bytes_partial => engine::slice16_partial
);

ffi_variant!(
  /// Slice-by-32 kernel.
  crc32_fast_32bytes, crc32_fast_32bytes_partial => engine::slice32_partial
);

ffi_prefetch_variant!(
  /// Slice-by-16 kernel with prefetch (`prefetch_ahead` bytes, `CRC32_FAST_DEFAULT_PREFETCH` is the usual choice).
  crc32_fast_16bytes_prefetch, crc32_fast_16bytes_prefetch_partial => engine::slice16_prefetch_partial
);

ffi_prefetch_variant!(
  /// Slice-by-32 kernel with prefetch (`prefetch_ahead` bytes, `CRC32_FAST_DEFAULT_PREFETCH` is the usual choice).
  crc32_fast_32bytes_prefetch, crc32_fast_32bytes_prefetch_partial => engine::slice32_prefetch_partial
);

/// Fold the total stream length into a running register.
#[unsafe(no_mangle)]
pub extern "C" fn crc32_fast_finalize(total_length: usize, previous: u32) -> u32 {
  engine::finalize(total_length as u64, previous)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ptr(data: &[u8]) -> *const c_void {
    data.as_ptr().cast()
  }

  #[test]
  fn one_shot_variants_agree() {
    let data = b"The quick brown fox jumps over the lazy dog";
    let n = data.len();
    // SAFETY: `data` is a live slice of `n` bytes.
    unsafe {
      assert_eq!(crc32_fast(ptr(data), n), 2_074_844_392);
      assert_eq!(crc32_fast_bytewise(ptr(data), n), 2_074_844_392);
      assert_eq!(crc32_fast_16bytes(ptr(data), n), 2_074_844_392);
      assert_eq!(crc32_fast_32bytes(ptr(data), n), 2_074_844_392);
      assert_eq!(crc32_fast_16bytes_prefetch(ptr(data), n, 256), 2_074_844_392);
      assert_eq!(crc32_fast_32bytes_prefetch(ptr(data), n, 0), 2_074_844_392);
    }
  }

  #[test]
  fn null_with_zero_length_is_empty() {
    // SAFETY: null is allowed with length 0.
    unsafe {
      assert_eq!(crc32_fast(core::ptr::null(), 0), 4_294_967_295);
      assert_eq!(crc32_fast_partial(core::ptr::null(), 0, 1234), 1234);
    }
  }

  #[test]
  fn null_with_nonzero_length_is_empty() {
    // SAFETY: a null pointer is never dereferenced.
    unsafe {
      assert_eq!(crc32_fast(core::ptr::null(), 5), 4_294_967_295);
      assert_eq!(crc32_fast_32bytes_prefetch(core::ptr::null(), 64, 256), 4_294_967_295);
      assert_eq!(crc32_fast_16bytes_partial(core::ptr::null(), 9, SEED), SEED);
    }
  }

  #[test]
  fn partial_then_finalize() {
    // SAFETY: both slices are live for their lengths.
    let reg = unsafe {
      let reg = crc32_fast_partial(ptr(b"AB"), 2, SEED);
      crc32_fast_32bytes_prefetch_partial(ptr(b"CD"), 2, reg, 256)
    };
    assert_eq!(crc32_fast_finalize(4, reg), 3_189_099_728);
  }
}
