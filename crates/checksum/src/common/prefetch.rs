//! Software prefetch hints for the slicing kernels.

// SAFETY: Prefetch instructions are hints to the CPU and cannot cause memory
// unsafety; invalid addresses are silently ignored.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
//! Table-driven CRC is latency bound on the lookups, so on large buffers the
//! load of the next input line can stall the loop. The prefetching kernels
//! ask for the line `distance` bytes ahead of the block being processed.
//!
//! The hint address is computed with wrapping pointer arithmetic and is never
//! dereferenced, so it may point past the end of the input.

#[cfg(target_arch = "x86_64")]
mod x86_64_impl {
  use core::arch::x86_64::{_MM_HINT_T0, _mm_prefetch};

  /// Prefetch data for read into L1 cache (temporal).
  ///
  /// # Safety
  ///
  /// The pointer does not need to be valid or aligned.
  #[inline(always)]
  pub unsafe fn prefetch_read_l1(ptr: *const u8) {
    _mm_prefetch(ptr.cast::<i8>(), _MM_HINT_T0);
  }
}

#[cfg(target_arch = "aarch64")]
mod aarch64_impl {
  /// Prefetch data for read into L1 cache (PLDL1KEEP).
  ///
  /// # Safety
  ///
  /// The pointer does not need to be valid or aligned.
  #[inline(always)]
  pub unsafe fn prefetch_read_l1(ptr: *const u8) {
    core::arch::asm!(
      "prfm pldl1keep, [{ptr}]",
      ptr = in(reg) ptr,
      options(nostack, preserves_flags)
    );
  }
}

#[cfg(target_arch = "aarch64")]
pub use aarch64_impl::prefetch_read_l1;
#[cfg(target_arch = "x86_64")]
pub use x86_64_impl::prefetch_read_l1;

/// No prefetch instruction on this target.
///
/// # Safety
///
/// Always safe; kept `unsafe` to match the other targets.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
pub unsafe fn prefetch_read_l1(_ptr: *const u8) {}

/// Hint that the byte `distance` past `ptr` will be read soon.
#[inline(always)]
pub fn prefetch_ahead(ptr: *const u8, distance: usize) {
  // SAFETY: prefetch never dereferences the address, and `wrapping_add`
  // keeps the pointer arithmetic itself defined for any distance.
  unsafe { prefetch_read_l1(ptr.wrapping_add(distance)) }
}
