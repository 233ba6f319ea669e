//! POSIX `cksum` compatible CRC32 with table-driven slicing kernels.
//!
//! The crate computes the checksum printed by `cksum(1)`: CRC-32 with
//! polynomial `0x04C11DB7`, processed MSB-first, with the byte length of the
//! input folded in before the final complement.
//!
//! # Kernels
//!
//! | Kernel | Bytes/iter | Notes |
//! |--------|------------|-------|
//! | [`Kernel::Reference`] | 1 bit | bitwise, no tables |
//! | [`Kernel::Bytewise`] | 1 | small inputs and tails |
//! | [`Kernel::Slice16`] | 16 | |
//! | [`Kernel::Slice32`] | 32 | |
//! | [`Kernel::Slice16Prefetch`] / [`Kernel::Slice32Prefetch`] | 16 / 32 | software prefetch ahead of the read position |
//!
//! [`partial`] and [`full`] pick a kernel by input size (see [`config`]).
//! All kernels produce identical results.
//!
//! # Example
//!
//! ```rust
//! use fast_cksum::{Checksum, Cksum, SEED, finalize, full, partial};
//!
//! // One-shot
//! assert_eq!(full(b"123456789"), 930_766_865);
//!
//! // Streaming: thread the register, finalize once with the total length
//! let reg = partial(b"1234", SEED);
//! let reg = partial(b"56789", reg);
//! assert_eq!(finalize(9, reg), 930_766_865);
//!
//! // Streaming hasher that tracks the length itself
//! let mut hasher = Cksum::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), 930_766_865);
//! ```
//!
//! # Features
//!
//! - `std` (default): environment overrides, logging, I/O adapters, ledgers
//! - `ffi`: `extern "C"` entry points declared in `include/fast_cksum.h`
//! - `cli`: the `fast-cksum` binary
//!
//! Without `std` the crate is `no_std` and uses the built-in defaults.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod common;
pub mod config;
pub mod dispatchers;
mod engine;
#[cfg(feature = "ffi")]
pub mod ffi;
mod hasher;
#[cfg(feature = "std")]
pub mod ledger;

#[doc(hidden)]
pub mod __internal {
  pub use crate::common::{kernels, reference::cksum_reference};
}

pub use engine::{
  DEFAULT_PREFETCH_DISTANCE, Kernel, Options, SEED, backend_name, bytewise, bytewise_partial, finalize, full,
  kernel_name_for_len, partial, slice16, slice16_partial, slice16_prefetch, slice16_prefetch_partial, slice32,
  slice32_partial, slice32_prefetch, slice32_prefetch_partial,
};
pub use hasher::Cksum;
// Re-export traits for convenience
pub use traits::Checksum;
#[cfg(feature = "std")]
pub use traits::io::{ChecksumReader, ChecksumWriter};
