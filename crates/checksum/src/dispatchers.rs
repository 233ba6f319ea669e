//! Dispatcher type for cksum kernels.
//!
//! The dispatcher caches kernel selection so repeated calls skip the
//! configuration lookup.
//!
//! # Usage
//!
//! ```ignore
//! use backend::dispatch::Selected;
//! use fast_cksum::dispatchers::{CksumDispatcher, CksumFn};
//!
//! fn slice16(state: u32, data: &[u8]) -> u32 {
//!   fast_cksum::slice16_partial(data, state)
//! }
//!
//! fn select() -> Selected<CksumFn> {
//!   Selected::new("portable/slice16", slice16)
//! }
//!
//! static DISPATCHER: CksumDispatcher = CksumDispatcher::new(select);
//! ```

/// Function signature for cksum kernels.
///
/// # Arguments
///
/// * `state` - Public running register (`SEED` for a fresh stream)
/// * `data` - Input data to process
///
/// # Returns
///
/// Updated public register after processing the input data.
pub type CksumFn = fn(u32, &[u8]) -> u32;

backend::define_dispatcher!(
  /// Dispatcher for cksum kernels.
  ///
  /// Caches the selected kernel on first access. Thread-safe.
  CksumDispatcher, CksumFn, u32
);
