//! Backend crate: kernel selection and dispatch caching.
//!
//! Algorithm crates describe each kernel with a name and a function pointer
//! ([`Selected`]) and declare a static dispatcher with
//! [`define_dispatcher!`]. The dispatcher runs its selector once and every
//! later call is a single indirect call.
//!
//! ```ignore
//! use backend::dispatch::Selected;
//!
//! pub type CksumFn = fn(u32, &[u8]) -> u32;
//! backend::define_dispatcher!(CksumDispatcher, CksumFn, u32);
//!
//! fn select() -> Selected<CksumFn> {
//!   Selected::new("portable/slice16", slice16_kernel)
//! }
//!
//! static DISPATCHER: CksumDispatcher = CksumDispatcher::new(select);
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod dispatch;

#[doc(hidden)]
pub mod __private {
  #[cfg(feature = "std")]
  pub use std::sync::OnceLock;
}
