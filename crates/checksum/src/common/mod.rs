//! Common building blocks for the cksum engine.
//!
//! This module provides:
//! - Const-fn lookup table generation
//! - The bitwise reference implementation
//! - Portable bytewise and slice-by-16/32 kernels
//! - Software prefetch hints

pub mod kernels;
pub mod portable;
pub mod prefetch;
pub mod reference;
pub mod tables;
