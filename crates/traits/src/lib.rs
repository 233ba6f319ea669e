//! Core checksum traits for the fast-cksum workspace.
//!
//! This crate provides the streaming interface every checksum engine in the
//! workspace conforms to. It is `no_std` compatible and has zero dependencies.
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Checksum`] | Streaming checksum with one-shot helpers |
//!
//! With the `std` feature, [`io`] adds reader/writer adapters that checksum
//! bytes as they pass through.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;
pub mod io;

pub use checksum::Checksum;
