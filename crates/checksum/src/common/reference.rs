//! Bitwise reference implementation of the cksum CRC.
//!
//! Processes one bit at a time and uses no tables, so it mirrors the
//! mathematical definition directly. Every table-driven kernel must produce
//! results identical to this one.
//!
//! # CRC Model
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | `width`   | 32 |
//! | `poly`    | `0x04C11DB7` |
//! | `init`    | `0x00000000` |
//! | `refin`   | false (MSB-first) |
//! | `refout`  | false |
//! | `xorout`  | `0xFFFFFFFF` |
//!
//! cksum then appends the byte length of the message, least significant
//! byte first, until the remaining length is zero, before the final XOR.
//! Zero bytes below the highest set byte are still appended (256 feeds
//! `0x00, 0x01`).
//!
//! These functions work on the internal (uncomplemented) division register.

// All indices are bounded by `data.len()`.
#![allow(clippy::indexing_slicing)]

use super::tables::CKSUM_POLY;

/// Bitwise CRC update (MSB-first) on the internal division register.
#[must_use]
pub const fn cksum_bitwise(poly: u32, init: u32, data: &[u8]) -> u32 {
  let mut crc = init;
  let mut i: usize = 0;
  while i < data.len() {
    crc ^= (data[i] as u32) << 24;
    let mut bit: u32 = 0;
    while bit < 8 {
      crc = if crc & 0x8000_0000 != 0 { (crc << 1) ^ poly } else { crc << 1 };
      bit += 1;
    }
    i += 1;
  }
  crc
}

/// Fold `len` into the internal register, low byte first, until it is zero.
#[must_use]
pub const fn cksum_length_bitwise(poly: u32, init: u32, mut len: u64) -> u32 {
  let mut crc = init;
  while len != 0 {
    crc = cksum_bitwise(poly, crc, &[(len & 0xFF) as u8]);
    len >>= 8;
  }
  crc
}

/// Reference kernel with the same register convention as the table kernels:
/// takes and returns the public (complemented) register.
#[must_use]
pub const fn cksum_reference(previous: u32, data: &[u8]) -> u32 {
  !cksum_bitwise(CKSUM_POLY, !previous, data)
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-time check values
// ─────────────────────────────────────────────────────────────────────────────

const CHECK_INPUT: &[u8] = b"123456789";

// CRC-32/POSIX: init=0, xorout=0xFFFFFFFF, no length. Check value 0x765E7680.
const _: () = {
  let check = !cksum_bitwise(CKSUM_POLY, 0, CHECK_INPUT);
  assert!(check == 0x765E_7680);
};

// CRC-32/MPEG-2: init=0xFFFFFFFF, xorout=0. Check value 0x0376E6E7.
const _: () = {
  let check = cksum_bitwise(CKSUM_POLY, !0u32, CHECK_INPUT);
  assert!(check == 0x0376_E6E7);
};

// `cksum` of "123456789" (length appended): 930766865.
const _: () = {
  let raw = cksum_bitwise(CKSUM_POLY, 0, CHECK_INPUT);
  let check = !cksum_length_bitwise(CKSUM_POLY, raw, CHECK_INPUT.len() as u64);
  assert!(check == 930_766_865);
};
