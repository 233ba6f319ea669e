//! Const-fn lookup table generation for the cksum CRC.
//!
//! Tables are computed at compile time and embedded in the binary as
//! `static`s, so they are immutable and shared by every caller without
//! synchronization.
//!
//! # Layout
//!
//! | Table | Shape | Used by |
//! |-------|-------|---------|
//! | [`TABLES_16`] | 16×256×u32 | bytewise (row 0), slice-by-16 |
//! | [`TABLES_32`] | 32×256×u32 | slice-by-32 |
//!
//! Row `k` holds the register contribution of a byte followed by `k` zero
//! bytes, which is what lets slice-by-K look up every byte of a block
//! independently.

// All indices are loop bounded (0..256, 0..K) or a shifted u32 (0..=255).
#![allow(clippy::indexing_slicing)]

/// Generator polynomial of POSIX `cksum` (normal, MSB-first form).
pub const CKSUM_POLY: u32 = 0x04C1_1DB7;

/// Division remainder of `index << 24` (MSB-first, one byte).
#[must_use]
pub const fn cksum_table_entry(poly: u32, index: u8) -> u32 {
  let mut crc = (index as u32) << 24;
  let mut i = 0;
  while i < 8 {
    crc = if crc & 0x8000_0000 != 0 { (crc << 1) ^ poly } else { crc << 1 };
    i += 1;
  }
  crc
}

/// Generate `K` lookup tables for slice-by-K computation.
///
/// Row 0 is the plain byte table. Each further row shifts the previous row
/// through one more zero byte:
/// `T[k][i] = (T[k-1][i] << 8) ^ T[0][T[k-1][i] >> 24]`.
#[must_use]
pub const fn generate_cksum_tables<const K: usize>(poly: u32) -> [[u32; 256]; K] {
  let mut tables = [[0u32; 256]; K];

  let mut i = 0usize;
  while i < 256 {
    tables[0][i] = cksum_table_entry(poly, i as u8);
    i += 1;
  }

  let mut k = 1usize;
  while k < K {
    i = 0;
    while i < 256 {
      let prev = tables[k - 1][i];
      tables[k][i] = (prev << 8) ^ tables[0][(prev >> 24) as usize];
      i += 1;
    }
    k += 1;
  }

  tables
}

/// Slice-by-16 tables. Row 0 doubles as the bytewise table.
pub static TABLES_16: [[u32; 256]; 16] = generate_cksum_tables::<16>(CKSUM_POLY);

/// Slice-by-32 tables.
pub static TABLES_32: [[u32; 256]; 32] = generate_cksum_tables::<32>(CKSUM_POLY);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn base_table_known_entries() {
    assert_eq!(TABLES_16[0][0], 0);
    assert_eq!(TABLES_16[0][1], CKSUM_POLY);
    assert_eq!(TABLES_16[0][255], 0xB1F7_40B4);
  }

  #[test]
  fn base_table_is_linear() {
    // CRC tables over GF(2) are linear: T[a ^ b] = T[a] ^ T[b].
    for a in 0..256usize {
      for b in [1usize, 2, 0x80, 0xFF] {
        assert_eq!(TABLES_16[0][a ^ b], TABLES_16[0][a] ^ TABLES_16[0][b]);
      }
    }
  }

  #[test]
  fn slice16_rows_are_prefix_of_slice32_rows() {
    for k in 0..16 {
      assert_eq!(TABLES_16[k], TABLES_32[k], "row {k}");
    }
  }

  #[test]
  fn derived_row_matches_zero_byte_shift() {
    // Row k of byte i equals feeding byte i then k zero bytes one at a time.
    for i in [0u8, 1, 0x5A, 0xFF] {
      let mut crc = 0u32;
      for (k, row) in TABLES_32.iter().enumerate() {
        let byte = if k == 0 { i } else { 0 };
        crc = (crc << 8) ^ TABLES_32[0][((crc >> 24) ^ u32::from(byte)) as usize];
        assert_eq!(row[usize::from(i)], crc, "byte {i:#04x} row {k}");
      }
    }
  }
}
