//! Portable table-driven kernels for the cksum CRC.
//!
//! All functions here operate on the internal (uncomplemented) division
//! register; the complement convention of the public API is applied one
//! level up.
//!
//! # Algorithm Overview
//!
//! Slice-by-K reads a K-byte block as big-endian `u32` words and XORs the
//! register into the first word. Each byte `j` of the block then indexes
//! table row `K-1-j` (its contribution after the `K-1-j` bytes that follow
//! it), and the K lookups are combined with XOR. The tail shorter than one
//! block goes through the bytewise kernel.
//!
//! | Kernel | Bytes/iter | Tables |
//! |--------|------------|--------|
//! | bytewise | 1 | 1×256×u32 |
//! | slice-by-16 | 16 | 16×256×u32 |
//! | slice-by-32 | 32 | 32×256×u32 |

// Table indices are a byte (0..=255) and rows are `K-1-j` with `j < K`.
#![allow(clippy::indexing_slicing)]

use super::prefetch::prefetch_ahead;

/// One table step for a single byte.
#[inline(always)]
fn step(crc: u32, byte: u8, table: &[u32; 256]) -> u32 {
  (crc << 8) ^ table[((crc >> 24) ^ u32::from(byte)) as usize]
}

/// Update the register one byte at a time.
#[inline]
pub fn bytewise(mut crc: u32, data: &[u8], table: &[u32; 256]) -> u32 {
  for &b in data {
    crc = step(crc, b, table);
  }
  crc
}

/// Append the byte length, low byte first, until the remaining length is 0.
#[inline]
pub fn fold_length(mut crc: u32, mut len: u64, table: &[u32; 256]) -> u32 {
  while len != 0 {
    crc = step(crc, (len & 0xFF) as u8, table);
    len >>= 8;
  }
  crc
}

/// Fold one K-byte block into the register.
#[inline(always)]
fn fold_block<const K: usize>(crc: u32, block: &[u8; K], tables: &[[u32; 256]; K]) -> u32 {
  let head = u32::from_be_bytes([block[0], block[1], block[2], block[3]]) ^ crc;

  let mut acc = 0u32;
  for (j, byte) in head.to_be_bytes().into_iter().enumerate() {
    acc ^= tables[K - 1 - j][usize::from(byte)];
  }
  let mut j = 4;
  while j < K {
    acc ^= tables[K - 1 - j][usize::from(block[j])];
    j += 1;
  }
  acc
}

/// Slice-by-K over whole blocks, then bytewise over the tail.
#[inline(always)]
fn slice<const K: usize>(mut crc: u32, data: &[u8], tables: &[[u32; 256]; K]) -> u32 {
  let (blocks, tail) = data.as_chunks::<K>();
  for block in blocks {
    crc = fold_block(crc, block, tables);
  }
  bytewise(crc, tail, &tables[0])
}

/// Slice-by-K with a prefetch hint `distance` bytes ahead of every block.
#[inline(always)]
fn slice_prefetch<const K: usize>(mut crc: u32, data: &[u8], tables: &[[u32; 256]; K], distance: usize) -> u32 {
  let (blocks, tail) = data.as_chunks::<K>();
  for block in blocks {
    prefetch_ahead(block.as_ptr(), distance);
    crc = fold_block(crc, block, tables);
  }
  bytewise(crc, tail, &tables[0])
}

/// Update the register using slice-by-16.
#[inline]
pub fn slice16(crc: u32, data: &[u8], tables: &[[u32; 256]; 16]) -> u32 {
  slice(crc, data, tables)
}

/// Update the register using slice-by-16 with prefetch.
#[inline]
pub fn slice16_prefetch(crc: u32, data: &[u8], tables: &[[u32; 256]; 16], distance: usize) -> u32 {
  slice_prefetch(crc, data, tables, distance)
}

/// Update the register using slice-by-32.
#[inline]
pub fn slice32(crc: u32, data: &[u8], tables: &[[u32; 256]; 32]) -> u32 {
  slice(crc, data, tables)
}

/// Update the register using slice-by-32 with prefetch.
#[inline]
pub fn slice32_prefetch(crc: u32, data: &[u8], tables: &[[u32; 256]; 32], distance: usize) -> u32 {
  slice_prefetch(crc, data, tables, distance)
}
