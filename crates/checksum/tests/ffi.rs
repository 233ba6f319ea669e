//! C ABI entry points, called the way a C caller would.

#![allow(unsafe_code)]

use core::ffi::c_void;

use fast_cksum::{
  SEED,
  ffi::{
    crc32_fast, crc32_fast_16bytes, crc32_fast_16bytes_partial, crc32_fast_16bytes_prefetch,
    crc32_fast_16bytes_prefetch_partial, crc32_fast_32bytes, crc32_fast_32bytes_partial, crc32_fast_32bytes_prefetch,
    crc32_fast_32bytes_prefetch_partial, crc32_fast_bytewise, crc32_fast_bytewise_partial, crc32_fast_finalize,
    crc32_fast_partial,
  },
  full,
};

fn make_data(len: usize) -> Vec<u8> {
  (0..len).map(|i| ((i * 31 + (i >> 8)) & 0xff) as u8).collect()
}

fn ptr(data: &[u8]) -> *const c_void {
  data.as_ptr().cast()
}

#[test]
fn one_shot_entry_points_match_rust_api() {
  let data = make_data(1000);
  let n = data.len();
  assert_eq!(full(&data), 962_644_352);
  // SAFETY: `data` is live for `n` bytes.
  unsafe {
    assert_eq!(crc32_fast(ptr(&data), n), 962_644_352);
    assert_eq!(crc32_fast_bytewise(ptr(&data), n), 962_644_352);
    assert_eq!(crc32_fast_16bytes(ptr(&data), n), 962_644_352);
    assert_eq!(crc32_fast_32bytes(ptr(&data), n), 962_644_352);
    assert_eq!(crc32_fast_16bytes_prefetch(ptr(&data), n, 256), 962_644_352);
    assert_eq!(crc32_fast_32bytes_prefetch(ptr(&data), n, 256), 962_644_352);
  }
}

#[test]
fn chunked_stream_through_every_partial() {
  type Partial = unsafe extern "C" fn(*const c_void, usize, u32) -> u32;

  unsafe extern "C" fn p16(data: *const c_void, len: usize, prev: u32) -> u32 {
    // SAFETY: forwarded caller contract.
    unsafe { crc32_fast_16bytes_prefetch_partial(data, len, prev, 128) }
  }
  unsafe extern "C" fn p32(data: *const c_void, len: usize, prev: u32) -> u32 {
    // SAFETY: forwarded caller contract.
    unsafe { crc32_fast_32bytes_prefetch_partial(data, len, prev, 512) }
  }

  let partials: [Partial; 6] = [
    crc32_fast_partial,
    crc32_fast_bytewise_partial,
    crc32_fast_16bytes_partial,
    crc32_fast_32bytes_partial,
    p16,
    p32,
  ];

  let data = make_data(65_537);
  let expected = full(&data);
  for (idx, f) in partials.iter().enumerate() {
    let mut reg = SEED;
    for chunk in data.chunks(4099) {
      // SAFETY: `chunk` is live for its length.
      reg = unsafe { f(ptr(chunk), chunk.len(), reg) };
    }
    assert_eq!(crc32_fast_finalize(data.len(), reg), expected, "partial #{idx}");
  }
}

#[test]
fn empty_input() {
  // SAFETY: null is allowed with a zero length.
  unsafe {
    assert_eq!(crc32_fast(core::ptr::null(), 0), 4_294_967_295);
    assert_eq!(crc32_fast_32bytes_prefetch(core::ptr::null(), 0, 256), 4_294_967_295);
  }
  assert_eq!(crc32_fast_finalize(0, SEED), 0xFFFF_FFFF);
}
