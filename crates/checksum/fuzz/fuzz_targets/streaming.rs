//! Fuzz target for the streaming cksum API.
//!
//! Arbitrary chunkings through `partial` and through the `Cksum` hasher must
//! both land on the one-shot `full` result.

#![no_main]

use arbitrary::Arbitrary;
use fast_cksum::{Checksum, Cksum, SEED, finalize, full, partial};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<u16>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let expected = full(data);

  let mut reg = SEED;
  let mut hasher = Cksum::new();
  for chunk in chunks(data, &input.chunk_sizes) {
    reg = partial(chunk, reg);
    hasher.update(chunk);
  }

  assert_eq!(finalize(data.len() as u64, reg), expected, "partial streaming mismatch");
  assert_eq!(hasher.finalize(), expected, "hasher streaming mismatch");
  assert_eq!(hasher.len(), data.len() as u64);

  // Resuming from a saved register continues the same stream.
  let split = input.chunk_sizes.first().map_or(0, |&s| usize::from(s) % (data.len() + 1));
  let (a, b) = data.split_at(split);
  let mut resumed = Cksum::resume(partial(a, SEED), a.len() as u64);
  resumed.update(b);
  assert_eq!(resumed.finalize(), expected, "resume mismatch at split={split}");
});

fn chunks<'a>(data: &'a [u8], sizes: &'a [u16]) -> impl Iterator<Item = &'a [u8]> {
  let mut rest = data;
  let mut idx = 0usize;
  core::iter::from_fn(move || {
    if rest.is_empty() {
      return None;
    }
    let size = if sizes.is_empty() {
      1
    } else {
      usize::from(sizes[idx % sizes.len()]).max(1)
    };
    idx += 1;
    let (head, tail) = rest.split_at(size.min(rest.len()));
    rest = tail;
    Some(head)
  })
}
