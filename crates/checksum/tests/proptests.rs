//! Property-based tests for the cksum engine.
//!
//! These tests verify invariants that must hold for all inputs, not just
//! specific test vectors. Uses proptest for randomized input generation.

use fast_cksum::{Checksum, Cksum, Kernel, Options, SEED, finalize, full, partial};
use proptest::prelude::*;

// Test Strategies

/// Generate arbitrary byte vectors up to 8KB.
fn arb_data() -> impl Strategy<Value = Vec<u8>> {
  prop::collection::vec(any::<u8>(), 0..8192)
}

/// Data together with sorted split points inside it.
fn arb_data_with_splits() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
  arb_data().prop_flat_map(|data| {
    let len = data.len();
    let splits = prop::collection::vec(0..=len, 0..8).prop_map(move |mut splits| {
      splits.sort_unstable();
      splits.push(len);
      splits.dedup();
      splits
    });
    (Just(data), splits)
  })
}

fn fold_chunks(data: &[u8], splits: &[usize], kernel: Option<(Kernel, Options)>) -> u32 {
  let mut reg = SEED;
  let mut prev = 0;
  for &split in splits {
    let chunk = &data[prev..split];
    reg = match kernel {
      Some((k, opts)) => k.partial(chunk, opts.with_seed(reg)),
      None => partial(chunk, reg),
    };
    prev = split;
  }
  finalize(data.len() as u64, reg)
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(256))]

  #[test]
  fn streaming_equals_full((data, splits) in arb_data_with_splits()) {
    prop_assert_eq!(fold_chunks(&data, &splits, None), full(&data));
  }

  #[test]
  fn every_kernel_streams_like_full(
    (data, splits) in arb_data_with_splits(),
    distance in 0usize..4096,
  ) {
    let expected = full(&data);
    let opts = Options::default().with_prefetch_distance(distance);
    for kernel in Kernel::ALL {
      prop_assert_eq!(
        fold_chunks(&data, &splits, Some((kernel, opts))),
        expected,
        "kernel {}",
        kernel.name()
      );
    }
  }

  #[test]
  fn variants_equal_reference(data in arb_data(), seed in any::<u32>()) {
    let opts = Options::default().with_seed(seed);
    let expected = Kernel::Reference.partial(&data, opts);
    for kernel in Kernel::ALL {
      prop_assert_eq!(kernel.partial(&data, opts), expected, "kernel {}", kernel.name());
    }
  }

  #[test]
  fn hasher_matches_oneshot(data in arb_data(), split in any::<prop::sample::Index>()) {
    let split = split.index(data.len() + 1);
    let (a, b) = data.split_at(split);
    let mut h = Cksum::new();
    h.update(a);
    h.update(b);
    prop_assert_eq!(h.finalize(), Cksum::checksum(&data));
    prop_assert_eq!(h.len(), data.len() as u64);
  }

  #[test]
  fn swapping_distinct_chunks_changes_checksum(
    a in prop::collection::vec(any::<u8>(), 1..64),
    b in prop::collection::vec(any::<u8>(), 1..64),
  ) {
    let mut ab = a.clone();
    ab.extend_from_slice(&b);
    let mut ba = b.clone();
    ba.extend_from_slice(&a);
    prop_assume!(ab != ba);
    // Equal lengths, different messages: a collision has probability 2^-32.
    prop_assert_ne!(full(&ab), full(&ba));
  }
}
