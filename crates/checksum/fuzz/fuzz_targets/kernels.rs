//! Cross-kernel equivalence fuzzing.
//!
//! Every kernel, under any seed and prefetch distance, must match the bitwise
//! reference register for the same input.

#![no_main]

use arbitrary::Arbitrary;
use fast_cksum::{Kernel, Options, __internal::cksum_reference};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  seed: u32,
  prefetch_distance: u16,
  data: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let opts = Options::default()
    .with_seed(input.seed)
    .with_prefetch_distance(usize::from(input.prefetch_distance));

  let expected = cksum_reference(input.seed, data);
  for kernel in Kernel::ALL {
    let got = kernel.partial(data, opts);
    assert_eq!(
      got,
      expected,
      "{} produced 0x{got:08X}, reference 0x{expected:08X}, len={}",
      kernel.name(),
      data.len()
    );
  }
});
