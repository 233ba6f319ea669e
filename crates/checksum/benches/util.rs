use std::sync::Once;

pub const CASES: &[(&str, usize)] = &[
  ("xs", 64),
  ("s", 256),
  ("m", 4 * 1024),
  ("l", 64 * 1024),
  ("xl", 1024 * 1024),
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Alignment {
  /// A regular `Vec<u8>` buffer (baseline).
  Vec,
  /// A slice starting at a 64B-aligned address (cache line).
  A64,
  /// A slice starting one byte past a cache line.
  Off1,
}

impl Alignment {
  #[inline]
  #[must_use]
  pub const fn label(self) -> &'static str {
    match self {
      Self::Vec => "vec",
      Self::A64 => "a64",
      Self::Off1 => "a64+1",
    }
  }
}

pub struct BenchData {
  alignment: Alignment,
  backing: Vec<u8>,
  offset: usize,
  len: usize,
}

impl BenchData {
  #[inline]
  #[must_use]
  pub fn from_vec(data: Vec<u8>) -> Self {
    let len = data.len();
    Self {
      alignment: Alignment::Vec,
      backing: data,
      offset: 0,
      len,
    }
  }

  /// Copy `src` so that it starts `skew` bytes past a 64B boundary.
  #[must_use]
  pub fn aligned_copy(src: &[u8], alignment: Alignment, skew: usize) -> Self {
    let len = src.len();
    let mut backing = vec![0u8; len + 64 + skew];

    let misalignment = backing.as_ptr() as usize % 64;
    let offset = (64 - misalignment) % 64 + skew;
    backing[offset..offset + len].copy_from_slice(src);

    Self {
      alignment,
      backing,
      offset,
      len,
    }
  }

  #[inline]
  #[must_use]
  pub fn alignment(&self) -> Alignment {
    self.alignment
  }

  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    &self.backing[self.offset..self.offset + self.len]
  }
}

#[must_use]
pub fn make_data(len: usize) -> Vec<u8> {
  (0..len)
    .map(|i| (i as u8).wrapping_mul(31).wrapping_add((i >> 8) as u8))
    .collect()
}

#[must_use]
pub fn make_alignment_variants(src: Vec<u8>) -> Vec<BenchData> {
  let a64 = BenchData::aligned_copy(&src, Alignment::A64, 0);
  let off1 = BenchData::aligned_copy(&src, Alignment::Off1, 1);
  vec![BenchData::from_vec(src), a64, off1]
}

#[inline]
#[must_use]
pub fn bench_param_label(size_label: &str, alignment: Alignment) -> String {
  format!("{size_label}@{}", alignment.label())
}

/// Print kernel selection once at benchmark start.
pub fn print_selection_info() {
  static ONCE: Once = Once::new();
  ONCE.call_once(|| {
    let cfg = fast_cksum::config::get();
    eprintln!("dispatcher: {}", fast_cksum::backend_name());
    eprintln!("force: {}  prefetch distance: {} B", cfg.force.as_str(), cfg.prefetch_distance);
    for &(label, size) in CASES {
      eprintln!("  {label:>3} ({size:>7} B): {}", fast_cksum::kernel_name_for_len(size));
    }
  });
}
