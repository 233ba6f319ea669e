//! Runtime configuration (overrides + thresholds).
//!
//! This module centralizes kernel selection knobs:
//! - size thresholds between the bytewise, slice-by-16, slice-by-32 and
//!   prefetching slice-by-32 kernels
//! - the prefetch distance
//! - optional forced kernel selection
//!
//! Under `std`, environment overrides are read once per process:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `FAST_CKSUM_FORCE` | `auto` |
//! | `FAST_CKSUM_THRESHOLD_BYTEWISE_TO_SLICE16` | 16 |
//! | `FAST_CKSUM_THRESHOLD_SLICE16_TO_SLICE32` | 1024 |
//! | `FAST_CKSUM_THRESHOLD_PREFETCH` | 16384 |
//! | `FAST_CKSUM_PREFETCH_DISTANCE` | 256 |
//!
//! Values that do not parse are ignored with a warning.

use crate::engine::{DEFAULT_PREFETCH_DISTANCE, Kernel};

/// Forced kernel selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CksumForce {
  /// Use the size-tiered auto selector.
  #[default]
  Auto,
  /// Force the byte-at-a-time table kernel.
  Bytewise,
  /// Force slice-by-16.
  Slice16,
  /// Force slice-by-16 with prefetch.
  Slice16Prefetch,
  /// Force slice-by-32.
  Slice32,
  /// Force slice-by-32 with prefetch.
  Slice32Prefetch,
}

impl CksumForce {
  /// Every force mode, in the order the auto selector escalates.
  pub const ALL: [Self; 6] = [
    Self::Auto,
    Self::Bytewise,
    Self::Slice16,
    Self::Slice16Prefetch,
    Self::Slice32,
    Self::Slice32Prefetch,
  ];

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Bytewise => "bytewise",
      Self::Slice16 => "slice16",
      Self::Slice16Prefetch => "slice16-prefetch",
      Self::Slice32 => "slice32",
      Self::Slice32Prefetch => "slice32-prefetch",
    }
  }

  /// Parse a force name (case-insensitive, surrounding whitespace ignored).
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("bytewise")
      || value.eq_ignore_ascii_case("scalar")
      || value.eq_ignore_ascii_case("table")
    {
      return Some(Self::Bytewise);
    }
    if value.eq_ignore_ascii_case("slice16") {
      return Some(Self::Slice16);
    }
    if value.eq_ignore_ascii_case("slice16-prefetch") {
      return Some(Self::Slice16Prefetch);
    }
    if value.eq_ignore_ascii_case("slice32") {
      return Some(Self::Slice32);
    }
    if value.eq_ignore_ascii_case("slice32-prefetch") {
      return Some(Self::Slice32Prefetch);
    }
    None
  }

  /// The kernel this mode pins, or `None` for auto selection.
  #[must_use]
  pub const fn kernel(self) -> Option<Kernel> {
    match self {
      Self::Auto => None,
      Self::Bytewise => Some(Kernel::Bytewise),
      Self::Slice16 => Some(Kernel::Slice16),
      Self::Slice16Prefetch => Some(Kernel::Slice16Prefetch),
      Self::Slice32 => Some(Kernel::Slice32),
      Self::Slice32Prefetch => Some(Kernel::Slice32Prefetch),
    }
  }
}

/// Size thresholds used by the auto selector.
///
/// Each threshold is the smallest input length handed to the next kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CksumTunables {
  /// Bytes where slice-by-16 becomes faster than bytewise.
  pub bytewise_to_slice16: usize,
  /// Bytes where slice-by-32 becomes faster than slice-by-16.
  pub slice16_to_slice32: usize,
  /// Bytes where prefetching slice-by-32 becomes faster than plain slice-by-32.
  pub slice32_to_prefetch: usize,
}

impl Default for CksumTunables {
  fn default() -> Self {
    Self {
      bytewise_to_slice16: 16,
      slice16_to_slice32: 1024,
      slice32_to_prefetch: 16 * 1024,
    }
  }
}

/// Full runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CksumConfig {
  /// Requested force mode.
  pub force: CksumForce,
  /// Thresholds used by the auto selector.
  pub tunables: CksumTunables,
  /// Prefetch distance in bytes for the prefetching kernels.
  pub prefetch_distance: usize,
}

impl Default for CksumConfig {
  fn default() -> Self {
    Self {
      force: CksumForce::Auto,
      tunables: CksumTunables::default(),
      prefetch_distance: DEFAULT_PREFETCH_DISTANCE,
    }
  }
}

impl CksumConfig {
  /// Kernel the size-tiered policy picks for a buffer of `len` bytes.
  ///
  /// A forced mode is not consulted here; see
  /// [`kernel_name_for_len`](crate::kernel_name_for_len) for the effective
  /// choice.
  #[inline]
  #[must_use]
  pub const fn kernel_for_len(&self, len: usize) -> Kernel {
    let t = &self.tunables;
    if len < t.bytewise_to_slice16 {
      Kernel::Bytewise
    } else if len < t.slice16_to_slice32 {
      Kernel::Slice16
    } else if len < t.slice32_to_prefetch {
      Kernel::Slice32
    } else {
      Kernel::Slice32Prefetch
    }
  }

  fn apply(mut self, ov: Overrides) -> Self {
    self.force = ov.force;
    if let Some(v) = ov.bytewise_to_slice16 {
      self.tunables.bytewise_to_slice16 = v;
    }
    if let Some(v) = ov.slice16_to_slice32 {
      self.tunables.slice16_to_slice32 = v;
    }
    if let Some(v) = ov.slice32_to_prefetch {
      self.tunables.slice32_to_prefetch = v;
    }
    if let Some(v) = ov.prefetch_distance {
      self.prefetch_distance = v;
    }
    self
  }
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: CksumForce,
  bytewise_to_slice16: Option<usize>,
  slice16_to_slice32: Option<usize>,
  slice32_to_prefetch: Option<usize>,
  prefetch_distance: Option<usize>,
}

/// Parse a byte count (decimal, surrounding whitespace ignored).
#[must_use]
pub fn parse_usize(value: &str) -> Option<usize> {
  let value = value.trim();
  if value.is_empty() {
    return None;
  }
  value.parse::<usize>().ok()
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn env_value(name: &str) -> Option<std::string::String> {
    let value = std::env::var(name).ok()?;
    if value.trim().is_empty() { None } else { Some(value) }
  }

  fn env_usize(name: &str) -> Option<usize> {
    let value = env_value(name)?;
    let parsed = parse_usize(&value);
    if parsed.is_none() {
      tracing::warn!(var = name, value = %value, "ignoring unparseable override");
    }
    parsed
  }

  fn env_force(name: &str) -> CksumForce {
    let Some(value) = env_value(name) else {
      return CksumForce::Auto;
    };
    CksumForce::parse(&value).unwrap_or_else(|| {
      tracing::warn!(var = name, value = %value, "unknown kernel, using auto selection");
      CksumForce::Auto
    })
  }

  Overrides {
    force: env_force("FAST_CKSUM_FORCE"),
    bytewise_to_slice16: env_usize("FAST_CKSUM_THRESHOLD_BYTEWISE_TO_SLICE16"),
    slice16_to_slice32: env_usize("FAST_CKSUM_THRESHOLD_SLICE16_TO_SLICE32"),
    slice32_to_prefetch: env_usize("FAST_CKSUM_THRESHOLD_PREFETCH"),
    prefetch_distance: env_usize("FAST_CKSUM_PREFETCH_DISTANCE"),
  }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

/// Get the effective configuration for this process.
#[inline]
#[must_use]
pub fn get() -> CksumConfig {
  CksumConfig::default().apply(overrides())
}
