//! Canonical kernel names.
//!
//! Names follow the `family/variant` scheme and are what
//! [`Kernel::name`](crate::Kernel::name) and the dispatcher report.

/// Reference (bitwise) kernel name - canonical implementation for verification.
pub const REFERENCE: &str = "reference/bitwise";

/// Byte-at-a-time table lookup.
pub const PORTABLE_BYTEWISE: &str = "portable/bytewise";

/// Slice-by-16.
pub const PORTABLE_SLICE16: &str = "portable/slice16";

/// Slice-by-16 with software prefetch.
pub const PORTABLE_SLICE16_PREFETCH: &str = "portable/slice16-prefetch";

/// Slice-by-32.
pub const PORTABLE_SLICE32: &str = "portable/slice32";

/// Slice-by-32 with software prefetch.
pub const PORTABLE_SLICE32_PREFETCH: &str = "portable/slice32-prefetch";

/// Size-tiered automatic selection across the portable kernels.
pub const AUTO: &str = "auto/size-tiered";
