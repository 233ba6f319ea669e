//! Kernel dispatch: selection results and cached dispatchers.
//!
//! - [`Selected`]: a kernel function pointer paired with its diagnostic name
//! - [`define_dispatcher!`](crate::define_dispatcher): declares a newtype
//!   dispatcher that caches the selection on first use
//!
//! # Caching
//!
//! - **std**: `OnceLock`, the selector runs at most once per process
//! - **no_std**: the selector runs on every call; selectors are expected to
//!   be cheap and pure so the result is the same either way

/// The result of kernel selection.
///
/// Contains the selected kernel's name and function pointer.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Human-readable name of the selected kernel (e.g. "portable/slice16").
  pub name: &'static str,
  /// The selected kernel function.
  pub func: F,
}

impl<F> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Declare a dispatcher newtype for kernels of signature `fn(S, &[u8]) -> S`.
///
/// The generated type exposes `new(selector)`, `get()`, `call(state, data)`
/// and `backend_name()`.
#[cfg(feature = "std")]
#[macro_export]
macro_rules! define_dispatcher {
  ($(#[$meta:meta])* $name:ident, $fn_ty:ty, $state:ty) => {
    $(#[$meta])*
    pub struct $name {
      inner: $crate::__private::OnceLock<$crate::dispatch::Selected<$fn_ty>>,
      selector: fn() -> $crate::dispatch::Selected<$fn_ty>,
    }

    impl $name {
      /// Create a dispatcher around `selector`. The selector runs on first use.
      #[must_use]
      pub const fn new(selector: fn() -> $crate::dispatch::Selected<$fn_ty>) -> Self {
        Self {
          inner: $crate::__private::OnceLock::new(),
          selector,
        }
      }

      /// Get the selected kernel, initializing on first call.
      #[inline]
      #[must_use]
      pub fn get(&self) -> $crate::dispatch::Selected<$fn_ty> {
        *self.inner.get_or_init(|| (self.selector)())
      }

      /// Run the selected kernel.
      #[inline]
      pub fn call(&self, state: $state, data: &[u8]) -> $state {
        (self.get().func)(state, data)
      }

      /// Name of the selected kernel.
      #[inline]
      #[must_use]
      pub fn backend_name(&self) -> &'static str {
        self.get().name
      }
    }

    impl ::core::fmt::Debug for $name {
      fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_struct(stringify!($name))
          .field("selected", &self.inner.get().map(|s| s.name))
          .finish()
      }
    }
  };
}

/// Declare a dispatcher newtype for kernels of signature `fn(S, &[u8]) -> S`.
///
/// Without `std` the selector runs on every call.
#[cfg(not(feature = "std"))]
#[macro_export]
macro_rules! define_dispatcher {
  ($(#[$meta:meta])* $name:ident, $fn_ty:ty, $state:ty) => {
    $(#[$meta])*
    pub struct $name {
      selector: fn() -> $crate::dispatch::Selected<$fn_ty>,
    }

    impl $name {
      /// Create a dispatcher around `selector`.
      #[must_use]
      pub const fn new(selector: fn() -> $crate::dispatch::Selected<$fn_ty>) -> Self {
        Self { selector }
      }

      /// Get the selected kernel.
      #[inline]
      #[must_use]
      pub fn get(&self) -> $crate::dispatch::Selected<$fn_ty> {
        (self.selector)()
      }

      /// Run the selected kernel.
      #[inline]
      pub fn call(&self, state: $state, data: &[u8]) -> $state {
        (self.get().func)(state, data)
      }

      /// Name of the selected kernel.
      #[inline]
      #[must_use]
      pub fn backend_name(&self) -> &'static str {
        self.get().name
      }
    }

    impl ::core::fmt::Debug for $name {
      fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_struct(stringify!($name)).finish_non_exhaustive()
      }
    }
  };
}
