//! Internal macros for CRC-32 variant generation.
//!
//! CRC-32 and CRC-32C share identical structure and differ only in the
//! polynomial marker, which selects the tables and the hardware eligibility.

/// Generate a CRC-32 variant type with all trait implementations.
///
/// This macro creates:
/// - The struct definition with `state` (running register) and `initial`
///   (construction seed, restored by `reset`)
/// - `resume()`, `backend_name()`, `config()`, `tunables()`, `kernel_name_for_len()` methods
/// - `Default`, `Checksum` and `KernelIntrospect` implementations
///
/// # Arguments
///
/// - `$name`: The type name (e.g., `Crc32C`)
/// - `$poly`: The polynomial marker type (e.g., `Castagnoli`)
macro_rules! define_crc32_type {
  (
    $(#[$outer:meta])*
    $vis:vis struct $name:ident {
      poly: $poly:ty,
    }
  ) => {
    $(#[$outer])*
    #[derive(Clone, Debug, PartialEq, Eq)]
    $vis struct $name {
      state: u32,
      initial: u32,
    }

    impl $name {
      /// Create a hasher that continues from a previously finalized value.
      ///
      /// Equivalent to `with_initial(prev.unfinalize())`.
      #[inline]
      #[must_use]
      pub const fn resume(prev: $crate::Checksum32) -> Self {
        let raw = prev.unfinalize().get();
        Self { state: raw, initial: raw }
      }

      /// Get the name of the kernel used for large inputs on this machine.
      #[must_use]
      pub fn backend_name() -> &'static str {
        $crate::crc32::backend_name::<$poly>()
      }

      /// Get the effective CRC-32 configuration (overrides + thresholds).
      #[must_use]
      pub fn config() -> $crate::crc32::Crc32Config {
        $crate::crc32::config::get()
      }

      /// Convenience accessor for the active CRC-32 tunables.
      #[must_use]
      pub fn tunables() -> $crate::crc32::Crc32Tunables {
        Self::config().tunables
      }

      /// Returns the kernel name that the selector would choose for `len`.
      ///
      /// This is intended for debugging/benchmarking and does not allocate.
      #[must_use]
      pub fn kernel_name_for_len(len: usize) -> &'static str {
        $crate::crc32::selected_kernel_name::<$poly>(len)
      }

      /// Full selection record for an update of `len` bytes.
      #[cfg(feature = "diag")]
      #[must_use]
      pub fn selection_diag(len: usize) -> $crate::diag::Crc32SelectionDiag {
        $crate::crc32::diag::<$poly>(len)
      }
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        <Self as $crate::Checksum>::new()
      }
    }

    impl $crate::Checksum for $name {
      const OUTPUT_SIZE: usize = 4;
      type Output = $crate::Checksum32;

      #[inline]
      fn new() -> Self {
        Self { state: !0, initial: !0 }
      }

      #[inline]
      fn with_initial(initial: $crate::Checksum32) -> Self {
        Self { state: initial.get(), initial: initial.get() }
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        self.state = $crate::crc32::update_raw::<$poly>(self.state, data);
      }

      #[inline]
      fn finalize(&self) -> $crate::Checksum32 {
        $crate::Checksum32::new(self.state ^ !0)
      }

      #[inline]
      fn reset(&mut self) {
        self.state = self.initial;
      }
    }

    impl $crate::introspect::KernelIntrospect for $name {
      fn kernel_name_for_len(len: usize) -> &'static str {
        Self::kernel_name_for_len(len)
      }

      fn backend_name() -> &'static str {
        Self::backend_name()
      }
    }
  };
}
