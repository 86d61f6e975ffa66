//! Kernel dispatch introspection.
//!
//! Inspect which kernels are selected for the current platform without
//! touching the hot path.
//!
//! # Examples
//!
//! ```
//! use checksum::{Crc32C, DispatchInfo, KernelIntrospect};
//!
//! // Platform-level info
//! let info = DispatchInfo::current();
//! println!("{info}");
//!
//! // Per-algorithm kernel selection
//! println!("CRC-32C backend: {}", Crc32C::backend_name());
//! println!("CRC-32C @ 4KB: {}", Crc32C::kernel_name_for_len(4096));
//! ```

use core::fmt;

use crate::crc32::Crc32Config;

/// Information about the current dispatch configuration.
///
/// A zero-allocation snapshot of the detected CPU capabilities and the
/// active CRC-32 configuration.
///
/// # Examples
///
/// ```
/// use checksum::DispatchInfo;
///
/// let info = DispatchInfo::current();
/// println!("{info}");
/// // Example output: "Caps(x86_64, [sse4.2]) crc32c>=128 small<16 force=auto"
/// ```
#[derive(Clone, Copy)]
pub struct DispatchInfo {
  platform: platform::Description,
  config: Crc32Config,
}

impl DispatchInfo {
  /// Returns dispatch info for the current platform.
  ///
  /// Detection and configuration are cached after first use, so this is
  /// essentially free.
  #[inline]
  #[must_use]
  pub fn current() -> Self {
    Self {
      platform: platform::describe(),
      config: crate::crc32::config::get(),
    }
  }

  /// Returns the platform description (architecture, features, override).
  #[inline]
  #[must_use]
  pub fn platform(&self) -> platform::Description {
    self.platform
  }

  /// Returns the CRC-32 configuration in effect.
  #[inline]
  #[must_use]
  pub fn config(&self) -> Crc32Config {
    self.config
  }

  /// Whether CRC-32C can use hardware instructions.
  #[inline]
  #[must_use]
  pub fn has_hardware_crc32c(&self) -> bool {
    self.platform.caps.has_hwcrc32c()
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let t = &self.config.tunables;
    write!(
      f,
      "{} crc32c>={} small<{} force={}",
      self.platform,
      t.portable_to_hwcrc,
      t.small_threshold,
      self.config.effective_force.as_str()
    )
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("platform", &format_args!("{}", self.platform))
      .field("config", &self.config)
      .finish()
  }
}

/// Returns the kernel name selected for a specific algorithm and buffer size.
///
/// Useful for verifying size-based kernel transitions.
///
/// # Examples
///
/// ```
/// use checksum::{Crc32, kernel_for};
///
/// assert_eq!(kernel_for::<Crc32>(8), "portable/bytewise");
/// assert_eq!(kernel_for::<Crc32>(65536), "portable/slice16x4");
/// ```
#[inline]
#[must_use]
pub fn kernel_for<T: KernelIntrospect>(len: usize) -> &'static str {
  T::kernel_name_for_len(len)
}

/// Trait for types that support kernel introspection.
///
/// Implemented for [`Crc32`](crate::Crc32) and [`Crc32C`](crate::Crc32C).
pub trait KernelIntrospect {
  /// Returns the kernel name that would be selected for a buffer of `len` bytes.
  ///
  /// For example `"portable/bytewise"`, `"portable/slice16x4"`,
  /// `"x86_64/sse4.2"` or `"aarch64/crc"`.
  fn kernel_name_for_len(len: usize) -> &'static str;

  /// Returns the kernel used for large buffers.
  fn backend_name() -> &'static str;
}
