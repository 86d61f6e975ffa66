//! CPU capability detection for slicecrc.
//!
//! This crate is the **single source of truth** for "may the hardware CRC-32C
//! kernel run here?". Checksum dispatch asks [`caps()`] and passes the answer
//! into its selection policy as a plain flag.
//!
//! # Main Entry Point
//!
//! ```
//! let caps = platform::caps();
//! if caps.has_hwcrc32c() {
//!   // Hardware CRC-32C instructions are available.
//! }
//! ```
//!
//! # Design
//!
//! 1. **One API**: Kernels query `platform::caps()` instead of doing ad-hoc detection.
//! 2. **Zero-cost when possible**: Compile-time features are detected via `cfg!`.
//! 3. **Cached otherwise**: Runtime detection is cached in a `OnceLock` (std).
//! 4. **Maskable**: Tests can withdraw features to force portable paths.
//! 5. **Miri-safe**: Under Miri, detection reports no features.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::caps_static;

/// Get the effective CPU capabilities.
///
/// Compile-time features plus (with `std`) cached runtime detection, masked
/// by the override if one is set.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Set or clear the capabilities mask.
///
/// While set, [`caps()`] returns detection intersected with this value. It
/// can force portable fallbacks but never enables a feature the CPU was not
/// detected to have. Bare-metal targets enable hardware kernels at compile
/// time with `-C target-feature` instead.
///
/// ```
/// use platform::Caps;
///
/// platform::set_caps_override(Some(Caps::NONE));
/// assert!(!platform::caps().has_hwcrc32c());
///
/// // Asking for more than the CPU has changes nothing.
/// platform::set_caps_override(Some(Caps::HWCRC32C));
/// platform::set_caps_override(None);
/// ```
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}

/// Snapshot of the platform as seen by dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Description {
  pub arch: Arch,
  pub caps: Caps,
  pub overridden: bool,
}

/// Describe the current platform (architecture, effective caps, override state).
#[must_use]
pub fn describe() -> Description {
  Description {
    arch: Arch::current(),
    caps: caps(),
    overridden: has_override(),
  }
}

impl core::fmt::Display for Description {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "{}", self.caps)?;
    if self.overridden {
      f.write_str(" (override)")?;
    }
    Ok(())
  }
}
