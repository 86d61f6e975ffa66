//! Capability detection: compile-time features, runtime probing, overrides.
//!
//! - Compile-time features come from `cfg!(target_feature = ...)` and are
//!   always included.
//! - With `std`, runtime probing adds whatever the running CPU reports. The
//!   result is cached in a `OnceLock`.
//! - Without `std`, only compile-time features are reported.
//! - An override, when set, masks detection on every call until cleared. It
//!   can withdraw features but never add one the CPU was not found to have.
//! - Under Miri, detection reports nothing so only portable kernels run.

#[cfg(target_has_atomic = "64")]
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
use crate::caps::x86;
#[cfg(target_arch = "aarch64")]
use crate::caps::aarch64;
use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Static Detection
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities known at compile time.
///
/// Reflects `-C target-feature=...` / `-C target-cpu=...`. Evaluates to a
/// constant, so checks against it fold away.
///
/// ```
/// const CAPS: platform::Caps = platform::caps_static();
///
/// assert!(platform::caps().has(CAPS) || platform::has_override());
/// ```
#[inline(always)]
#[must_use]
pub const fn caps_static() -> Caps {
  #[allow(unused_macros)]
  macro_rules! detect {
    ($caps:ident; $($feature:literal => $cap:expr),+ $(,)?) => {
      $(if cfg!(target_feature = $feature) { $caps = $caps.union($cap); })+
    };
  }

  #[allow(unused_mut)]
  let mut result = Caps::NONE;

  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  detect!(result;
    "sse4.2" => x86::SSE42,
  );

  #[cfg(target_arch = "aarch64")]
  detect!(result;
    "crc" => aarch64::CRC,
  );

  result
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime Detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(miri)]
fn detect_uncached() -> Caps {
  Caps::NONE
}

#[cfg(not(miri))]
fn detect_uncached() -> Caps {
  #[allow(unused_mut)]
  let mut caps = caps_static();

  #[cfg(all(feature = "std", any(target_arch = "x86_64", target_arch = "x86")))]
  {
    if std::arch::is_x86_feature_detected!("sse4.2") {
      caps |= x86::SSE42;
    }
  }

  #[cfg(all(feature = "std", target_arch = "aarch64"))]
  {
    if std::arch::is_aarch64_feature_detected!("crc") {
      caps |= aarch64::CRC;
    }
  }

  caps
}

#[cfg(feature = "std")]
fn detected() -> Caps {
  static CACHE: std::sync::OnceLock<Caps> = std::sync::OnceLock::new();
  *CACHE.get_or_init(detect_uncached)
}

#[cfg(not(feature = "std"))]
#[inline]
fn detected() -> Caps {
  detect_uncached()
}

// ─────────────────────────────────────────────────────────────────────────────
// Override System
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_has_atomic = "64")]
static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
#[cfg(target_has_atomic = "64")]
static OVERRIDE_BITS: AtomicU64 = AtomicU64::new(0);

/// Mask (or with `None`, restore) detected capabilities.
///
/// The stored set is intersected with detection on every read, so features
/// the CPU lacks stay off whatever is passed here. Targets without 64-bit
/// atomics ignore the override.
#[cold]
pub fn set_caps_override(value: Option<Caps>) {
  #[cfg(target_has_atomic = "64")]
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.bits(), Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }

  #[cfg(not(target_has_atomic = "64"))]
  let _ = value;
}

#[inline]
#[must_use]
pub fn has_override() -> bool {
  #[cfg(target_has_atomic = "64")]
  {
    OVERRIDE_SET.load(Ordering::Acquire)
  }
  #[cfg(not(target_has_atomic = "64"))]
  {
    false
  }
}

#[inline]
fn override_caps() -> Option<Caps> {
  #[cfg(target_has_atomic = "64")]
  if OVERRIDE_SET.load(Ordering::Acquire) {
    return Some(Caps::from_bits(OVERRIDE_BITS.load(Ordering::Acquire)));
  }
  None
}

/// Effective capabilities: detection, masked by the override when set.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  let detected = detected();
  match override_caps() {
    Some(mask) => detected & mask,
    None => detected,
  }
}
