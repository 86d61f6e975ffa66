//! CRC-32 runtime configuration (overrides + thresholds).
//!
//! This module centralizes selection knobs for CRC-32/CRC-32C:
//! - the byte-at-a-time cutoff for tiny inputs
//! - the portable to hardware-instruction threshold
//! - optional forced backend selection
//!
//! Environment overrides are read once per process (`std` only):
//!
//! | Variable | Values |
//! |----------|--------|
//! | `SLICECRC_CRC32_FORCE` | `auto`, `portable`, `bytewise`, `hwcrc` |
//! | `SLICECRC_CRC32C_HWCRC_THRESHOLD` | bytes |
//! | `SLICECRC_CRC32_SMALL_THRESHOLD` | bytes |
//!
//! Empty or unparsable values are ignored. Forced modes are always clamped to
//! detected CPU capabilities.

use platform::Caps;

/// Forced backend selection for CRC-32/CRC-32C.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Crc32Force {
  /// Use the default auto selector.
  #[default]
  Auto,
  /// Force the table-driven implementation (never hardware).
  Portable,
  /// Force byte-at-a-time processing for every length.
  Bytewise,
  /// Force hardware CRC instructions for every length (CRC-32C only).
  ///
  /// - x86_64: SSE4.2 `crc32`
  /// - aarch64: ARMv8 CRC extension
  Hwcrc,
}

impl Crc32Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Bytewise => "bytewise",
      Self::Hwcrc => "hwcrc",
    }
  }

  /// Parse a force mode name (case-insensitive, surrounding whitespace ignored).
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("scalar") || value.eq_ignore_ascii_case("table")
    {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("bytewise") || value.eq_ignore_ascii_case("byte") {
      return Some(Self::Bytewise);
    }
    if value.eq_ignore_ascii_case("hwcrc") || value.eq_ignore_ascii_case("hw") || value.eq_ignore_ascii_case("crc32c") {
      return Some(Self::Hwcrc);
    }
    None
  }
}

/// CRC-32 selection thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32Tunables {
  /// Inputs shorter than this run byte-at-a-time.
  pub small_threshold: usize,
  /// Bytes where hardware CRC-32C becomes faster than the sliced kernel.
  pub portable_to_hwcrc: usize,
}

impl Crc32Tunables {
  pub const DEFAULT: Self = Self {
    small_threshold: 16,
    portable_to_hwcrc: 128,
  };
}

impl Default for Crc32Tunables {
  #[inline]
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Full CRC-32 runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32Config {
  /// Requested force mode (env/programmatic).
  pub requested_force: Crc32Force,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: Crc32Force,
  /// Thresholds used by the selector.
  pub tunables: Crc32Tunables,
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: Crc32Force,
  small_threshold: Option<usize>,
  portable_to_hwcrc: Option<usize>,
}

#[cfg(any(feature = "std", test))]
const FORCE_VAR: &str = "SLICECRC_CRC32_FORCE";
#[cfg(any(feature = "std", test))]
const SMALL_THRESHOLD_VAR: &str = "SLICECRC_CRC32_SMALL_THRESHOLD";
#[cfg(any(feature = "std", test))]
const HWCRC_THRESHOLD_VAR: &str = "SLICECRC_CRC32C_HWCRC_THRESHOLD";

/// Build overrides from a variable lookup. Empty or unparsable values fall
/// back to the defaults.
#[cfg(any(feature = "std", test))]
fn overrides_from<F, S>(lookup: F) -> Overrides
where
  F: Fn(&str) -> Option<S>,
  S: AsRef<str>,
{
  let parse_usize = |name: &str| -> Option<usize> {
    let value = lookup(name)?;
    let value = value.as_ref().trim();
    if value.is_empty() {
      return None;
    }
    value.parse::<usize>().ok()
  };

  Overrides {
    force: lookup(FORCE_VAR)
      .and_then(|value| Crc32Force::parse(value.as_ref()))
      .unwrap_or_default(),
    small_threshold: parse_usize(SMALL_THRESHOLD_VAR),
    portable_to_hwcrc: parse_usize(HWCRC_THRESHOLD_VAR),
  }
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  overrides_from(|name| std::env::var(name).ok())
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

/// Downgrade `Hwcrc` to `Auto` when the instructions are unavailable.
#[inline]
#[must_use]
pub const fn clamp_force_to_caps(requested: Crc32Force, caps: Caps) -> Crc32Force {
  match requested {
    Crc32Force::Hwcrc if !caps.has_hwcrc32c() => Crc32Force::Auto,
    other => other,
  }
}

#[inline]
#[must_use]
fn resolve(ov: Overrides, caps: Caps) -> Crc32Config {
  let base = Crc32Tunables::DEFAULT;
  Crc32Config {
    requested_force: ov.force,
    effective_force: clamp_force_to_caps(ov.force, caps),
    tunables: Crc32Tunables {
      small_threshold: ov.small_threshold.unwrap_or(base.small_threshold),
      portable_to_hwcrc: ov.portable_to_hwcrc.unwrap_or(base.portable_to_hwcrc),
    },
  }
}

/// Get the effective CRC-32 configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> Crc32Config {
  for_caps(platform::caps())
}

/// Configuration resolved against an already-read capability set.
#[inline]
#[must_use]
pub(crate) fn for_caps(caps: Caps) -> Crc32Config {
  resolve(overrides(), caps)
}
