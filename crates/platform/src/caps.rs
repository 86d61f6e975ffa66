//! CPU capability representation.
//!
//! Answers one question: "Which checksum instructions can I legally run on
//! this machine?"
//!
//! # Bit Layout
//!
//! [`Caps`] is a 64-bit bitset.
//!
//! - Bits 0-31: x86/x86_64 features
//! - Bits 32-63: aarch64 features
//!
//! # Usage
//!
//! ```
//! use platform::caps::{Caps, x86};
//!
//! let c = Caps::NONE | x86::SSE42;
//! assert!(c.has(x86::SSE42));
//! assert!(c.has(Caps::HWCRC32C) == cfg!(target_arch = "x86_64"));
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`. Use [`has()`](Caps::has) to check if
/// required features are available.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Features required by the hardware CRC-32C kernel on this target.
  ///
  /// Empty on architectures without one, in which case nothing ever `has` it:
  /// see [`has_hwcrc32c`](Caps::has_hwcrc32c).
  pub const HWCRC32C: Self = {
    #[cfg(target_arch = "x86_64")]
    {
      x86::SSE42
    }
    #[cfg(target_arch = "aarch64")]
    {
      aarch64::CRC
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
      Self::NONE
    }
  };

  /// Rebuild a set from its raw word (as returned by [`bits`](Caps::bits)).
  #[inline]
  #[must_use]
  pub const fn from_bits(bits: u64) -> Self {
    Self(bits)
  }

  /// The raw word backing this set.
  #[inline]
  #[must_use]
  pub const fn bits(self) -> u64 {
    self.0
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Whether the hardware CRC-32C kernel may run.
  ///
  /// False on targets without a hardware kernel, even though the empty
  /// requirement set is trivially satisfied.
  #[inline]
  #[must_use]
  pub const fn has_hwcrc32c(self) -> bool {
    !Self::HWCRC32C.is_empty() && self.has(Self::HWCRC32C)
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  /// Features in `self` but not in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    assert!(bit < 64, "capability bit out of range");
    Self(1u64 << bit)
  }

  /// Check if a specific bit is set.
  #[inline]
  #[must_use]
  pub const fn has_bit(self, bit: u8) -> bool {
    bit < 64 && (self.0 & (1u64 << bit)) != 0
  }

  /// Returns an iterator over the names of all set feature bits.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    FEATURES
      .iter()
      .filter_map(move |&(bit, name)| if self.has_bit(bit) { Some(name) } else { None })
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "x86")]
    {
      Self::X86
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature Bits
// ─────────────────────────────────────────────────────────────────────────────

/// x86/x86_64 CPU features.
pub mod x86 {
  use super::Caps;

  /// Carries the `crc32` instruction (Castagnoli polynomial).
  pub const SSE42: Caps = Caps::bit(1);
}

/// aarch64 CPU features.
pub mod aarch64 {
  use super::Caps;

  /// `crc32c{b,h,w,x}` instructions.
  pub const CRC: Caps = Caps::bit(33);
}

type FeatureEntry = (u8, &'static str);

const FEATURES: &[FeatureEntry] = &[(1, "sse4.2"), (33, "crc")];

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "Caps({}", Arch::current())?;

    let mut iter = self.feature_names().peekable();
    if iter.peek().is_none() {
      return f.write_str(", none)");
    }
    f.write_str(", [")?;
    for (i, name) in iter.enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      f.write_str(name)?;
    }
    f.write_str("])")
  }
}

impl core::fmt::Display for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(self, f)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, vec::Vec};

  use super::*;

  #[test]
  fn basic_set_ops() {
    let empty = Caps::NONE;
    assert!(empty.is_empty());
    assert_eq!(empty.count(), 0);

    let both = x86::SSE42 | aarch64::CRC;
    assert_eq!(both.count(), 2);
    assert!(both.has(x86::SSE42));
    assert!(!x86::SSE42.has(both));
    assert_eq!(both & x86::SSE42, x86::SSE42);
    assert_eq!(both.difference(aarch64::CRC), x86::SSE42);

    let mut acc = Caps::NONE;
    acc |= aarch64::CRC;
    assert!(acc.has_bit(33));
    assert!(!acc.has_bit(32));
    assert!(!acc.has_bit(200));
  }

  #[test]
  fn bits_roundtrip() {
    let c = x86::SSE42 | aarch64::CRC;
    assert_eq!(Caps::from_bits(c.bits()), c);
  }

  #[test]
  fn empty_never_has_hwcrc32c() {
    assert!(!Caps::NONE.has_hwcrc32c());
  }

  #[test]
  #[cfg(target_arch = "x86_64")]
  fn hwcrc32c_needs_sse42_on_x86_64() {
    assert!(x86::SSE42.has_hwcrc32c());
    assert!(!Caps::bit(0).has_hwcrc32c());
    assert!(!aarch64::CRC.has_hwcrc32c());
  }

  #[test]
  #[cfg(target_arch = "aarch64")]
  fn hwcrc32c_needs_crc_on_aarch64() {
    assert!(aarch64::CRC.has_hwcrc32c());
    assert!(!Caps::bit(32).has_hwcrc32c());
    assert!(!x86::SSE42.has_hwcrc32c());
  }

  #[test]
  fn feature_names_in_bit_order() {
    let names: Vec<_> = (aarch64::CRC | x86::SSE42).feature_names().collect();
    assert_eq!(names, ["sse4.2", "crc"]);
  }

  #[test]
  fn debug_lists_features() {
    let arch = Arch::current();
    assert_eq!(format!("{:?}", Caps::NONE), format!("Caps({arch}, none)"));
    assert_eq!(format!("{}", x86::SSE42), format!("Caps({arch}, [sse4.2])"));
  }
}
