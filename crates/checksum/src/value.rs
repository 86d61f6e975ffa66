//! Checksum value types.
//!
//! [`Checksum32`] and [`Checksum64`] wrap a finished checksum so that it cannot
//! be confused with an arbitrary integer. Conversions are explicit
//! ([`new`](Checksum32::new) / [`get`](Checksum32::get) / `From`), and the
//! handful of bit operations protocols apply to checksums (XOR against a
//! mask, shifts, complement) yield plain integers.
//!
//! The two widths are distinct types and never mix. A value carries no record
//! of the polynomial that produced it.
//!
//! # Examples
//!
//! ```
//! use checksum::Checksum32;
//!
//! let c = Checksum32::new(0xABC);
//! assert_eq!(c.to_string(), "0x00000ABC");
//! assert_eq!("0x00000abc".parse::<Checksum32>(), Ok(c));
//! assert_eq!(c ^ 0xFFFF_FFFF, 0xFFFF_F543);
//! assert_eq!(!c, 0xFFFF_F543);
//! ```
//!
//! Checksums have no ordering:
//!
//! ```compile_fail
//! use checksum::Checksum32;
//!
//! let _ = Checksum32::new(1) < Checksum32::new(2);
//! ```

use core::{fmt, str::FromStr};

use traits::ParseChecksumError;

macro_rules! define_checksum_value {
  (
    $(#[$outer:meta])*
    $vis:vis struct $name:ident($int:ty) {
      digits: $digits:expr,
    }
  ) => {
    $(#[$outer])*
    #[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    $vis struct $name($int);

    impl $name {
      /// All ones: the register seed for a fresh computation.
      pub const INITIAL: Self = Self(!0);

      /// Hex digits in the canonical rendering.
      pub const HEX_DIGITS: usize = $digits;

      #[inline]
      #[must_use]
      pub const fn new(value: $int) -> Self {
        Self(value)
      }

      #[inline]
      #[must_use]
      pub const fn get(self) -> $int {
        self.0
      }

      /// Undo the final XOR, giving the register seed that continues the
      /// stream this value finished.
      #[inline]
      #[must_use]
      pub const fn unfinalize(self) -> Self {
        Self(self.0 ^ !0)
      }
    }

    impl From<$name> for $int {
      #[inline]
      fn from(value: $name) -> Self {
        value.0
      }
    }

    impl core::ops::BitXor<$int> for $name {
      type Output = $int;

      #[inline]
      fn bitxor(self, rhs: $int) -> $int {
        self.0 ^ rhs
      }
    }

    impl core::ops::BitXor<$name> for $int {
      type Output = $int;

      #[inline]
      fn bitxor(self, rhs: $name) -> $int {
        self ^ rhs.0
      }
    }

    impl core::ops::Shl<u32> for $name {
      type Output = $int;

      #[inline]
      fn shl(self, rhs: u32) -> $int {
        self.0 << rhs
      }
    }

    impl core::ops::Shr<u32> for $name {
      type Output = $int;

      #[inline]
      fn shr(self, rhs: u32) -> $int {
        self.0 >> rhs
      }
    }

    impl core::ops::Not for $name {
      type Output = $int;

      #[inline]
      fn not(self) -> $int {
        !self.0
      }
    }

    /// `0x` and zero-padded uppercase hex. Width, fill and alignment apply to
    /// the whole rendering.
    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 2 + $digits];
        for (i, slot) in buf.iter_mut().enumerate() {
          *slot = match i {
            0 => b'0',
            1 => b'x',
            _ => {
              let shift = 4 * ($digits + 1 - i);
              let nibble = ((self.0 >> shift) & 0xF) as u8;
              if nibble < 10 { b'0' + nibble } else { b'A' + nibble - 10 }
            }
          };
        }
        f.pad(core::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
      }
    }

    impl fmt::Debug for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, concat!(stringify!($name), "({})"), self)
      }
    }

    impl fmt::UpperHex for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
      }
    }

    impl fmt::LowerHex for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
      }
    }

    impl FromStr for $name {
      type Err = ParseChecksumError;

      /// Parse the `Display` rendering: `0x` followed by exactly
      #[doc = concat!(stringify!($digits), " hex digits.")]
      fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = ParseChecksumError::parse_hex(s, $digits)?;
        // parse_hex consumed exactly $digits nibbles, so the value fits.
        Ok(Self(value as $int))
      }
    }
  };
}

define_checksum_value! {
  /// A finished 32-bit checksum (CRC-32, CRC-32C).
  pub struct Checksum32(u32) {
    digits: 8,
  }
}

define_checksum_value! {
  /// A 64-bit checksum value.
  ///
  /// Declared for callers that store 64-bit checksums alongside 32-bit ones;
  /// no 64-bit CRC is computed by this crate.
  pub struct Checksum64(u64) {
    digits: 16,
  }
}
