//! Error types for checksum operations.
//!
//! Checksum computation itself cannot fail. The errors here cover the two
//! places where a caller hands us something to compare or decode.

use core::fmt;

/// Checksum verification failed.
///
/// Returned by [`Checksum::verify`](crate::Checksum::verify) when the computed
/// checksum differs from the expected one. Carries no detail: the caller
/// already holds both values.
///
/// # Examples
///
/// ```
/// use traits::VerificationError;
///
/// fn verify(computed: u32, expected: u32) -> Result<(), VerificationError> {
///   if computed == expected {
///     Ok(())
///   } else {
///     Err(VerificationError::new())
///   }
/// }
///
/// assert!(verify(0xCBF4_3926, 0xE306_9283).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  /// Create a new verification error.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for VerificationError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for VerificationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("checksum mismatch")
  }
}

impl core::error::Error for VerificationError {}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Why a checksum rendering was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParseChecksumErrorKind {
  /// The input does not start with `0x` or `0X`.
  MissingPrefix,
  /// Wrong number of hex digits after the prefix.
  InvalidLength {
    /// Digits required for the value width.
    expected: usize,
    /// Digits present in the input.
    found: usize,
  },
  /// A non-hex character, at its byte offset in the input.
  InvalidDigit {
    /// Byte offset (including the prefix).
    index: usize,
  },
}

/// A textual checksum (e.g. `"0x00000ABC"`) could not be parsed.
///
/// The accepted grammar is exactly what `Display` produces: a `0x` prefix
/// followed by a fixed number of hex digits. Either case is accepted for the
/// prefix and the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseChecksumError {
  kind: ParseChecksumErrorKind,
}

impl ParseChecksumError {
  /// Create a parse error of the given kind.
  #[inline]
  #[must_use]
  pub const fn new(kind: ParseChecksumErrorKind) -> Self {
    Self { kind }
  }

  /// What went wrong.
  #[inline]
  #[must_use]
  pub const fn kind(&self) -> ParseChecksumErrorKind {
    self.kind
  }

  /// Parse a `0x`-prefixed, fixed-width hex string into a `u64`.
  ///
  /// `digits` is the exact number of hex digits required (8 for a 32-bit
  /// checksum, 16 for a 64-bit one). Shared by every checksum value type.
  ///
  /// # Errors
  ///
  /// See [`ParseChecksumErrorKind`].
  pub fn parse_hex(s: &str, digits: usize) -> Result<u64, Self> {
    let bytes = s.as_bytes();
    let body = match bytes {
      [b'0', b'x' | b'X', rest @ ..] => rest,
      _ => return Err(Self::new(ParseChecksumErrorKind::MissingPrefix)),
    };

    if body.len() != digits {
      return Err(Self::new(ParseChecksumErrorKind::InvalidLength {
        expected: digits,
        found: body.len(),
      }));
    }

    let mut value: u64 = 0;
    for (i, &b) in body.iter().enumerate() {
      let nibble = match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => return Err(Self::new(ParseChecksumErrorKind::InvalidDigit { index: i + 2 })),
      };
      value = (value << 4) | u64::from(nibble);
    }
    Ok(value)
  }
}

impl fmt::Display for ParseChecksumError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      ParseChecksumErrorKind::MissingPrefix => f.write_str("checksum must start with `0x`"),
      ParseChecksumErrorKind::InvalidLength { expected, found } => {
        write!(f, "checksum must have {expected} hex digits, found {found}")
      }
      ParseChecksumErrorKind::InvalidDigit { index } => write!(f, "invalid hex digit at offset {index}"),
    }
  }
}

impl core::error::Error for ParseChecksumError {}
