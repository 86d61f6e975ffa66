//! Direct access to individual CRC-32 kernels.
//!
//! [`crc32`](crate::crc32()) and [`crc32c`](crate::crc32c()) dispatch
//! automatically. The functions here bypass the selection policy and run one
//! specific kernel, for benchmarking and cross-checking. Every kernel is
//! bit-identical to every other for the same polynomial, input and seed.
//!
//! ```
//! use checksum::{
//!   Castagnoli, Checksum32, Prefetch,
//!   engine::{self, SliceWidth},
//! };
//!
//! let data = b"123456789";
//! let a = engine::bytewise::<Castagnoli>(data, Checksum32::INITIAL);
//! let b = engine::sliced::<Castagnoli, 4>(SliceWidth::Sixteen, data, Checksum32::INITIAL, Prefetch::Enabled);
//! assert_eq!(a, b);
//! assert_eq!(a, Checksum32::new(0xE306_9283));
//! ```

use crate::{
  Checksum32,
  crc32::{Polynomial, Prefetch, hwcrc_raw, portable},
};

/// Number of bytes folded per slice-by-N step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SliceWidth {
  /// Slice-by-8.
  Eight,
  /// Slice-by-16.
  Sixteen,
}

impl SliceWidth {
  /// Bytes per block.
  #[must_use]
  pub const fn bytes(self) -> usize {
    match self {
      Self::Eight => 8,
      Self::Sixteen => 16,
    }
  }
}

/// Byte-at-a-time CRC of `data` seeded with the raw register `initial`.
#[inline]
#[must_use]
pub fn bytewise<P: Polynomial>(data: &[u8], initial: Checksum32) -> Checksum32 {
  Checksum32::new(portable::bytewise(initial.get(), data, P::table()) ^ !0)
}

/// Slice-by-`width` CRC of `data`, folding `UNROLL` blocks per step.
///
/// `UNROLL` must be at least 1 (checked at compile time).
#[inline]
#[must_use]
pub fn sliced<P: Polynomial, const UNROLL: usize>(
  width: SliceWidth,
  data: &[u8],
  initial: Checksum32,
  prefetch: Prefetch,
) -> Checksum32 {
  let raw = match width {
    SliceWidth::Eight => portable::slice8::<UNROLL>(initial.get(), data, P::slice8(), prefetch),
    SliceWidth::Sixteen => portable::slice16::<UNROLL>(initial.get(), data, P::slice16(), prefetch),
  };
  Checksum32::new(raw ^ !0)
}

/// CRC-32C of `data` on the hardware CRC instructions.
///
/// Returns `None` when the current capabilities (detection or override) do
/// not include hardware CRC-32C.
#[inline]
#[must_use]
pub fn hardware_crc32c(data: &[u8], initial: Checksum32) -> Option<Checksum32> {
  hwcrc_raw(initial.get(), data, platform::caps()).map(|raw| Checksum32::new(raw ^ !0))
}

/// Run the portable fallback the dispatcher uses for `P` on inputs past the
/// small threshold (slice-by-16, unroll 4, prefetch on).
#[inline]
#[must_use]
pub fn portable_default<P: Polynomial>(data: &[u8], initial: Checksum32) -> Checksum32 {
  sliced::<P, 4>(SliceWidth::Sixteen, data, initial, Prefetch::Enabled)
}

/// Whether [`hardware_crc32c`] would run on this machine right now.
#[inline]
#[must_use]
pub fn hardware_crc32c_available() -> bool {
  platform::caps().has_hwcrc32c()
}
