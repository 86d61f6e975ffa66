//! CRC-32 implementations.
//!
//! This module provides:
//! - [`Crc32`] - CRC-32 IEEE (Ethernet, ZIP, PNG)
//! - [`Crc32C`] - CRC-32C Castagnoli (iSCSI, ext4, Btrfs)
//! - [`crc32`] / [`crc32c`] - one-shot functions with an explicit seed
//!
//! # Hardware Acceleration
//!
//! CRC-32C uses hardware instructions for inputs of at least
//! [`Crc32Tunables::portable_to_hwcrc`] bytes when available:
//! - x86_64: SSE4.2 `crc32`
//! - aarch64: CRC32 extension
//!
//! Everything else runs the portable slice-by-16 kernel, or the
//! byte-at-a-time kernel for tiny inputs. All paths are bit-identical.

pub(crate) mod config;
pub(crate) mod policy;
pub(crate) mod portable;

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
mod aarch64;


pub use config::{Crc32Config, Crc32Force, Crc32Tunables};
use platform::Caps;
pub use policy::{Crc32Variant, Kernel, Selection, SelectionReason};
pub use portable::Prefetch;

use crate::{
  Checksum32,
  common::tables::{CRC32_IEEE_POLY, CRC32C_POLY, crc32_slice_tables, crc32_table},
};

// ─────────────────────────────────────────────────────────────────────────────
// Polynomials
// ─────────────────────────────────────────────────────────────────────────────

mod sealed {
  pub trait Sealed {}
}

/// A reflected CRC-32 polynomial together with its own lookup tables.
///
/// Implemented by [`Ieee`] and [`Castagnoli`] only. Each implementor owns
/// separate table statics, so two polynomials never share state.
pub trait Polynomial: sealed::Sealed + Copy + Default + core::fmt::Debug + Send + Sync + 'static {
  /// Reflected generator polynomial.
  const REFLECTED: u32;
  /// Short algorithm name.
  const NAME: &'static str;
  /// Variant tag used by the selection policy.
  const VARIANT: Crc32Variant;

  /// Byte-at-a-time table.
  fn table() -> &'static [u32; 256];
  /// Slice-by-8 table set.
  fn slice8() -> &'static [[u32; 256]; 8];
  /// Slice-by-16 table set.
  fn slice16() -> &'static [[u32; 256]; 16];
}

/// CRC-32 IEEE 802.3 polynomial (`0xEDB88320` reflected).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ieee;

/// CRC-32C Castagnoli polynomial (`0x82F63B78` reflected).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Castagnoli;

macro_rules! impl_polynomial {
  ($marker:ident, $poly:expr, $variant:expr, $table:ident, $t8:ident, $t16:ident) => {
    static $table: [u32; 256] = crc32_table($poly);
    static $t8: [[u32; 256]; 8] = crc32_slice_tables::<8>($poly);
    static $t16: [[u32; 256]; 16] = crc32_slice_tables::<16>($poly);

    impl sealed::Sealed for $marker {}

    impl Polynomial for $marker {
      const REFLECTED: u32 = $poly;
      const NAME: &'static str = $variant.name();
      const VARIANT: Crc32Variant = $variant;

      #[inline(always)]
      fn table() -> &'static [u32; 256] {
        &$table
      }

      #[inline(always)]
      fn slice8() -> &'static [[u32; 256]; 8] {
        &$t8
      }

      #[inline(always)]
      fn slice16() -> &'static [[u32; 256]; 16] {
        &$t16
      }
    }
  };
}

impl_polynomial!(Ieee, CRC32_IEEE_POLY, Crc32Variant::Ieee, IEEE_TABLE, IEEE_TABLES_8, IEEE_TABLES_16);
impl_polynomial!(
  Castagnoli,
  CRC32C_POLY,
  Crc32Variant::Castagnoli,
  CASTAGNOLI_TABLE,
  CASTAGNOLI_TABLES_8,
  CASTAGNOLI_TABLES_16
);

// ─────────────────────────────────────────────────────────────────────────────
// Hardware
// ─────────────────────────────────────────────────────────────────────────────

/// Whether the hardware CRC-32C path is compiled in unconditionally
/// (`-C target-feature=+sse4.2` on x86_64, `+crc` on aarch64).
///
/// Runtime detection may still enable the path when this is `false`.
pub const HAS_HARDWARE_CRC32C: bool = platform::caps_static().has_hwcrc32c();

/// Run the hardware CRC-32C kernel on the raw register, if `caps` allows.
#[inline]
#[allow(unused_variables)]
pub(crate) fn hwcrc_raw(crc: u32, data: &[u8], caps: Caps) -> Option<u32> {
  #[cfg(target_arch = "x86_64")]
  {
    x86_64::compute(crc, data, caps)
  }
  #[cfg(target_arch = "aarch64")]
  {
    aarch64::compute(crc, data, caps)
  }
  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    None
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Run `kernel` on the raw register.
///
/// A hardware selection that cannot run (capabilities withdrawn by an
/// override) falls back to the sliced kernel.
#[inline]
pub(crate) fn run_kernel<P: Polynomial>(kernel: Kernel, crc: u32, data: &[u8], caps: Caps) -> u32 {
  match kernel {
    Kernel::Bytewise => portable::bytewise(crc, data, P::table()),
    Kernel::Slice16x4 => portable::slice16::<4>(crc, data, P::slice16(), Prefetch::Enabled),
    Kernel::Hwcrc => match P::VARIANT {
      Crc32Variant::Castagnoli => hwcrc_raw(crc, data, caps)
        .unwrap_or_else(|| portable::slice16::<4>(crc, data, P::slice16(), Prefetch::Enabled)),
      Crc32Variant::Ieee => portable::slice16::<4>(crc, data, P::slice16(), Prefetch::Enabled),
    },
  }
}

/// Selection for one update of `len` bytes under the current platform and
/// configuration.
#[inline]
#[must_use]
pub(crate) fn selection_for<P: Polynomial>(len: usize, caps: Caps, cfg: &Crc32Config) -> Selection {
  policy::select(P::VARIANT, len, caps.has_hwcrc32c(), &cfg.tunables, cfg.effective_force)
}

/// Update the raw register with the dispatched kernel.
#[inline]
pub(crate) fn update_raw<P: Polynomial>(crc: u32, data: &[u8]) -> u32 {
  let caps = platform::caps();
  let cfg = config::for_caps(caps);
  let selection = selection_for::<P>(data.len(), caps, &cfg);
  run_kernel::<P>(selection.kernel, crc, data, caps)
}

/// Kernel name the selector would choose for `len`.
#[must_use]
pub(crate) fn selected_kernel_name<P: Polynomial>(len: usize) -> &'static str {
  let caps = platform::caps();
  selection_for::<P>(len, caps, &config::for_caps(caps)).kernel.name()
}

/// Name of the fastest kernel this platform can run for `P` (large inputs).
#[must_use]
pub(crate) fn backend_name<P: Polynomial>() -> &'static str {
  selected_kernel_name::<P>(usize::MAX)
}

#[cfg(feature = "diag")]
pub(crate) fn diag<P: Polynomial>(len: usize) -> crate::diag::Crc32SelectionDiag {
  let caps = platform::caps();
  let cfg = config::for_caps(caps);
  let selection = selection_for::<P>(len, caps, &cfg);
  crate::diag::Crc32SelectionDiag {
    variant: P::VARIANT,
    len,
    reason: selection.reason,
    requested_force: cfg.requested_force,
    effective_force: cfg.effective_force,
    selected_kernel: selection.kernel.name(),
    small_threshold: cfg.tunables.small_threshold,
    portable_to_hwcrc: cfg.tunables.portable_to_hwcrc,
    has_hwcrc: caps.has_hwcrc32c(),
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot API
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 (IEEE) of `data`, seeded with the raw register `initial`.
///
/// Pass [`Checksum32::INITIAL`] for a fresh computation, or
/// `previous.unfinalize()` to continue one.
///
/// ```
/// use checksum::{Checksum32, crc32};
///
/// let whole = crc32(b"123456789", Checksum32::INITIAL);
/// assert_eq!(whole, Checksum32::new(0xCBF4_3926));
///
/// let head = crc32(b"1234", Checksum32::INITIAL);
/// assert_eq!(crc32(b"56789", head.unfinalize()), whole);
/// ```
#[inline]
#[must_use]
pub fn crc32(data: &[u8], initial: Checksum32) -> Checksum32 {
  Checksum32::new(update_raw::<Ieee>(initial.get(), data) ^ !0)
}

/// CRC-32C (Castagnoli) of `data`, seeded with the raw register `initial`.
///
/// ```
/// use checksum::{Checksum32, crc32c};
///
/// assert_eq!(crc32c(b"123456789", Checksum32::INITIAL), Checksum32::new(0xE306_9283));
/// ```
#[inline]
#[must_use]
pub fn crc32c(data: &[u8], initial: Checksum32) -> Checksum32 {
  Checksum32::new(update_raw::<Castagnoli>(initial.get(), data) ^ !0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Streaming types
// ─────────────────────────────────────────────────────────────────────────────

define_crc32_type! {
  /// CRC-32 (IEEE) checksum.
  ///
  /// - **Polynomial**: 0x04C11DB7 (normal), 0xEDB88320 (reflected)
  /// - **Initial value**: 0xFFFFFFFF
  /// - **Final XOR**: 0xFFFFFFFF
  /// - **Reflect input/output**: Yes
  ///
  /// # Example
  ///
  /// ```
  /// use checksum::{Checksum, Checksum32, Crc32};
  ///
  /// let crc = Crc32::checksum(b"123456789");
  /// assert_eq!(crc, Checksum32::new(0xCBF4_3926));
  /// ```
  pub struct Crc32 {
    poly: Ieee,
  }
}

define_crc32_type! {
  /// CRC-32C (Castagnoli) checksum.
  ///
  /// - **Polynomial**: 0x1EDC6F41 (normal), 0x82F63B78 (reflected)
  /// - **Initial value**: 0xFFFFFFFF
  /// - **Final XOR**: 0xFFFFFFFF
  /// - **Reflect input/output**: Yes
  ///
  /// # Example
  ///
  /// ```
  /// use checksum::{Checksum, Checksum32, Crc32C};
  ///
  /// let mut hasher = Crc32C::new();
  /// hasher.update(b"1234");
  /// hasher.update(b"56789");
  /// assert_eq!(hasher.finalize(), Checksum32::new(0xE306_9283));
  /// ```
  pub struct Crc32C {
    poly: Castagnoli,
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use traits::Checksum;

  use super::*;
  use crate::common::{reference::crc32_bitwise, tests::CrcTestHarness};

  const TEST_DATA: &[u8] = b"123456789";

  #[test]
  fn check_values() {
    assert_eq!(Crc32::checksum(TEST_DATA).get(), 0xCBF4_3926);
    assert_eq!(Crc32C::checksum(TEST_DATA).get(), 0xE306_9283);
    assert_eq!(crc32(TEST_DATA, Checksum32::INITIAL).get(), 0xCBF4_3926);
    assert_eq!(crc32c(TEST_DATA, Checksum32::INITIAL).get(), 0xE306_9283);
  }

  #[test]
  fn empty_returns_finalized_initial() {
    assert_eq!(crc32(&[], Checksum32::INITIAL), Checksum32::new(0));
    assert_eq!(crc32c(&[], Checksum32::INITIAL), Checksum32::new(0));
    assert_eq!(crc32(&[], Checksum32::new(0x1234_5678)).get(), 0x1234_5678 ^ !0);
  }

  #[test]
  fn tables_belong_to_their_polynomial() {
    assert_eq!(Ieee::table()[128], Ieee::REFLECTED);
    assert_eq!(Castagnoli::table()[128], Castagnoli::REFLECTED);
    assert_eq!(&Ieee::slice16()[0], Ieee::table());
    assert_eq!(Castagnoli::slice8()[..], Castagnoli::slice16()[..8]);
  }

  #[test]
  fn every_kernel_matches_reference() {
    let data: Vec<u8> = (0..2048u32).map(|i| (i * 7 + (i >> 3)) as u8).collect();
    let caps = platform::caps();
    for len in [0usize, 1, 15, 16, 17, 127, 128, 129, 1000, 2048] {
      let input = &data[..len];
      for kernel in [Kernel::Bytewise, Kernel::Slice16x4, Kernel::Hwcrc] {
        assert_eq!(
          run_kernel::<Ieee>(kernel, !0, input, caps),
          crc32_bitwise(CRC32_IEEE_POLY, !0, input),
          "ieee {kernel:?} len {len}"
        );
        assert_eq!(
          run_kernel::<Castagnoli>(kernel, !0, input, caps),
          crc32_bitwise(CRC32C_POLY, !0, input),
          "castagnoli {kernel:?} len {len}"
        );
      }
    }
  }

  #[test]
  fn hwcrc_without_caps_falls_back() {
    let data = [0xA5u8; 300];
    assert_eq!(
      run_kernel::<Castagnoli>(Kernel::Hwcrc, !0, &data, Caps::NONE),
      crc32_bitwise(CRC32C_POLY, !0, &data)
    );
  }

  #[test]
  fn resume_continues_stream() {
    let (a, b) = TEST_DATA.split_at(4);
    let mut hasher = Crc32C::resume(Crc32C::checksum(a));
    hasher.update(b);
    assert_eq!(hasher.finalize(), Crc32C::checksum(TEST_DATA));
  }

  #[test]
  fn reset_restores_construction_seed() {
    let seed = Crc32::checksum(b"1234").unfinalize();
    let mut hasher = Crc32::with_initial(seed);
    hasher.update(b"garbage");
    hasher.reset();
    hasher.update(b"56789");
    assert_eq!(hasher.finalize(), Crc32::checksum(TEST_DATA));
  }

  #[test]
  fn verify() {
    assert_eq!(Crc32::verify(TEST_DATA, Checksum32::new(0xCBF4_3926)), Ok(()));
    assert!(Crc32C::verify(TEST_DATA, Checksum32::new(0xCBF4_3926)).is_err());
  }

  #[test]
  fn harness_crc32() {
    CrcTestHarness::<Crc32>::run_all_tests();
  }

  #[test]
  fn harness_crc32c() {
    CrcTestHarness::<Crc32C>::run_all_tests();
  }

  #[test]
  fn introspection_names_are_known() {
    let known = ["portable/bytewise", "portable/slice16x4", Kernel::Hwcrc.name()];
    assert!(known.contains(&Crc32::backend_name()));
    assert!(known.contains(&Crc32C::backend_name()));
    assert!(known.contains(&Crc32C::kernel_name_for_len(0)));
    assert_ne!(Crc32::backend_name(), Kernel::Hwcrc.name());
  }

  #[test]
  fn hardware_flag_is_consistent() {
    if HAS_HARDWARE_CRC32C {
      assert!(platform::caps_static().has_hwcrc32c());
    }
  }
}
