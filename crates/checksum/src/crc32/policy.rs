//! CRC-32 kernel selection policy.
//!
//! [`select`] is a pure function of `(variant, len, hardware flag, tunables,
//! force)`. It never looks at the data, the clock, or global state: callers
//! read capabilities and configuration once and pass them in, which makes
//! every dispatch decision reproducible in tests.
//!
//! | Variant | Condition | Kernel |
//! |---------|-----------|--------|
//! | CRC-32C | hardware and `len >= portable_to_hwcrc` | hardware |
//! | any | `len < small_threshold` | byte-at-a-time |
//! | any | otherwise | slice-by-16, unroll 4 |

use super::config::{Crc32Force, Crc32Tunables};

// ─────────────────────────────────────────────────────────────────────────────
// Crc32Variant - Distinguishes IEEE from Castagnoli
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 polynomial variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Crc32Variant {
  /// CRC-32 IEEE (Ethernet, zip, PNG)
  Ieee,
  /// CRC-32C Castagnoli (iSCSI, ext4)
  Castagnoli,
}

impl Crc32Variant {
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Ieee => "crc32",
      Self::Castagnoli => "crc32c",
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────────────────────────

/// A kernel the dispatcher can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kernel {
  /// One table, one byte per step.
  Bytewise,
  /// Slice-by-16, four blocks per step, prefetch enabled.
  Slice16x4,
  /// Hardware CRC-32C instructions.
  Hwcrc,
}

impl Kernel {
  /// Stable name for introspection and diagnostics.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Bytewise => "portable/bytewise",
      Self::Slice16x4 => "portable/slice16x4",
      Self::Hwcrc => HWCRC_KERNEL_NAME,
    }
  }
}

#[cfg(target_arch = "x86_64")]
const HWCRC_KERNEL_NAME: &str = super::x86_64::KERNEL_NAME;
#[cfg(target_arch = "aarch64")]
const HWCRC_KERNEL_NAME: &str = super::aarch64::KERNEL_NAME;
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
const HWCRC_KERNEL_NAME: &str = "hwcrc/unavailable";

/// High-level reason for a selection outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionReason {
  /// A forced mode decided the kernel.
  Forced,
  /// Below the byte-at-a-time cutoff.
  BelowSmallThreshold,
  /// Hardware is available but the input is below the hardware threshold.
  BelowHwcrcThreshold,
  /// Normal auto selection.
  Auto,
}

/// Outcome of [`select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
  pub kernel: Kernel,
  pub reason: SelectionReason,
}

impl Selection {
  const fn new(kernel: Kernel, reason: SelectionReason) -> Self {
    Self { kernel, reason }
  }
}

/// Choose the kernel for one update of `len` bytes.
///
/// `hwcrc_available` is the hardware CRC-32C capability flag. It only matters
/// for [`Crc32Variant::Castagnoli`]; IEEE never runs on hardware. A forced
/// [`Crc32Force::Hwcrc`] without the capability behaves like `Auto`.
#[must_use]
pub const fn select(
  variant: Crc32Variant,
  len: usize,
  hwcrc_available: bool,
  tunables: &Crc32Tunables,
  force: Crc32Force,
) -> Selection {
  let hw = hwcrc_available && matches!(variant, Crc32Variant::Castagnoli);

  match force {
    Crc32Force::Bytewise => return Selection::new(Kernel::Bytewise, SelectionReason::Forced),
    Crc32Force::Hwcrc if hw => return Selection::new(Kernel::Hwcrc, SelectionReason::Forced),
    _ => {}
  }

  let allow_hw = hw && !matches!(force, Crc32Force::Portable);

  if allow_hw && len >= tunables.portable_to_hwcrc {
    return Selection::new(Kernel::Hwcrc, SelectionReason::Auto);
  }
  if len < tunables.small_threshold {
    return Selection::new(Kernel::Bytewise, SelectionReason::BelowSmallThreshold);
  }

  let reason = if allow_hw {
    SelectionReason::BelowHwcrcThreshold
  } else if matches!(force, Crc32Force::Portable) {
    SelectionReason::Forced
  } else {
    SelectionReason::Auto
  };
  Selection::new(Kernel::Slice16x4, reason)
}

#[cfg(test)]
mod tests {
  use super::*;

  const T: Crc32Tunables = Crc32Tunables::DEFAULT;

  fn kernel(variant: Crc32Variant, len: usize, hw: bool, force: Crc32Force) -> Kernel {
    select(variant, len, hw, &T, force).kernel
  }

  #[test]
  fn ieee_never_hardware() {
    for len in [0, 15, 16, 127, 128, 1 << 20] {
      for force in [Crc32Force::Auto, Crc32Force::Hwcrc, Crc32Force::Portable] {
        assert_ne!(kernel(Crc32Variant::Ieee, len, true, force), Kernel::Hwcrc);
      }
    }
    assert_eq!(kernel(Crc32Variant::Ieee, 15, true, Crc32Force::Auto), Kernel::Bytewise);
    assert_eq!(kernel(Crc32Variant::Ieee, 16, true, Crc32Force::Auto), Kernel::Slice16x4);
  }

  #[test]
  fn castagnoli_auto_table() {
    use Kernel::*;
    let cases: &[(usize, bool, Kernel)] = &[
      (0, false, Bytewise),
      (15, false, Bytewise),
      (16, false, Slice16x4),
      (128, false, Slice16x4),
      (4096, false, Slice16x4),
      (0, true, Bytewise),
      (15, true, Bytewise),
      (16, true, Slice16x4),
      (127, true, Slice16x4),
      (128, true, Hwcrc),
      (4096, true, Hwcrc),
    ];
    for &(len, hw, want) in cases {
      assert_eq!(kernel(Crc32Variant::Castagnoli, len, hw, Crc32Force::Auto), want, "len {len} hw {hw}");
    }
  }

  #[test]
  fn reasons() {
    let sel = select(Crc32Variant::Castagnoli, 64, true, &T, Crc32Force::Auto);
    assert_eq!(sel.reason, SelectionReason::BelowHwcrcThreshold);
    let sel = select(Crc32Variant::Castagnoli, 3, true, &T, Crc32Force::Auto);
    assert_eq!(sel.reason, SelectionReason::BelowSmallThreshold);
    let sel = select(Crc32Variant::Ieee, 64, false, &T, Crc32Force::Auto);
    assert_eq!(sel.reason, SelectionReason::Auto);
    let sel = select(Crc32Variant::Ieee, 64, false, &T, Crc32Force::Bytewise);
    assert_eq!(sel, Selection::new(Kernel::Bytewise, SelectionReason::Forced));
  }

  #[test]
  fn forced_modes() {
    let c = Crc32Variant::Castagnoli;
    assert_eq!(kernel(c, 1 << 20, true, Crc32Force::Bytewise), Kernel::Bytewise);
    assert_eq!(kernel(c, 1 << 20, true, Crc32Force::Portable), Kernel::Slice16x4);
    assert_eq!(kernel(c, 3, true, Crc32Force::Portable), Kernel::Bytewise);
    assert_eq!(kernel(c, 0, true, Crc32Force::Hwcrc), Kernel::Hwcrc);
    assert_eq!(kernel(c, 3, true, Crc32Force::Hwcrc), Kernel::Hwcrc);
  }

  #[test]
  fn forced_hwcrc_without_capability_is_auto() {
    let c = Crc32Variant::Castagnoli;
    for len in [0, 3, 16, 128, 4096] {
      assert_eq!(
        select(c, len, false, &T, Crc32Force::Hwcrc),
        select(c, len, false, &T, Crc32Force::Auto),
        "len {len}"
      );
    }
  }

  #[test]
  fn tunables_move_boundaries() {
    let t = Crc32Tunables {
      small_threshold: 0,
      portable_to_hwcrc: 1024,
    };
    let c = Crc32Variant::Castagnoli;
    assert_eq!(select(c, 0, true, &t, Crc32Force::Auto).kernel, Kernel::Slice16x4);
    assert_eq!(select(c, 1023, true, &t, Crc32Force::Auto).kernel, Kernel::Slice16x4);
    assert_eq!(select(c, 1024, true, &t, Crc32Force::Auto).kernel, Kernel::Hwcrc);
  }

  #[test]
  fn pure_function() {
    for len in 0..300 {
      let a = select(Crc32Variant::Castagnoli, len, true, &T, Crc32Force::Auto);
      let b = select(Crc32Variant::Castagnoli, len, true, &T, Crc32Force::Auto);
      assert_eq!(a, b);
    }
  }

  #[test]
  fn kernel_names() {
    assert_eq!(Kernel::Bytewise.name(), "portable/bytewise");
    assert_eq!(Kernel::Slice16x4.name(), "portable/slice16x4");
    assert!(!Kernel::Hwcrc.name().is_empty());
  }
}
