//! Optional diagnostics for kernel selection.
//!
//! This module is behind `cfg(feature = "diag")` and is intended for
//! explainable/debuggable kernel selection without affecting normal builds.

use crate::crc32::{Crc32Force, Crc32Variant, SelectionReason};

/// Everything that went into one CRC-32 selection decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32SelectionDiag {
  pub variant: Crc32Variant,
  pub len: usize,
  pub reason: SelectionReason,
  pub requested_force: Crc32Force,
  pub effective_force: Crc32Force,
  pub selected_kernel: &'static str,
  pub small_threshold: usize,
  pub portable_to_hwcrc: usize,
  pub has_hwcrc: bool,
}

/// Diagnose CRC-32 (IEEE) selection for `len`.
#[inline]
#[must_use]
pub fn crc32_ieee(len: usize) -> Crc32SelectionDiag {
  crate::crc32::diag::<crate::Ieee>(len)
}

/// Diagnose CRC-32C (Castagnoli) selection for `len`.
#[inline]
#[must_use]
pub fn crc32c(len: usize) -> Crc32SelectionDiag {
  crate::crc32::diag::<crate::Castagnoli>(len)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Crc32, Crc32C};

  #[test]
  fn diag_agrees_with_introspection() {
    for len in [0, 15, 16, 128, 1 << 16] {
      assert_eq!(crc32_ieee(len).selected_kernel, Crc32::kernel_name_for_len(len));
      assert_eq!(crc32c(len).selected_kernel, Crc32C::kernel_name_for_len(len));
      assert_eq!(crc32c(len), Crc32C::selection_diag(len));
    }
  }

  #[test]
  fn ieee_never_reports_hardware_kernel() {
    let d = crc32_ieee(1 << 20);
    assert_eq!(d.variant, Crc32Variant::Ieee);
    assert_ne!(d.selected_kernel, crate::crc32::Kernel::Hwcrc.name());
  }

  #[test]
  fn tiny_input_reason() {
    let d = crc32_ieee(0);
    if d.effective_force == Crc32Force::Auto && d.small_threshold > 0 {
      assert_eq!(d.reason, SelectionReason::BelowSmallThreshold);
    }
  }
}
