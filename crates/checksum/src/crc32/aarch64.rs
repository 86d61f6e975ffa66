//! aarch64-accelerated CRC-32C (Castagnoli).
//!
//! Uses the ARMv8 CRC32 extension (`crc32c*` instructions).
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::aarch64::{__crc32cb, __crc32cd};

use platform::Caps;

pub(crate) const KERNEL_NAME: &str = "aarch64/crc";

/// Compute CRC-32C using the ARMv8 CRC32 extension.
///
/// # Safety
///
/// Caller must ensure the CPU supports the `crc` target feature.
#[target_feature(enable = "crc")]
pub(crate) unsafe fn compute_crc_unchecked(crc: u32, data: &[u8]) -> u32 {
  let (words, tail) = data.as_chunks::<8>();
  let mut current = crc;

  for word in words {
    // SAFETY: the crc feature is enabled for this function.
    #[allow(unused_unsafe)]
    {
      current = unsafe { __crc32cd(current, u64::from_le_bytes(*word)) };
    }
  }

  for &b in tail {
    // SAFETY: the crc feature is enabled for this function.
    #[allow(unused_unsafe)]
    {
      current = unsafe { __crc32cb(current, b) };
    }
  }

  current
}

/// Run the CRC-extension kernel when `caps` allows it.
#[inline]
pub(crate) fn compute(crc: u32, data: &[u8], caps: Caps) -> Option<u32> {
  if !caps.has_hwcrc32c() {
    return None;
  }
  // SAFETY: callers pass `platform::caps()` or a subset of it, and that never
  // reports a feature detection did not find, so the crc extension is present.
  Some(unsafe { compute_crc_unchecked(crc, data) })
}
