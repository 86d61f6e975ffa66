//! x86_64-accelerated CRC-32C (Castagnoli).
//!
//! Uses the SSE4.2 `crc32` instruction, which implements the Castagnoli
//! polynomial only.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::x86_64::{_mm_crc32_u8, _mm_crc32_u64};

use platform::Caps;

pub(crate) const KERNEL_NAME: &str = "x86_64/sse4.2";

/// Compute CRC-32C using SSE4.2 `crc32` instructions.
///
/// Eight-byte little-endian words go through `crc32q`, the tail through
/// `crc32b`. Operates on the raw register.
///
/// # Safety
///
/// Caller must ensure the CPU supports the `sse4.2` target feature.
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn compute_sse42_unchecked(crc: u32, data: &[u8]) -> u32 {
  let (words, tail) = data.as_chunks::<8>();
  let mut current = crc as u64;

  for word in words {
    // SAFETY: sse4.2 is enabled for this function.
    #[allow(unused_unsafe)]
    {
      current = unsafe { _mm_crc32_u64(current, u64::from_le_bytes(*word)) };
    }
  }

  let mut current = current as u32;
  for &b in tail {
    // SAFETY: sse4.2 is enabled for this function.
    #[allow(unused_unsafe)]
    {
      current = unsafe { _mm_crc32_u8(current, b) };
    }
  }

  current
}

/// Run the SSE4.2 kernel when `caps` allows it.
#[inline]
pub(crate) fn compute(crc: u32, data: &[u8], caps: Caps) -> Option<u32> {
  if !caps.has_hwcrc32c() {
    return None;
  }
  // SAFETY: callers pass `platform::caps()` or a subset of it, and that never
  // reports a feature detection did not find, so sse4.2 is present.
  Some(unsafe { compute_sse42_unchecked(crc, data) })
}
