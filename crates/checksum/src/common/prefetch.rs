//! Software prefetch hints for the sliced kernels.
//!
//! Hardware prefetchers cope well with a linear scan, but in a tight
//! table-lookup loop an explicit hint a few iterations ahead still keeps the
//! next blocks in L1 before the loads that need them issue. A prefetch never
//! faults and never changes results; invalid addresses are ignored by the CPU.

// SAFETY: This module provides low-level prefetch intrinsics that require unsafe.
// Prefetch instructions are hints to the CPU and cannot cause memory unsafety.
#![allow(unsafe_code)]

// ─────────────────────────────────────────────────────────────────────────────
// x86-64
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
mod imp {
  use core::arch::x86_64::{_MM_HINT_T0, _mm_prefetch};

  /// Prefetch data for read into L1 cache (temporal).
  ///
  /// # Safety
  ///
  /// The pointer does not need to be valid or aligned.
  #[inline(always)]
  pub unsafe fn prefetch_read_l1(ptr: *const u8) {
    // SAFETY: `prefetch` only hints the cache; SSE is baseline on x86_64.
    unsafe { _mm_prefetch(ptr.cast::<i8>(), _MM_HINT_T0) };
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// ARM64
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "aarch64")]
mod imp {
  /// Prefetch data for read into L1 cache (PLDL1KEEP).
  ///
  /// `core::arch::aarch64` has no stable prefetch intrinsic, so this issues
  /// `PRFM` directly.
  ///
  /// # Safety
  ///
  /// The pointer does not need to be valid or aligned.
  #[inline(always)]
  pub unsafe fn prefetch_read_l1(ptr: *const u8) {
    // SAFETY: PRFM is a hint and never faults, whatever the address.
    unsafe {
      core::arch::asm!(
        "prfm pldl1keep, [{ptr}]",
        ptr = in(reg) ptr,
        options(nostack, preserves_flags, readonly)
      );
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fallback (no-op)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
mod imp {
  /// # Safety
  ///
  /// Always safe; does nothing.
  #[inline(always)]
  pub unsafe fn prefetch_read_l1(_ptr: *const u8) {}
}

pub use imp::prefetch_read_l1;

/// Hint that `data[offset..]` will be read soon.
///
/// `offset` may point past the end of `data`; the address is formed with
/// wrapping arithmetic and never dereferenced.
#[inline(always)]
pub fn prefetch_ahead(data: &[u8], offset: usize) {
  let ptr = data.as_ptr().wrapping_add(offset);
  // SAFETY: prefetch accepts any address, valid or not.
  unsafe { prefetch_read_l1(ptr) };
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
