//! Bitwise reference implementation.
//!
//! This is the canonical "source of truth" for CRC-32 computation. It
//! processes one bit at a time, making it:
//!
//! - **Obviously correct**: The algorithm directly mirrors the mathematical definition
//! - **Table-free**: Shares no state with the table generator it verifies
//! - **Const-evaluable**: Check values are verified at compile time
//!
//! Every table-driven and hardware kernel must produce results identical to
//! [`crc32_bitwise`]. It is intentionally slow (~8 operations per bit); use it
//! as a test oracle only.

// SAFETY: All array indexing uses bounded loop indices (0..data.len()).
// Clippy cannot prove this in const fn contexts, but bounds are statically guaranteed.
#![allow(clippy::indexing_slicing)]

use super::tables::{CRC32_IEEE_POLY, CRC32C_POLY};

/// Bitwise CRC-32 computation (reflected, LSB-first).
///
/// # Arguments
///
/// * `poly` - Reflected polynomial (e.g., 0xEDB88320 for CRC-32-IEEE)
/// * `init` - Raw register value (0xFFFFFFFF for a fresh computation)
/// * `data` - Input bytes
///
/// # Returns
///
/// The raw CRC register state (caller applies final XOR).
#[must_use]
pub const fn crc32_bitwise(poly: u32, init: u32, data: &[u8]) -> u32 {
  let mut crc = init;
  let mut i: usize = 0;
  while i < data.len() {
    crc ^= data[i] as u32;
    let mut bit: u32 = 0;
    while bit < 8 {
      crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
      bit += 1;
    }
    i += 1;
  }
  crc
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Verification
// ─────────────────────────────────────────────────────────────────────────────

/// Standard test input for CRC check values.
const CHECK_INPUT: &[u8] = b"123456789";

// CRC-32-IEEE: init=0xFFFFFFFF, xorout=0xFFFFFFFF
const _: () = {
  let check = crc32_bitwise(CRC32_IEEE_POLY, !0u32, CHECK_INPUT) ^ !0u32;
  assert!(check == 0xCBF4_3926);
};

// CRC-32C (Castagnoli): init=0xFFFFFFFF, xorout=0xFFFFFFFF
const _: () = {
  let check = crc32_bitwise(CRC32C_POLY, !0u32, CHECK_INPUT) ^ !0u32;
  assert!(check == 0xE306_9283);
};

// Empty input finalizes the untouched seed.
const _: () = {
  assert!(crc32_bitwise(CRC32_IEEE_POLY, !0u32, &[]) ^ !0u32 == 0);
};
