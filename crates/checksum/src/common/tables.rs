//! Const-fn CRC-32 lookup table generation.
//!
//! Tables are computed with `const fn` and embedded directly in the binary;
//! nothing is built at runtime.
//!
//! # Table Strategies
//!
//! | Strategy | Size |
//! |----------|------|
//! | Byte-at-a-time | 1×256×u32 (1 KiB) |
//! | Slice-by-8 | 8×256×u32 (8 KiB) |
//! | Slice-by-16 | 16×256×u32 (16 KiB) |
//!
//! Higher slice counts provide better throughput at the cost of table size.

// SAFETY: All array indexing in this module uses bounded loop indices (0..256, 0..N).
// Clippy cannot prove this in const fn contexts, but bounds are statically guaranteed.
#![allow(clippy::indexing_slicing)]

// ─────────────────────────────────────────────────────────────────────────────
// Polynomial Constants (Reflected Form)
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 (IEEE 802.3) polynomial (0x04C11DB7) in reflected form.
/// Used by Ethernet, gzip, zip, PNG.
pub const CRC32_IEEE_POLY: u32 = 0xEDB8_8320;

/// CRC-32C (Castagnoli) polynomial (0x1EDC6F41) in reflected form.
/// Used by iSCSI, SCTP, ext4, Btrfs.
pub const CRC32C_POLY: u32 = 0x82F6_3B78;

// ─────────────────────────────────────────────────────────────────────────────
// Table Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a single CRC-32 lookup table entry.
///
/// Shifts `index` through eight rounds of reflected polynomial division.
#[must_use]
pub const fn crc32_table_entry(poly: u32, index: u8) -> u32 {
  let mut crc = index as u32;
  let mut i = 0;
  while i < 8 {
    if crc & 1 != 0 {
      crc = (crc >> 1) ^ poly;
    } else {
      crc >>= 1;
    }
    i += 1;
  }
  crc
}

/// Generate the 256-entry byte-at-a-time table for `poly`.
#[must_use]
pub const fn crc32_table(poly: u32) -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;
  while i < 256 {
    table[i] = crc32_table_entry(poly, i as u8);
    i += 1;
  }
  table
}

/// Generate `N` slice-by-N tables for `poly`.
///
/// Table 0 is [`crc32_table`]. Table `k` advances table `k-1` by one further
/// zero byte: `t[k][i] = (t[k-1][i] >> 8) ^ t[0][t[k-1][i] & 0xFF]`.
#[must_use]
pub const fn crc32_slice_tables<const N: usize>(poly: u32) -> [[u32; 256]; N] {
  const { assert!(N >= 1, "slice table set needs at least one table") };

  let mut tables = [[0u32; 256]; N];
  tables[0] = crc32_table(poly);

  let mut k = 1usize;
  while k < N {
    let mut i = 0usize;
    while i < 256 {
      let prev = tables[k - 1][i];
      tables[k][i] = (prev >> 8) ^ tables[0][(prev & 0xFF) as usize];
      i += 1;
    }
    k += 1;
  }

  tables
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
