//! Portable CRC-32 kernels (byte-at-a-time, slice-by-8, slice-by-16).
//!
//! Every function here works on the raw register: the caller seeds it and
//! applies the final XOR exactly once.
//!
//! # Algorithm Overview
//!
//! Slice-by-N consumes N bytes per step using N precomputed tables. The first
//! four bytes are assembled little-endian and XORed into the register; each of
//! the N byte positions then contributes one lookup from the table that
//! advances it by the right number of remaining bytes. The lookups are
//! independent, so the CPU overlaps them, giving ~N× the throughput of the
//! byte-at-a-time loop.
//!
//! | Kernel | Bytes/step | Tables |
//! |--------|------------|--------|
//! | bytewise | 1 | 1×256×u32 |
//! | slice-by-8 | 8 | 8×256×u32 |
//! | slice-by-16 | 16 | 16×256×u32 |

// SAFETY: All array indexing in this module uses bounded indices:
// - as_chunks guarantees block sizes
// - Table indices use `& 0xFF` (0..255) or a byte value
// - Table numbers are below N by the const assertion in `fold_block`
#![allow(clippy::indexing_slicing)]

use crate::common::prefetch::prefetch_ahead;

/// Whether the sliced driver issues software prefetch hints.
///
/// Purely a performance hint: both settings produce identical output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Prefetch {
  #[default]
  Enabled,
  Disabled,
}

/// Update CRC-32 state one byte at a time.
#[inline]
pub fn bytewise(mut crc: u32, data: &[u8], table: &[u32; 256]) -> u32 {
  for &b in data {
    let index = ((crc ^ (b as u32)) & 0xFF) as usize;
    crc = table[index] ^ (crc >> 8);
  }
  crc
}

/// Fold one N-byte block into the register.
#[inline(always)]
fn fold_block<const N: usize>(crc: u32, block: &[u8; N], tables: &[[u32; 256]; N]) -> u32 {
  const { assert!(N >= 4, "slice width must cover the 32-bit register") };

  let one = u32::from_le_bytes([block[0], block[1], block[2], block[3]]) ^ crc;

  let mut next = tables[N - 1][(one & 0xFF) as usize]
    ^ tables[N - 2][((one >> 8) & 0xFF) as usize]
    ^ tables[N - 3][((one >> 16) & 0xFF) as usize]
    ^ tables[N - 4][(one >> 24) as usize];

  let mut k = 4;
  while k < N {
    next ^= tables[N - 1 - k][block[k] as usize];
    k += 1;
  }
  next
}

/// Update CRC-32 state with slice-by-N, unrolled `UNROLL` blocks per step.
///
/// While at least `UNROLL × N` bytes remain, optionally hint `2 × UNROLL × N`
/// bytes ahead and fold `UNROLL` blocks. Whole blocks left over are folded
/// without prefetch; the final `< N` bytes go through [`bytewise`] with
/// `tables[0]`.
#[inline]
pub fn sliced<const N: usize, const UNROLL: usize>(
  mut crc: u32,
  data: &[u8],
  tables: &[[u32; 256]; N],
  prefetch: Prefetch,
) -> u32 {
  const { assert!(UNROLL >= 1, "unroll degree must be at least 1") };

  let step = UNROLL * N;
  let (blocks, tail) = data.as_chunks::<N>();
  let mut groups = blocks.chunks_exact(UNROLL);
  let mut offset = 0usize;

  for group in groups.by_ref() {
    if prefetch == Prefetch::Enabled {
      prefetch_ahead(data, offset + 2 * step);
    }
    for block in group {
      crc = fold_block(crc, block, tables);
    }
    offset += step;
  }

  for block in groups.remainder() {
    crc = fold_block(crc, block, tables);
  }

  bytewise(crc, tail, &tables[0])
}

/// Slice-by-8 with the given unroll degree.
#[inline]
pub fn slice8<const UNROLL: usize>(crc: u32, data: &[u8], tables: &[[u32; 256]; 8], prefetch: Prefetch) -> u32 {
  sliced::<8, UNROLL>(crc, data, tables, prefetch)
}

/// Slice-by-16 with the given unroll degree.
#[inline]
pub fn slice16<const UNROLL: usize>(crc: u32, data: &[u8], tables: &[[u32; 256]; 16], prefetch: Prefetch) -> u32 {
  sliced::<16, UNROLL>(crc, data, tables, prefetch)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
