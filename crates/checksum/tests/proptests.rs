//! Property-based tests for CRC-32 implementations.
//!
//! These tests verify invariants that must hold for all inputs, not just
//! specific test vectors. The `crc` crate serves as an independent oracle.

use checksum::{
  Castagnoli, Checksum32, Crc32, Crc32C, Crc32Force, Crc32Tunables, Ieee, Polynomial, Prefetch, crc32, crc32c,
  engine::{self, SliceWidth},
  policy::{Crc32Variant, Kernel, select},
  tables::crc32_bitwise,
};
use proptest::prelude::*;
use traits::Checksum;

const CRC32_ORACLE: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);
const CRC32C_ORACLE: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISCSI);

// Test Strategies

/// Generate arbitrary byte vectors up to 8KB.
fn arb_data() -> impl Strategy<Value = Vec<u8>> {
  prop::collection::vec(any::<u8>(), 0..8192)
}

/// Generate multiple split points for chunked testing.
fn arb_splits(len: usize, count: usize) -> impl Strategy<Value = Vec<usize>> {
  prop::collection::vec(0..=len, count).prop_map(move |mut splits| {
    splits.sort();
    splits.push(len);
    splits.dedup();
    splits
  })
}

fn arb_force() -> impl Strategy<Value = Crc32Force> {
  prop_oneof![
    Just(Crc32Force::Auto),
    Just(Crc32Force::Portable),
    Just(Crc32Force::Bytewise),
    Just(Crc32Force::Hwcrc),
  ]
}

// Generic Property Tests

/// Incremental updates produce the same result as one-shot.
fn prop_incremental_equals_oneshot<C: Checksum>(data: &[u8], split: usize) -> bool {
  let split = split.min(data.len());
  let (a, b) = data.split_at(split);

  let mut incremental = C::new();
  incremental.update(a);
  incremental.update(b);

  incremental.finalize() == C::checksum(data)
}

/// Many incremental updates produce the same result as one-shot.
fn prop_multi_incremental<C: Checksum>(data: &[u8], splits: &[usize]) -> bool {
  let mut hasher = C::new();
  let mut prev = 0;
  for &split in splits {
    let split = split.min(data.len());
    if split > prev {
      hasher.update(&data[prev..split]);
      prev = split;
    }
  }
  if prev < data.len() {
    hasher.update(&data[prev..]);
  }

  hasher.finalize() == C::checksum(data)
}

/// Reset returns the hasher to its initial state.
fn prop_reset_works<C: Checksum>(data: &[u8]) -> bool {
  let mut hasher = C::new();
  hasher.update(data);
  hasher.reset();
  hasher.update(data);

  hasher.finalize() == C::checksum(data)
}

/// Every engine agrees with the bitwise reference for `P`.
fn prop_engines_agree<P: Polynomial>(data: &[u8], seed: u32) -> bool {
  let initial = Checksum32::new(seed);
  let want = Checksum32::new(crc32_bitwise(P::REFLECTED, seed, data) ^ !0);

  let mut ok = engine::bytewise::<P>(data, initial) == want;
  for prefetch in [Prefetch::Enabled, Prefetch::Disabled] {
    ok &= engine::sliced::<P, 1>(SliceWidth::Eight, data, initial, prefetch) == want;
    ok &= engine::sliced::<P, 2>(SliceWidth::Eight, data, initial, prefetch) == want;
    ok &= engine::sliced::<P, 1>(SliceWidth::Sixteen, data, initial, prefetch) == want;
    ok &= engine::sliced::<P, 4>(SliceWidth::Sixteen, data, initial, prefetch) == want;
  }
  ok
}

// CRC-32C Property Tests

proptest! {
  #![proptest_config(ProptestConfig::with_cases(1000))]

  #[test]
  fn crc32c_matches_oracle(data in arb_data()) {
    prop_assert_eq!(crc32c(&data, Checksum32::INITIAL).get(), CRC32C_ORACLE.checksum(&data));
  }

  #[test]
  fn crc32c_incremental_equals_oneshot(data in arb_data(), split in 0..8192usize) {
    prop_assert!(prop_incremental_equals_oneshot::<Crc32C>(&data, split));
  }

  #[test]
  fn crc32c_multi_incremental(
    (data, splits) in arb_data().prop_flat_map(|data| {
      let len = data.len();
      (Just(data), arb_splits(len, 6))
    })
  ) {
    prop_assert!(prop_multi_incremental::<Crc32C>(&data, &splits));
  }

  #[test]
  fn crc32c_reset(data in arb_data()) {
    prop_assert!(prop_reset_works::<Crc32C>(&data));
  }

  #[test]
  fn crc32c_engines_agree(data in arb_data(), seed in any::<u32>()) {
    prop_assert!(prop_engines_agree::<Castagnoli>(&data, seed));
  }

  #[test]
  fn crc32c_hardware_matches_software(data in arb_data(), seed in any::<u32>()) {
    let initial = Checksum32::new(seed);
    if let Some(hw) = engine::hardware_crc32c(&data, initial) {
      prop_assert_eq!(hw, engine::bytewise::<Castagnoli>(&data, initial));
    }
  }
}

// CRC-32 (IEEE) Property Tests

proptest! {
  #![proptest_config(ProptestConfig::with_cases(1000))]

  #[test]
  fn crc32_matches_oracle(data in arb_data()) {
    prop_assert_eq!(crc32(&data, Checksum32::INITIAL).get(), CRC32_ORACLE.checksum(&data));
  }

  #[test]
  fn crc32_incremental_equals_oneshot(data in arb_data(), split in 0..8192usize) {
    prop_assert!(prop_incremental_equals_oneshot::<Crc32>(&data, split));
  }

  #[test]
  fn crc32_reset(data in arb_data()) {
    prop_assert!(prop_reset_works::<Crc32>(&data));
  }

  #[test]
  fn crc32_engines_agree(data in arb_data(), seed in any::<u32>()) {
    prop_assert!(prop_engines_agree::<Ieee>(&data, seed));
  }

  #[test]
  fn crc32_composition_law(data in arb_data(), split in 0..8192usize) {
    let split = split.min(data.len());
    let (a, b) = data.split_at(split);
    let head = crc32(a, Checksum32::INITIAL);
    prop_assert_eq!(crc32(b, head.unfinalize()), crc32(&data, Checksum32::INITIAL));
  }

  #[test]
  fn vectored_equals_oneshot(data in arb_data(), splits in arb_splits(8192, 4)) {
    let mut bufs: Vec<&[u8]> = Vec::new();
    let mut prev = 0;
    for split in splits {
      let split = split.min(data.len());
      if split >= prev {
        bufs.push(&data[prev..split]);
        prev = split;
      }
    }
    bufs.push(&data[prev..]);
    prop_assert_eq!(Crc32::checksum_vectored(&bufs), Crc32::checksum(&data));
    prop_assert_eq!(Crc32C::checksum_vectored(&bufs), Crc32C::checksum(&data));
  }
}

// Selection Policy Properties

proptest! {
  #[test]
  fn policy_is_deterministic(len in any::<usize>(), hw in any::<bool>(), force in arb_force()) {
    let t = Crc32Tunables::DEFAULT;
    for variant in [Crc32Variant::Ieee, Crc32Variant::Castagnoli] {
      prop_assert_eq!(select(variant, len, hw, &t, force), select(variant, len, hw, &t, force));
    }
  }

  #[test]
  fn ieee_never_selects_hardware(len in any::<usize>(), hw in any::<bool>(), force in arb_force()) {
    let sel = select(Crc32Variant::Ieee, len, hw, &Crc32Tunables::DEFAULT, force);
    prop_assert_ne!(sel.kernel, Kernel::Hwcrc);
  }

  #[test]
  fn hardware_needs_capability(len in any::<usize>(), force in arb_force()) {
    let sel = select(Crc32Variant::Castagnoli, len, false, &Crc32Tunables::DEFAULT, force);
    prop_assert_ne!(sel.kernel, Kernel::Hwcrc);
  }
}
