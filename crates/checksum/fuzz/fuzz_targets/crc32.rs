//! Fuzz target for the CRC-32 streaming types.
//!
//! Tests that:
//! - Incremental updates produce the same result as one-shot
//! - Resume produces correct results
//! - Vectored updates produce the same result as one-shot
//! - Reset restores the construction seed

#![no_main]

use arbitrary::Arbitrary;
use checksum::{Checksum, Checksum32, Crc32, Crc32C};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  split_point: usize,
  seed: u32,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let split = input.split_point % (data.len() + 1);

  check_streaming::<Crc32>("crc32", data, split, input.seed);
  check_streaming::<Crc32C>("crc32c", data, split, input.seed);
});

fn check_streaming<C: Checksum<Output = Checksum32>>(name: &str, data: &[u8], split: usize, seed: u32) {
  let oneshot = C::checksum(data);

  let (a, b) = data.split_at(split);
  let mut hasher = C::new();
  hasher.update(a);
  hasher.update(b);
  assert_eq!(oneshot, hasher.finalize(), "{name} incremental mismatch");

  let mut resumed = C::with_initial(C::checksum(a).unfinalize());
  resumed.update(b);
  assert_eq!(oneshot, resumed.finalize(), "{name} resume mismatch");

  assert_eq!(oneshot, C::checksum_vectored(&[a, b]), "{name} vectored mismatch");

  let mut seeded = C::with_initial(Checksum32::new(seed));
  seeded.update(data);
  let first = seeded.finalize();
  seeded.reset();
  seeded.update(data);
  assert_eq!(first, seeded.finalize(), "{name} reset mismatch");
}
