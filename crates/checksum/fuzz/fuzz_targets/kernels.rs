//! Cross-kernel equivalence fuzzing for CRC-32 and CRC-32C.
//!
//! Verifies that ALL available kernels on the current platform produce
//! identical results for any input and seed. This catches:
//!
//! - Unrolled-loop and tail boundary bugs in the sliced kernels
//! - Hardware kernel word/tail handling
//! - Prefetch affecting results
//!
//! The oracle is the bitwise reference implementation, which is obviously
//! correct by inspection. All production kernels must match it exactly.

#![no_main]

use arbitrary::Arbitrary;
use checksum::{
  Castagnoli, Ieee,
  __internal::kernel_test::{run_all_kernels, verify_crc32_ieee_kernels, verify_crc32c_kernels},
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  seed: u32,
}

fuzz_target!(|input: Input| {
  check_agreement("crc32", &run_all_kernels::<Ieee>(&input.data, input.seed), input.data.len());
  check_agreement("crc32c", &run_all_kernels::<Castagnoli>(&input.data, input.seed), input.data.len());

  // Paranoid check: verify against the verification functions
  verify_crc32_ieee_kernels(&input.data).expect("CRC32-IEEE kernel verification failed");
  verify_crc32c_kernels(&input.data).expect("CRC32C kernel verification failed");
});

fn check_agreement(name: &str, results: &[checksum::__internal::kernel_test::KernelResult], len: usize) {
  let Some((first, rest)) = results.split_first() else {
    return;
  };
  for result in rest {
    assert_eq!(
      result.checksum, first.checksum,
      "{name} kernel mismatch: {} produced 0x{:08X}, but {} produced 0x{:08X}, len={len}",
      result.name, result.checksum, first.name, first.checksum
    );
  }
}
