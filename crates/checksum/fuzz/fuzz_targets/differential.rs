//! Differential fuzzing against the `crc` crate.
//!
//! Compares the dispatched one-shot functions against an independent
//! implementation to catch any discrepancies.

#![no_main]

use checksum::{Checksum32, crc32, crc32c};
use libfuzzer_sys::fuzz_target;

const ISO_HDLC: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);
const ISCSI: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISCSI);

fuzz_target!(|data: &[u8]| {
  let ours = crc32(data, Checksum32::INITIAL).get();
  let theirs = ISO_HDLC.checksum(data);
  assert_eq!(ours, theirs, "crc32 mismatch vs crc crate, len={}", data.len());

  let ours = crc32c(data, Checksum32::INITIAL).get();
  let theirs = ISCSI.checksum(data);
  assert_eq!(ours, theirs, "crc32c mismatch vs crc crate, len={}", data.len());
});
