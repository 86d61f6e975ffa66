//! Environment configuration, read once on first use.
//!
//! The variables are set before anything in this binary touches the crate,
//! so everything runs in a single test.

#![allow(unsafe_code)]

use checksum::{Checksum, Checksum32, Crc32, Crc32C, Crc32Force, Crc32Tunables, Kernel, crc32, crc32c};

const CHECKS: &[(&[u8], u32, u32)] = &[
  (b"", 0x0000_0000, 0x0000_0000),
  (b"123456789", 0xCBF4_3926, 0xE306_9283),
  (b"The quick brown fox jumps over the lazy dog", 0x414F_A339, 0x2262_0404),
  (&[0xFF; 32], 0xFF6C_AB0B, 0x62A8_AB43),
];

#[test]
fn env_overrides_apply_once_and_keep_results() {
  // SAFETY: no other thread in this binary runs while the variables are set.
  unsafe {
    std::env::set_var("SLICECRC_CRC32_FORCE", " Bytewise ");
    std::env::set_var("SLICECRC_CRC32C_HWCRC_THRESHOLD", "abc");
    std::env::set_var("SLICECRC_CRC32_SMALL_THRESHOLD", "");
  }

  let cfg = Crc32C::config();
  assert_eq!(cfg.requested_force, Crc32Force::Bytewise);
  assert_eq!(cfg.effective_force, Crc32Force::Bytewise);
  assert_eq!(cfg.tunables, Crc32Tunables::DEFAULT);
  assert_eq!(Crc32::config(), cfg);

  for len in [0usize, 15, 16, 128, 4096, 1 << 20] {
    assert_eq!(Crc32C::kernel_name_for_len(len), Kernel::Bytewise.name(), "len {len}");
    assert_eq!(Crc32::kernel_name_for_len(len), Kernel::Bytewise.name(), "len {len}");
  }

  // Later changes are not picked up.
  // SAFETY: as above.
  unsafe {
    std::env::set_var("SLICECRC_CRC32_FORCE", "portable");
  }
  assert_eq!(Crc32C::config(), cfg);

  for &(input, ieee, castagnoli) in CHECKS {
    assert_eq!(crc32(input, Checksum32::INITIAL).get(), ieee);
    assert_eq!(crc32c(input, Checksum32::INITIAL).get(), castagnoli);
    assert_eq!(Crc32::checksum(input).get(), ieee);
    assert_eq!(Crc32C::checksum(input).get(), castagnoli);
  }

  let data: Vec<u8> = (0..8192u32).map(|i| (i ^ (i >> 5)) as u8).collect();
  let mut hasher = Crc32C::new();
  for chunk in data.chunks(1000) {
    hasher.update(chunk);
  }
  assert_eq!(hasher.finalize(), crc32c(&data, Checksum32::INITIAL));
}
