//! Sliced CRC-32 and CRC-32C checksums with hardware acceleration.
//!
//! Table-driven reflected CRC-32 with slicing-by-8/16, a hardware CRC-32C
//! path, and a pure size-based dispatch policy. Every kernel is bit-exact
//! with every other, so the choice affects only speed.
//!
//! # Supported Algorithms
//!
//! | Type | Polynomial | Output | Use Cases |
//! |------|------------|--------|-----------|
//! | [`Crc32`] | 0x04C11DB7 | [`Checksum32`] | Ethernet, gzip, zip, PNG |
//! | [`Crc32C`] | 0x1EDC6F41 | [`Checksum32`] | iSCSI, SCTP, ext4, Btrfs |
//!
//! # Kernel Selection
//!
//! | Input | CRC-32 | CRC-32C |
//! |-------|--------|---------|
//! | `< 16` bytes | byte-at-a-time | byte-at-a-time |
//! | `16..128` bytes | slice-by-16 | slice-by-16 |
//! | `>= 128` bytes | slice-by-16 | SSE4.2 / ARMv8 CRC when available |
//!
//! Thresholds and a forced kernel can be set through the environment (see
//! [`Crc32Config`]). Inspect the choice with [`Crc32C::kernel_name_for_len`],
//! [`kernel_for`] or [`DispatchInfo`].
//!
//! # Example
//!
//! ```rust
//! use checksum::{Checksum, Checksum32, Crc32, crc32};
//!
//! // One-shot computation
//! let data = b"123456789";
//! let crc = Crc32::checksum(data);
//! assert_eq!(crc, Checksum32::new(0xCBF4_3926));
//! assert_eq!(crc32(data, Checksum32::INITIAL), crc);
//!
//! // Streaming computation
//! let mut hasher = Crc32::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), crc);
//!
//! // Continue from a finished value
//! let head = Crc32::checksum(b"1234");
//! assert_eq!(crc32(b"56789", head.unfinalize()), crc);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the `std` feature for embedded use:
//!
//! ```toml
//! [dependencies]
//! checksum = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std` there is no runtime CPU detection or environment
//! configuration; hardware CRC-32C is used only when compiled in with
//! `-C target-feature`.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod common;

// Internal macros must be declared before modules that use them.
#[macro_use]
mod macros;

mod crc32;
#[cfg(feature = "diag")]
pub mod diag;
pub mod engine;
mod introspect;
#[cfg(feature = "std")]
pub mod io;
mod value;

#[doc(hidden)]
#[cfg(feature = "alloc")]
pub mod __internal {
  pub use crate::crc32::kernel_test;
}

pub use crc32::{
  Castagnoli, Crc32, Crc32C, Crc32Config, Crc32Force, Crc32Tunables, Crc32Variant, HAS_HARDWARE_CRC32C, Ieee, Kernel,
  Polynomial, Prefetch, Selection, SelectionReason, crc32, crc32c,
};
pub use introspect::{DispatchInfo, KernelIntrospect, kernel_for};
#[cfg(feature = "std")]
pub use io::{ChecksumReader, ChecksumWriter, Crc32CReader, Crc32CWriter, Crc32Reader, Crc32Writer};
// Re-export traits and errors for convenience
pub use traits::{Checksum, ParseChecksumError, ParseChecksumErrorKind, VerificationError};
pub use value::{Checksum32, Checksum64};

/// Kernel selection policy, exposed for testing and tooling.
pub mod policy {
  pub use crate::crc32::{
    config::clamp_force_to_caps,
    policy::{Crc32Variant, Kernel, Selection, SelectionReason, select},
  };
}

/// Compile-time table generators and the bitwise reference CRC.
pub mod tables {
  pub use crate::common::{
    reference::crc32_bitwise,
    tables::{CRC32_IEEE_POLY, CRC32C_POLY, crc32_slice_tables, crc32_table},
  };
}
