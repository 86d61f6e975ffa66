//! Core checksum traits for slicecrc.
//!
//! This crate provides the foundational traits that the checksum engine
//! conforms to. It is `no_std` compatible and has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`Checksum`] | Streaming non-cryptographic checksums | CRC-32, CRC-32C |
//!
//! # Error Types
//!
//! - [`VerificationError`] - A computed checksum did not match the expected one
//! - [`ParseChecksumError`] - A textual checksum rendering could not be parsed
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;
pub mod error;
#[cfg(feature = "std")]
pub mod io;

pub use checksum::Checksum;
pub use error::{ParseChecksumError, ParseChecksumErrorKind, VerificationError};
