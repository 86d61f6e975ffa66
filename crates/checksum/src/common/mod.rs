//! Common utilities for CRC computation.
//!
//! This module provides:
//! - Const-fn lookup table generation (byte-at-a-time and slice-by-N)
//! - The bitwise reference implementation every kernel is checked against
//! - Software prefetch hints for the sliced kernels

pub mod prefetch;
pub mod reference;
pub mod tables;
