//! Kernel introspection: verify which kernels are active.
//!
//! Shows the detected platform, the configuration in effect, and which
//! kernel each algorithm selects per buffer size.
//!
//! Run with: `cargo run --example introspect -p checksum`
//!
//! Try `SLICECRC_CRC32_FORCE=portable` or
//! `SLICECRC_CRC32C_HWCRC_THRESHOLD=4096` to see the selection move.

use checksum::{Crc32, Crc32C, DispatchInfo, HAS_HARDWARE_CRC32C, KernelIntrospect, kernel_for};

fn main() {
  println!("=== Checksum Kernel Introspection ===\n");

  platform_info();
  algorithm_backends();
  size_based_dispatch();
  generic_introspection();
}

/// Display detected platform capabilities.
fn platform_info() {
  println!("--- Platform Detection ---\n");

  let info = DispatchInfo::current();
  println!("Platform: {info}");
  println!("Platform Debug: {:?}", info.platform());
  println!("Hardware CRC-32C (compile time): {HAS_HARDWARE_CRC32C}");
  println!("Hardware CRC-32C (runtime):      {}", info.has_hardware_crc32c());
  println!("Config: {:?}", Crc32C::config());
  println!();
}

/// Show which backend is selected for each algorithm.
fn algorithm_backends() {
  println!("--- Algorithm Backends ---\n");

  println!("CRC-32 (IEEE):     {}", Crc32::backend_name());
  println!("CRC-32C:           {}", Crc32C::backend_name());
  println!();
}

/// Kernels vary with buffer size.
fn size_based_dispatch() {
  println!("--- Size-Based Kernel Selection ---\n");

  let sizes = [0, 8, 15, 16, 64, 127, 128, 4096, 1_048_576];

  println!("{:>10}  {:<20}  {:<20}", "bytes", "CRC-32", "CRC-32C");
  for size in sizes {
    println!("{size:>10}  {:<20}  {:<20}", Crc32::kernel_name_for_len(size), Crc32C::kernel_name_for_len(size));
  }
  println!();
}

/// Generic access through the `KernelIntrospect` trait.
fn generic_introspection() {
  println!("--- Generic Introspection ---\n");

  fn report<T: KernelIntrospect>(label: &str) {
    println!("{label}: backend={} @64B={}", T::backend_name(), kernel_for::<T>(64));
  }

  report::<Crc32>("CRC-32");
  report::<Crc32C>("CRC-32C");
}
