//! Basic checksum usage: one-shot, streaming, and resumed computation.
//!
//! Run with: `cargo run --example basic -p checksum`

use checksum::{Checksum, Checksum32, Crc32, Crc32C, crc32, crc32c};

fn main() {
  println!("=== Checksum Basic Examples ===\n");

  one_shot_examples();
  streaming_examples();
  resume_example();
  verify_example();
}

/// One-shot computation: fastest when you have all data in memory.
fn one_shot_examples() {
  println!("--- One-Shot Computation ---\n");

  let data = b"123456789";

  // CRC-32 (IEEE) - Ethernet, gzip, zip, PNG
  let ieee = Crc32::checksum(data);
  println!("CRC-32 (IEEE):   {ieee}");
  assert_eq!(ieee, Checksum32::new(0xCBF4_3926));

  // CRC-32C (Castagnoli) - iSCSI, SCTP, ext4, Btrfs
  let castagnoli = crc32c(data, Checksum32::INITIAL);
  println!("CRC-32C:         {castagnoli}");
  assert_eq!(castagnoli, Checksum32::new(0xE306_9283));

  println!();
}

/// Streaming computation: process data in chunks.
fn streaming_examples() {
  println!("--- Streaming Computation ---\n");

  let chunks: [&[u8]; 3] = [b"The quick brown fox ", b"jumps over ", b"the lazy dog"];

  let mut hasher = Crc32::new();
  for chunk in chunks {
    hasher.update(chunk);
  }
  println!("CRC-32 of 3 chunks:  {}", hasher.finalize());
  assert_eq!(hasher.finalize(), Checksum32::new(0x414F_A339));

  // Vectored update: same result as sequential updates
  let vectored = Crc32C::checksum_vectored(&chunks);
  println!("CRC-32C vectored:    {vectored}");
  assert_eq!(vectored, Checksum32::new(0x2262_0404));

  println!();
}

/// Continue a checksum from a previously finished value.
fn resume_example() {
  println!("--- Resume ---\n");

  let head = crc32(b"hello ", Checksum32::INITIAL);
  let whole = crc32(b"world", head.unfinalize());
  println!("crc32(\"hello \")      = {head}");
  println!("resumed with \"world\" = {whole}");
  assert_eq!(whole, crc32(b"hello world", Checksum32::INITIAL));
  assert_eq!(whole, Checksum32::new(0x0D4A_1185));

  let mut hasher = Crc32::resume(head);
  hasher.update(b"world");
  assert_eq!(hasher.finalize(), whole);

  println!();
}

/// Check data against a stored checksum.
fn verify_example() {
  println!("--- Verify ---\n");

  let stored: Checksum32 = match "0xE3069283".parse() {
    Ok(value) => value,
    Err(err) => {
      println!("bad checksum: {err}");
      return;
    }
  };

  match Crc32C::verify(b"123456789", stored) {
    Ok(()) => println!("123456789 matches {stored}"),
    Err(err) => println!("123456789: {err}"),
  }
  match Crc32C::verify(b"123456780", stored) {
    Ok(()) => println!("123456780 matches {stored}"),
    Err(err) => println!("123456780: {err}"),
  }
}
