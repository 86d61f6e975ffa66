//! I/O adapters for checksum computation.
//!
//! [`ChecksumReader`] and [`ChecksumWriter`] wrap [`std::io::Read`] and
//! [`std::io::Write`] implementations to compute checksums transparently
//! during I/O.
//!
//! - Only bytes actually transferred are hashed (short reads/writes, errors)
//! - Vectored reads and writes hash exactly the prefix that was transferred
//!
//! # Example
//!
//! ```rust
//! use std::io::{Cursor, Read};
//!
//! use checksum::{Checksum, Crc32CReader};
//!
//! let mut reader = Crc32CReader::new(Cursor::new(b"hello world".to_vec()));
//! let mut contents = Vec::new();
//! reader.read_to_end(&mut contents)?;
//! assert_eq!(contents, b"hello world");
//! assert_eq!(reader.crc(), checksum::Crc32C::checksum(&contents));
//! # Ok::<(), std::io::Error>(())
//! ```

pub use traits::io::{ChecksumReader, ChecksumWriter};

use crate::{Crc32, Crc32C};

/// Reader that computes CRC-32 (IEEE) over everything read through it.
pub type Crc32Reader<R> = ChecksumReader<R, Crc32>;
/// Reader that computes CRC-32C over everything read through it.
pub type Crc32CReader<R> = ChecksumReader<R, Crc32C>;
/// Writer that computes CRC-32 (IEEE) over everything written through it.
pub type Crc32Writer<W> = ChecksumWriter<W, Crc32>;
/// Writer that computes CRC-32C over everything written through it.
pub type Crc32CWriter<W> = ChecksumWriter<W, Crc32C>;

#[cfg(test)]
mod tests {
  extern crate std;

  use std::{
    io::{Cursor, Read, Write},
    vec::Vec,
  };

  use traits::Checksum;

  use super::*;

  #[test]
  fn writer_matches_one_shot() {
    let mut writer = Crc32Writer::new(Vec::new());
    writer.write_all(b"The quick brown fox ").unwrap();
    writer.write_all(b"jumps over the lazy dog").unwrap();
    assert_eq!(writer.crc().get(), 0x414F_A339);
    let (inner, crc) = writer.into_parts();
    assert_eq!(inner.len(), 43);
    assert_eq!(crc.get(), 0x414F_A339);
  }

  #[test]
  fn reader_matches_one_shot() {
    let data: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
    let mut reader = Crc32CReader::new(Cursor::new(data.clone()));
    let mut buf = [0u8; 333];
    let mut seen = Vec::new();
    loop {
      let n = reader.read(&mut buf).unwrap();
      if n == 0 {
        break;
      }
      seen.extend_from_slice(&buf[..n]);
    }
    assert_eq!(seen, data);
    assert_eq!(reader.crc(), Crc32C::checksum(&data));
  }
}
