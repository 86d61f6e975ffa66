//! `std::io` adapters that checksum data as it streams past.
//!
//! Both adapters hash exactly the bytes the inner reader or writer reported as
//! transferred, so short reads and short writes leave the running checksum in
//! step with the data that actually moved.
//!
//! # Example
//!
//! ```rust
//! # use traits::Checksum;
//! # #[derive(Clone, Default)]
//! # struct Sum(u32);
//! # impl Checksum for Sum {
//! #   const OUTPUT_SIZE: usize = 4;
//! #   type Output = u32;
//! #   fn new() -> Self { Self(0) }
//! #   fn with_initial(initial: Self::Output) -> Self { Self(initial) }
//! #   fn update(&mut self, data: &[u8]) {
//! #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(u32::from(b)));
//! #   }
//! #   fn finalize(&self) -> Self::Output { self.0 }
//! #   fn reset(&mut self) { self.0 = 0; }
//! # }
//! # use std::io::Cursor;
//! let mut reader = Sum::reader(Cursor::new(b"abc".to_vec()));
//! std::io::copy(&mut reader, &mut std::io::sink())?;
//! assert_eq!(reader.crc(), u32::from(b'a') + u32::from(b'b') + u32::from(b'c'));
//! # Ok::<(), std::io::Error>(())
//! ```

#[inline]
fn hash_prefix<'a, I>(bufs: I, n: usize, mut on_data: impl FnMut(&[u8]))
where
  I: IntoIterator<Item = &'a [u8]>,
{
  let mut remaining = n;
  for buf in bufs {
    if remaining == 0 {
      break;
    }
    let take = remaining.min(buf.len());
    if let Some(data) = buf.get(..take) {
      on_data(data);
    }
    remaining -= take;
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reader
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps a [`Read`](std::io::Read) and computes a checksum transparently.
///
/// # Type Parameters
///
/// - `R`: The inner reader type
/// - `C`: The checksum algorithm type (e.g., `Crc32C`)
#[derive(Clone, Debug)]
pub struct ChecksumReader<R, C: crate::Checksum> {
  inner: R,
  hasher: C,
}

impl<R, C: crate::Checksum> ChecksumReader<R, C> {
  /// Create a new reader wrapper with the default initial state.
  #[inline]
  #[must_use]
  pub fn new(inner: R) -> Self {
    Self { inner, hasher: C::new() }
  }

  /// Create a new reader wrapper seeded with a raw register value.
  #[inline]
  #[must_use]
  pub fn with_initial(inner: R, initial: C::Output) -> Self {
    Self {
      inner,
      hasher: C::with_initial(initial),
    }
  }

  /// Checksum of everything read so far. Further reads keep updating it.
  #[inline]
  #[must_use]
  pub fn crc(&self) -> C::Output {
    self.hasher.finalize()
  }

  /// Mutable access to the running hasher.
  #[inline]
  pub fn hasher_mut(&mut self) -> &mut C {
    &mut self.hasher
  }

  /// Unwrap, returning the inner reader and the checksum of everything read.
  #[inline]
  pub fn into_parts(self) -> (R, C::Output) {
    let crc = self.hasher.finalize();
    (self.inner, crc)
  }

  /// Unwrap, discarding the checksum.
  #[inline]
  pub fn into_inner(self) -> R {
    self.inner
  }

  #[inline]
  pub fn inner(&self) -> &R {
    &self.inner
  }

  /// Reading through this reference bypasses the checksum.
  #[inline]
  pub fn inner_mut(&mut self) -> &mut R {
    &mut self.inner
  }
}

impl<R: std::io::Read, C: crate::Checksum> std::io::Read for ChecksumReader<R, C> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
    let n = self.inner.read(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data);
    }
    Ok(n)
  }

  #[inline]
  fn read_vectored(&mut self, bufs: &mut [std::io::IoSliceMut<'_>]) -> std::io::Result<usize> {
    let n = self.inner.read_vectored(bufs)?;
    let hasher = &mut self.hasher;
    hash_prefix(bufs.iter().map(|b| &**b), n, |data| hasher.update(data));
    Ok(n)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Writer
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps a [`Write`](std::io::Write) and computes a checksum transparently.
///
/// The checksum is updated **after** the inner write returns, with only the
/// prefix the inner writer accepted. A failed write hashes nothing.
///
/// # Example
///
/// ```rust
/// # use traits::Checksum;
/// # #[derive(Clone, Default)]
/// # struct Sum(u32);
/// # impl Checksum for Sum {
/// #   const OUTPUT_SIZE: usize = 4;
/// #   type Output = u32;
/// #   fn new() -> Self { Self(0) }
/// #   fn with_initial(initial: Self::Output) -> Self { Self(initial) }
/// #   fn update(&mut self, data: &[u8]) {
/// #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(u32::from(b)));
/// #   }
/// #   fn finalize(&self) -> Self::Output { self.0 }
/// #   fn reset(&mut self) { self.0 = 0; }
/// # }
/// # use std::io::Write;
/// let mut writer = Sum::writer(Vec::new());
/// writer.write_all(b"hi")?;
/// let (out, checksum) = writer.into_parts();
/// assert_eq!(out, b"hi".to_vec());
/// assert_eq!(checksum, u32::from(b'h') + u32::from(b'i'));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ChecksumWriter<W, C: crate::Checksum> {
  inner: W,
  hasher: C,
}

impl<W, C: crate::Checksum> ChecksumWriter<W, C> {
  /// Create a new writer wrapper with the default initial state.
  #[inline]
  #[must_use]
  pub fn new(inner: W) -> Self {
    Self { inner, hasher: C::new() }
  }

  /// Create a new writer wrapper seeded with a raw register value.
  #[inline]
  #[must_use]
  pub fn with_initial(inner: W, initial: C::Output) -> Self {
    Self {
      inner,
      hasher: C::with_initial(initial),
    }
  }

  /// Checksum of everything written so far.
  #[inline]
  #[must_use]
  pub fn crc(&self) -> C::Output {
    self.hasher.finalize()
  }

  #[inline]
  pub fn hasher_mut(&mut self) -> &mut C {
    &mut self.hasher
  }

  /// Unwrap, returning the inner writer and the checksum of everything written.
  #[inline]
  pub fn into_parts(self) -> (W, C::Output) {
    let crc = self.hasher.finalize();
    (self.inner, crc)
  }

  #[inline]
  pub fn into_inner(self) -> W {
    self.inner
  }

  #[inline]
  pub fn inner(&self) -> &W {
    &self.inner
  }

  /// Writing through this reference bypasses the checksum.
  #[inline]
  pub fn inner_mut(&mut self) -> &mut W {
    &mut self.inner
  }
}

impl<W: std::io::Write, C: crate::Checksum> std::io::Write for ChecksumWriter<W, C> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    let n = self.inner.write(buf)?;
    if let Some(data) = buf.get(..n) {
      self.hasher.update(data);
    }
    Ok(n)
  }

  #[inline]
  fn write_vectored(&mut self, bufs: &[std::io::IoSlice<'_>]) -> std::io::Result<usize> {
    let n = self.inner.write_vectored(bufs)?;
    let hasher = &mut self.hasher;
    hash_prefix(bufs.iter().map(|b| &**b), n, |data| hasher.update(data));
    Ok(n)
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    self.inner.flush()
  }
}

#[cfg(test)]
mod tests {
  use std::{
    io::{IoSlice, IoSliceMut, Read, Write},
    vec,
    vec::Vec,
  };

  use crate::Checksum;

  /// Position-sensitive toy checksum so reordering would be caught.
  #[derive(Clone, Default, Debug)]
  struct Poly(u32);

  impl Checksum for Poly {
    const OUTPUT_SIZE: usize = 4;
    type Output = u32;

    fn new() -> Self {
      Self(0)
    }
    fn with_initial(initial: u32) -> Self {
      Self(initial)
    }
    fn update(&mut self, data: &[u8]) {
      for &b in data {
        self.0 = self.0.wrapping_mul(31).wrapping_add(u32::from(b));
      }
    }
    fn finalize(&self) -> u32 {
      self.0
    }
    fn reset(&mut self) {
      self.0 = 0;
    }
  }

  /// Accepts at most `limit` bytes per call.
  struct Trickle {
    out: Vec<u8>,
    limit: usize,
  }

  impl Write for Trickle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
      let n = buf.len().min(self.limit);
      self.out.extend_from_slice(&buf[..n]);
      Ok(n)
    }
    fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
    }
  }

  struct Failing;

  impl Write for Failing {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
      Err(std::io::Error::other("boom"))
    }
    fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn reader_hashes_everything_read() {
    let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    let mut reader = Poly::reader(&data[..]);
    let mut sink = Vec::new();
    reader.read_to_end(&mut sink).unwrap();
    assert_eq!(sink, data);
    assert_eq!(reader.crc(), Poly::checksum(&data));
  }

  #[test]
  fn reader_short_reads() {
    let data = b"the quick brown fox";
    let mut reader = Poly::reader(&data[..]);
    let mut buf = [0u8; 3];
    loop {
      let n = reader.read(&mut buf).unwrap();
      if n == 0 {
        break;
      }
    }
    let (_, crc) = reader.into_parts();
    assert_eq!(crc, Poly::checksum(data));
  }

  #[test]
  fn reader_vectored_hashes_only_filled_prefix() {
    let data = b"abcde";
    let mut reader = Poly::reader(&data[..]);
    let mut a = [0u8; 3];
    let mut b = [0u8; 8];
    let n = {
      let mut bufs = [IoSliceMut::new(&mut a), IoSliceMut::new(&mut b)];
      reader.read_vectored(&mut bufs).unwrap()
    };
    assert!(n <= data.len());
    assert_eq!(reader.crc(), Poly::checksum(&data[..n]));
  }

  #[test]
  fn writer_hashes_only_accepted_bytes() {
    let mut writer = Poly::writer(Trickle { out: Vec::new(), limit: 4 });
    let n = writer.write(b"0123456789").unwrap();
    assert_eq!(n, 4);
    assert_eq!(writer.crc(), Poly::checksum(b"0123"));

    writer.write_all(b"456789").unwrap();
    let (inner, crc) = writer.into_parts();
    assert_eq!(inner.out, b"0123456789".to_vec());
    assert_eq!(crc, Poly::checksum(b"0123456789"));
  }

  #[test]
  fn writer_vectored_partial() {
    let mut writer = Poly::writer(Trickle { out: Vec::new(), limit: 5 });
    let bufs = [IoSlice::new(b"abc"), IoSlice::new(b"defg")];
    let n = writer.write_vectored(&bufs).unwrap();
    // Default write_vectored forwards the first non-empty buffer only.
    assert_eq!(writer.crc(), Poly::checksum(&b"abcdefg"[..n]));
  }

  #[test]
  fn writer_failure_hashes_nothing() {
    let mut writer = Poly::writer(Failing);
    assert!(writer.write(b"data").is_err());
    assert_eq!(writer.crc(), Poly::new().finalize());
  }

  #[test]
  fn with_initial_seeds_adapters() {
    let reader = super::ChecksumReader::<_, Poly>::with_initial(&b""[..], 7);
    assert_eq!(reader.crc(), 7);
    let mut writer = super::ChecksumWriter::<_, Poly>::with_initial(vec![], 7);
    writer.write_all(b"x").unwrap();
    assert_eq!(writer.crc(), Poly::with_initial(7).finalize().wrapping_mul(31) + u32::from(b'x'));
  }
}
