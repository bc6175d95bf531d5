//! Data section byte source
//!
//! Positioned, read-only access to the payload bytes of an image.

use std::io;

/// Trait for reading bytes out of an image's data section
///
/// Offsets are relative to the start of the data section. Reads are
/// positioned: implementations must not keep a shared cursor, so several
/// callers can read different ranges through the same `&self` at once.
pub trait DataSource: Send + Sync {
    /// Reads up to `buf.len()` bytes starting at `offset`
    ///
    /// Returns the number of bytes read, `0` at or past the end of the source.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;

    /// Returns the length of the data section in bytes
    fn size(&self) -> u64;
}

impl DataSource for [u8] {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        if offset >= self.len() as u64 {
            return Ok(0);
        }

        let start = offset as usize;
        let n = buf.len().min(self.len() - start);
        buf[..n].copy_from_slice(&self[start..start + n]);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl DataSource for Vec<u8> {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        self.as_slice().read_at(offset, buf)
    }

    fn size(&self) -> u64 {
        self.len() as u64
    }
}
