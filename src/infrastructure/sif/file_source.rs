//! Positioned reads from an open image file

use crate::domain::repositories::DataSource;
use std::fs::File;
use std::io;

/// Data section of an open SIF file
///
/// Reads go through `pread` (or `seek_read` on Windows) so the file cursor is
/// never shared between callers.
pub struct FileDataSource {
    file: File,
    base: u64,
    size: u64,
}

impl FileDataSource {
    /// Wraps `file`, exposing `size` bytes starting at file offset `base`
    pub fn new(file: File, base: u64, size: u64) -> Self {
        Self { file, base, size }
    }

    #[cfg(unix)]
    fn read_file_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        rustix::io::pread(&self.file, buf, pos).map_err(io::Error::from)
    }

    #[cfg(windows)]
    fn read_file_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        use std::os::windows::fs::FileExt;
        self.file.seek_read(buf, pos)
    }

    #[cfg(not(any(unix, windows)))]
    fn read_file_at(&self, _pos: u64, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Positioned reads not supported on this platform",
        ))
    }
}

impl DataSource for FileDataSource {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        if offset >= self.size || buf.is_empty() {
            return Ok(0);
        }

        let n = (buf.len() as u64).min(self.size - offset) as usize;
        let pos = self.base.checked_add(offset).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "file offset overflows u64")
        })?;
        self.read_file_at(pos, &mut buf[..n])
    }

    fn size(&self) -> u64 {
        self.size
    }
}
