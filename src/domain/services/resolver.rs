//! Descriptor resolution
//!
//! Maps a numeric ID to its occupied slot and opens a bounded reader over the
//! slot's payload bytes.

use crate::core::error::{Result, SifError};
use crate::domain::entities::{Descriptor, Image};
use crate::domain::repositories::DataSource;
use std::io::{self, Read};

/// Finds the occupied slot whose ID equals `id`
pub fn find_descriptor(image: &Image, id: u32) -> Result<&Descriptor> {
    image
        .occupied()
        .find(|d| d.id == id)
        .ok_or(SifError::NotFound(id))
}

/// Resolves `id` and returns the descriptor with a reader over its payload
pub fn resolve<'a, S>(
    image: &'a Image,
    source: &'a S,
    id: u32,
) -> Result<(&'a Descriptor, PayloadReader<'a, S>)>
where
    S: DataSource + ?Sized,
{
    let descriptor = find_descriptor(image, id)?;
    tracing::debug!(
        id,
        offset = descriptor.offset,
        size = descriptor.size,
        "resolved descriptor"
    );
    Ok((descriptor, PayloadReader::new(source, descriptor)))
}

/// Reader limited to one descriptor's byte range
///
/// Each read is a positioned read against the source, so readers for
/// different descriptors never share a cursor. Reading stops at the recorded
/// payload length even when the source holds more bytes after it.
pub struct PayloadReader<'a, S: DataSource + ?Sized> {
    source: &'a S,
    start: u64,
    len: u64,
    pos: u64,
}

impl<'a, S: DataSource + ?Sized> PayloadReader<'a, S> {
    pub fn new(source: &'a S, descriptor: &Descriptor) -> Self {
        Self {
            source,
            start: descriptor.offset,
            len: descriptor.size,
            pos: 0,
        }
    }

    /// Bytes left before the end of the payload
    pub fn remaining(&self) -> u64 {
        self.len - self.pos
    }
}

impl<S: DataSource + ?Sized> Read for PayloadReader<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let want = (buf.len() as u64).min(remaining) as usize;
        let offset = self.start.checked_add(self.pos).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "payload offset overflows u64")
        })?;
        let n = self.source.read_at(offset, &mut buf[..want])?;
        self.pos += n as u64;
        Ok(n)
    }
}
