//! Payload extraction
//!
//! Streams exactly one descriptor's payload to an output sink.

use super::resolver::{PayloadReader, resolve};
use crate::core::error::{Result, SifError};
use crate::domain::entities::{Descriptor, Image};
use crate::domain::repositories::DataSource;
use std::io::{ErrorKind, Read, Write};

pub const DEFAULT_COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Copies exactly `descriptor.size` bytes from `reader` to `sink`
///
/// Bytes written before a failure stay written. A source that runs dry
/// before the declared length is reached yields [`SifError::ShortRead`].
pub fn copy_payload<S, W>(
    descriptor: &Descriptor,
    reader: &mut PayloadReader<'_, S>,
    sink: &mut W,
    buffer_size: usize,
) -> Result<u64>
where
    S: DataSource + ?Sized,
    W: Write + ?Sized,
{
    let expected = descriptor.size;
    let buffer_len = (buffer_size.max(1) as u64).min(expected.max(1)) as usize;
    let mut buffer = vec![0u8; buffer_len];
    let mut copied = 0u64;

    while copied < expected {
        let want = (expected - copied).min(buffer.len() as u64) as usize;
        let n = match reader.read(&mut buffer[..want]) {
            Ok(0) => {
                tracing::warn!(
                    id = descriptor.id,
                    expected,
                    actual = copied,
                    "source ended before payload end"
                );
                return Err(SifError::ShortRead {
                    id: descriptor.id,
                    expected,
                    actual: copied,
                });
            }
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        sink.write_all(&buffer[..n])?;
        copied += n as u64;
    }

    sink.flush()?;
    Ok(copied)
}

/// Resolves `id` and writes its payload to `sink`
///
/// Returns the number of bytes written. An unknown ID fails before anything
/// reaches the sink.
pub fn extract<S, W>(
    image: &Image,
    source: &S,
    id: u32,
    sink: &mut W,
    buffer_size: usize,
) -> Result<u64>
where
    S: DataSource + ?Sized,
    W: Write + ?Sized,
{
    let (descriptor, mut reader) = resolve(image, source, id)?;
    let copied = copy_payload(descriptor, &mut reader, sink, buffer_size)?;
    tracing::debug!(id, bytes = copied, "extracted payload");
    Ok(copied)
}
