//! Loader for SIF files on disk

use super::descriptor::RawDescriptor;
use super::file_source::FileDataSource;
use super::header::RawHeader;
use super::{DESCRIPTOR_SIZE, HEADER_SIZE};
use crate::domain::entities::Image;
use crate::domain::repositories::{ImageLoader, LoadError};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Opens SIF files read-only and decodes their header and descriptor table
///
/// # Example
///
/// ```ignore
/// let loader = FileImageLoader::new();
/// let (image, source) = loader.load(Path::new("alpine.sif"))?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageLoader;

impl FileImageLoader {
    pub fn new() -> Self {
        Self
    }

    fn read_region(
        file: &mut File,
        file_size: u64,
        offset: u64,
        len: u64,
        what: &'static str,
    ) -> Result<Vec<u8>, LoadError> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| LoadError::InvalidLayout(format!("{what} extent overflows u64")))?;
        if end > file_size {
            return Err(LoadError::Truncated {
                what,
                needed: end,
                available: file_size,
            });
        }

        let mut buf = vec![0u8; len as usize];
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn check_extent(
        what: &'static str,
        offset: u64,
        size: u64,
        file_size: u64,
    ) -> Result<(), LoadError> {
        match offset.checked_add(size) {
            Some(end) if end <= file_size => Ok(()),
            Some(end) => Err(LoadError::Truncated {
                what,
                needed: end,
                available: file_size,
            }),
            None => Err(LoadError::InvalidLayout(format!("{what} extent overflows u64"))),
        }
    }

    fn decode(file: &mut File, file_size: u64) -> Result<Image, LoadError> {
        let header_bytes = Self::read_region(file, file_size, 0, HEADER_SIZE as u64, "header")?;
        let mut image = RawHeader::parse(&header_bytes)?.to_image()?;

        Self::check_extent(
            "descriptor section",
            image.descriptors_offset,
            image.descriptors_size,
            file_size,
        )?;
        Self::check_extent("data section", image.data_offset, image.data_size, file_size)?;

        let table_len = image
            .descriptors_total
            .checked_mul(DESCRIPTOR_SIZE as u64)
            .filter(|len| *len <= image.descriptors_size)
            .ok_or_else(|| {
                LoadError::InvalidLayout(format!(
                    "{} descriptors do not fit a {} byte section",
                    image.descriptors_total, image.descriptors_size
                ))
            })?;

        let table = Self::read_region(
            file,
            file_size,
            image.descriptors_offset,
            table_len,
            "descriptor table",
        )?;

        let mut seen = HashSet::new();
        let mut descriptors = Vec::with_capacity(image.descriptors_total as usize);
        for slot in table.chunks_exact(DESCRIPTOR_SIZE) {
            let descriptor = RawDescriptor::parse(slot)?
                .to_descriptor(image.data_offset, image.data_size)?;

            if descriptor.used && !seen.insert(descriptor.id) {
                return Err(LoadError::InvalidLayout(format!(
                    "descriptor ID {} used by more than one slot",
                    descriptor.id
                )));
            }
            descriptors.push(descriptor);
        }

        image.descriptors = descriptors;
        Ok(image)
    }
}

impl ImageLoader for FileImageLoader {
    type Source = FileDataSource;

    fn load(&self, path: &Path) -> Result<(Image, FileDataSource), LoadError> {
        let mut file = OpenOptions::new().read(true).open(path)?;
        let file_size = file.metadata()?.len();

        let image = Self::decode(&mut file, file_size)?;

        tracing::debug!(
            path = %path.display(),
            id = %image.id,
            slots = image.descriptors.len(),
            occupied = image.occupied_count(),
            "loaded image"
        );

        let source = FileDataSource::new(file, image.data_offset, image.data_size);
        Ok((image, source))
    }
}
