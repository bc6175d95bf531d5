//! Global header decoding

use super::{HEADER_SIZE, trim_nul};
use crate::domain::entities::{Arch, Image};
use crate::domain::repositories::LoadError;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use uuid::Uuid;

/// Global header exactly as stored on disk
#[derive(Debug, Clone)]
pub(crate) struct RawHeader {
    pub launch: [u8; 32],
    pub version: [u8; 3],
    pub arch: [u8; 3],
    pub id: [u8; 16],
    pub created_at: i64,
    pub modified_at: i64,
    pub descriptors_free: i64,
    pub descriptors_total: i64,
    pub descriptors_offset: i64,
    pub descriptors_size: i64,
    pub data_offset: i64,
    pub data_size: i64,
}

fn field(name: &'static str, value: i64) -> Result<u64, LoadError> {
    u64::try_from(value)
        .map_err(|_| LoadError::InvalidLayout(format!("negative header field {name}: {value}")))
}

impl RawHeader {
    /// Parses the header from the first bytes of the file
    pub fn parse(data: &[u8]) -> Result<Self, LoadError> {
        if data.len() < HEADER_SIZE {
            return Err(LoadError::Truncated {
                what: "header",
                needed: HEADER_SIZE as u64,
                available: data.len() as u64,
            });
        }

        let mut cursor = Cursor::new(data);
        let mut launch = [0u8; 32];
        cursor.read_exact(&mut launch)?;

        // Magic is not checked
        cursor.set_position(42);
        let mut version = [0u8; 3];
        cursor.read_exact(&mut version)?;
        let mut arch = [0u8; 3];
        cursor.read_exact(&mut arch)?;
        let mut id = [0u8; 16];
        cursor.read_exact(&mut id)?;

        Ok(Self {
            launch,
            version,
            arch,
            id,
            created_at: cursor.read_i64::<LittleEndian>()?,
            modified_at: cursor.read_i64::<LittleEndian>()?,
            descriptors_free: cursor.read_i64::<LittleEndian>()?,
            descriptors_total: cursor.read_i64::<LittleEndian>()?,
            descriptors_offset: cursor.read_i64::<LittleEndian>()?,
            descriptors_size: cursor.read_i64::<LittleEndian>()?,
            data_offset: cursor.read_i64::<LittleEndian>()?,
            data_size: cursor.read_i64::<LittleEndian>()?,
        })
    }

    /// Converts to the domain image, without descriptors
    pub fn to_image(&self) -> Result<Image, LoadError> {
        Ok(Image {
            launch_script: trim_nul(&self.launch),
            version: trim_nul(&self.version),
            arch: Arch::from_code(&trim_nul(&self.arch)),
            id: Uuid::from_bytes(self.id),
            created_at: self.created_at,
            modified_at: self.modified_at,
            descriptors_free: field("descriptors free", self.descriptors_free)?,
            descriptors_total: field("descriptors total", self.descriptors_total)?,
            descriptors_offset: field("descriptors offset", self.descriptors_offset)?,
            descriptors_size: field("descriptors size", self.descriptors_size)?,
            data_offset: field("data offset", self.data_offset)?,
            data_size: field("data size", self.data_size)?,
            descriptors: Vec::new(),
        })
    }
}
