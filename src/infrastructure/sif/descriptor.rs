//! Descriptor slot decoding

use super::{DESCRIPTOR_SIZE, GROUP_MASK, trim_nul};
use crate::domain::entities::{
    Arch, DataType, Descriptor, FormatType, FsType, HashType, Link, MessageType, PartType,
    SbomFormat, TypeInfo,
};
use crate::domain::repositories::LoadError;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

const NAME_LEN: usize = 128;
const EXTRA_LEN: usize = 384;

/// Length of the signing key fingerprint kept from the entity field
const FINGERPRINT_LEN: usize = 20;

/// Descriptor slot exactly as stored on disk
#[derive(Debug, Clone)]
pub(crate) struct RawDescriptor {
    pub data_type: i32,
    pub used: bool,
    pub id: u32,
    pub group_id: u32,
    pub linked_id: u32,
    pub offset: i64,
    pub size: i64,
    pub size_with_padding: i64,
    pub created_at: i64,
    pub modified_at: i64,
    pub name: [u8; NAME_LEN],
    pub extra: [u8; EXTRA_LEN],
}

impl RawDescriptor {
    pub fn parse(data: &[u8]) -> Result<Self, LoadError> {
        if data.len() < DESCRIPTOR_SIZE {
            return Err(LoadError::Truncated {
                what: "descriptor slot",
                needed: DESCRIPTOR_SIZE as u64,
                available: data.len() as u64,
            });
        }

        let mut cursor = Cursor::new(data);
        let data_type = cursor.read_i32::<LittleEndian>()?;
        let used = cursor.read_u8()? != 0;
        let id = cursor.read_u32::<LittleEndian>()?;
        let group_id = cursor.read_u32::<LittleEndian>()?;
        let linked_id = cursor.read_u32::<LittleEndian>()?;
        let offset = cursor.read_i64::<LittleEndian>()?;
        let size = cursor.read_i64::<LittleEndian>()?;
        let size_with_padding = cursor.read_i64::<LittleEndian>()?;
        let created_at = cursor.read_i64::<LittleEndian>()?;
        let modified_at = cursor.read_i64::<LittleEndian>()?;

        // Skip the deprecated uid/gid pair
        cursor.set_position(73);
        let mut name = [0u8; NAME_LEN];
        cursor.read_exact(&mut name)?;
        let mut extra = [0u8; EXTRA_LEN];
        cursor.read_exact(&mut extra)?;

        Ok(Self {
            data_type,
            used,
            id,
            group_id,
            linked_id,
            offset,
            size,
            size_with_padding,
            created_at,
            modified_at,
            name,
            extra,
        })
    }

    /// Converts to a domain descriptor with a data-section-relative offset
    ///
    /// Occupied slots must lie inside `[data_offset, data_offset + data_size)`.
    pub fn to_descriptor(
        &self,
        data_offset: u64,
        data_size: u64,
    ) -> Result<Descriptor, LoadError> {
        let data_type = DataType::from_raw(self.data_type);
        let link = if self.linked_id == 0 {
            Link::None
        } else if self.linked_id & GROUP_MASK == GROUP_MASK {
            Link::Group(self.linked_id & !GROUP_MASK)
        } else {
            Link::Object(self.linked_id)
        };

        let mut descriptor = Descriptor {
            id: self.id,
            data_type,
            used: self.used,
            group_id: self.group_id & !GROUP_MASK,
            link,
            offset: 0,
            size: 0,
            size_with_padding: 0,
            created_at: self.created_at,
            modified_at: self.modified_at,
            name: trim_nul(&self.name),
            type_info: self.type_info(data_type)?,
        };

        if !self.used {
            return Ok(descriptor);
        }

        let invalid =
            |msg: String| LoadError::InvalidLayout(format!("descriptor {}: {msg}", self.id));
        let offset = u64::try_from(self.offset)
            .map_err(|_| invalid(format!("negative offset {}", self.offset)))?;
        let size =
            u64::try_from(self.size).map_err(|_| invalid(format!("negative size {}", self.size)))?;
        let data_end = data_offset.saturating_add(data_size);
        let end = offset
            .checked_add(size)
            .ok_or_else(|| invalid("range overflows u64".to_string()))?;

        if offset < data_offset || end > data_end {
            return Err(invalid(format!(
                "range {offset}-{end} outside data section {data_offset}-{data_end}"
            )));
        }

        descriptor.offset = offset - data_offset;
        descriptor.size = size;
        descriptor.size_with_padding = u64::try_from(self.size_with_padding).unwrap_or(size);
        Ok(descriptor)
    }

    fn type_info(&self, data_type: DataType) -> Result<TypeInfo, LoadError> {
        let mut cursor = Cursor::new(&self.extra[..]);

        let info = match data_type {
            DataType::Partition => {
                let fs_type = FsType::from_raw(cursor.read_i32::<LittleEndian>()?);
                let part_type = PartType::from_raw(cursor.read_i32::<LittleEndian>()?);
                let mut arch = [0u8; 3];
                cursor.read_exact(&mut arch)?;
                TypeInfo::Partition {
                    fs_type,
                    part_type,
                    arch: Arch::from_code(&trim_nul(&arch)),
                }
            }
            DataType::Signature => {
                let hash_type = HashType::from_raw(cursor.read_i32::<LittleEndian>()?);
                let mut entity = vec![0u8; FINGERPRINT_LEN];
                cursor.read_exact(&mut entity)?;
                TypeInfo::Signature { hash_type, entity }
            }
            DataType::CryptoMessage => TypeInfo::CryptoMessage {
                format_type: FormatType::from_raw(cursor.read_i32::<LittleEndian>()?),
                message_type: MessageType::from_raw(cursor.read_i32::<LittleEndian>()?),
            },
            DataType::Sbom => TypeInfo::Sbom {
                format: SbomFormat::from_raw(cursor.read_i32::<LittleEndian>()?),
            },
            _ => TypeInfo::None,
        };

        Ok(info)
    }
}
