//! Test-only SIF image writer
//!
//! Lays out a header, a descriptor table and a data section so integration
//! tests can exercise the file loader end to end.

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER_SIZE: usize = 128;
pub const DESCRIPTOR_SIZE: usize = 585;
pub const GROUP_MASK: u32 = 0xf000_0000;
pub const DESCRIPTORS_OFFSET: u64 = 4096;
pub const GAP_BYTE: u8 = 0xEE;

pub const DATA_DEFFILE: i32 = 0x4001;
pub const DATA_LABELS: i32 = 0x4003;
pub const DATA_PARTITION: i32 = 0x4004;
pub const DATA_SIGNATURE: i32 = 0x4005;
pub const DATA_GENERIC: i32 = 0x4007;
pub const DATA_CRYPTO_MESSAGE: i32 = 0x4008;
pub const DATA_SBOM: i32 = 0x4009;

#[derive(Debug, Clone)]
pub struct FixtureObject {
    pub id: u32,
    pub data_type: i32,
    pub group: u32,
    pub link: u32,
    pub name: String,
    pub extra: Vec<u8>,
    pub data: Vec<u8>,
}

impl FixtureObject {
    pub fn new(id: u32, data_type: i32, data: &[u8]) -> Self {
        Self {
            id,
            data_type,
            group: 0,
            link: 0,
            name: String::new(),
            extra: Vec::new(),
            data: data.to_vec(),
        }
    }

    pub fn group(mut self, group: u32) -> Self {
        self.group = group;
        self
    }

    pub fn link(mut self, raw_link: u32) -> Self {
        self.link = raw_link;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn extra(mut self, extra: Vec<u8>) -> Self {
        self.extra = extra;
        self
    }
}

pub fn partition_extra(fs_type: i32, part_type: i32, arch: &str) -> Vec<u8> {
    let mut extra = Vec::new();
    extra.extend_from_slice(&fs_type.to_le_bytes());
    extra.extend_from_slice(&part_type.to_le_bytes());
    extra.extend_from_slice(arch.as_bytes());
    extra.push(0);
    extra
}

pub fn crypto_message_extra(format_type: i32, message_type: i32) -> Vec<u8> {
    let mut extra = Vec::new();
    extra.extend_from_slice(&format_type.to_le_bytes());
    extra.extend_from_slice(&message_type.to_le_bytes());
    extra
}

pub fn signature_extra(hash_type: i32, fingerprint: &[u8]) -> Vec<u8> {
    let mut extra = Vec::new();
    extra.extend_from_slice(&hash_type.to_le_bytes());
    extra.extend_from_slice(fingerprint);
    extra
}

#[derive(Debug, Clone)]
pub struct SifFixture {
    pub launch: String,
    pub arch: String,
    pub id: [u8; 16],
    pub created_at: i64,
    pub modified_at: i64,
    pub slots: usize,
    pub descriptors_size: Option<u64>,
    pub data_size: Option<u64>,
    pub gap: usize,
    pub objects: Vec<FixtureObject>,
}

impl Default for SifFixture {
    fn default() -> Self {
        Self {
            launch: "#!/usr/bin/env run-singularity\n".to_string(),
            arch: "02".to_string(),
            id: [
                0x5c, 0x2a, 0x4a, 0x1e, 0x1f, 0x21, 0x4f, 0x0b, 0x9b, 0x6e, 0x3c, 0x1d, 0x7a,
                0x8e, 0x44, 0x01,
            ],
            created_at: 1_600_000_000,
            modified_at: 1_600_000_600,
            slots: 8,
            descriptors_size: None,
            data_size: None,
            gap: 0,
            objects: Vec::new(),
        }
    }
}

impl SifFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(mut self, object: FixtureObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn slots(mut self, slots: usize) -> Self {
        self.slots = slots;
        self
    }

    pub fn descriptors_size(mut self, size: u64) -> Self {
        self.descriptors_size = Some(size);
        self
    }

    pub fn data_size(mut self, size: u64) -> Self {
        self.data_size = Some(size);
        self
    }

    /// Filler bytes placed between consecutive payloads
    pub fn gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    pub fn data_offset(&self) -> u64 {
        let end = DESCRIPTORS_OFFSET + self.descriptor_section_size();
        end.div_ceil(4096) * 4096
    }

    fn descriptor_section_size(&self) -> u64 {
        let table = (self.slots * DESCRIPTOR_SIZE) as u64;
        self.descriptors_size.unwrap_or(table).max(table)
    }

    pub fn build(&self) -> Vec<u8> {
        assert!(self.objects.len() <= self.slots, "more objects than slots");

        let mut data = Vec::new();
        let mut placements = Vec::new();
        for object in &self.objects {
            if !data.is_empty() {
                data.extend(std::iter::repeat_n(GAP_BYTE, self.gap));
            }
            placements.push(data.len() as u64);
            data.extend_from_slice(&object.data);
        }
        let data_size = self.data_size.unwrap_or(data.len() as u64);
        assert!(data_size >= data.len() as u64, "payloads exceed data size");
        data.resize(data_size as usize, GAP_BYTE);

        let data_offset = self.data_offset();
        let mut file = vec![0u8; data_offset as usize];

        let header = &mut file[..HEADER_SIZE];
        let launch = self.launch.as_bytes();
        header[..launch.len()].copy_from_slice(launch);
        header[32..42].copy_from_slice(b"SIF_MAGIC\0");
        header[42..45].copy_from_slice(b"01\0");
        header[45..47].copy_from_slice(self.arch.as_bytes());
        header[48..64].copy_from_slice(&self.id);
        let fields: [i64; 8] = [
            self.created_at,
            self.modified_at,
            (self.slots - self.objects.len()) as i64,
            self.slots as i64,
            DESCRIPTORS_OFFSET as i64,
            self.descriptor_section_size() as i64,
            data_offset as i64,
            data_size as i64,
        ];
        for (i, value) in fields.iter().enumerate() {
            header[64 + i * 8..72 + i * 8].copy_from_slice(&value.to_le_bytes());
        }

        for (i, (object, placement)) in self.objects.iter().zip(&placements).enumerate() {
            let start = DESCRIPTORS_OFFSET as usize + i * DESCRIPTOR_SIZE;
            let slot = &mut file[start..start + DESCRIPTOR_SIZE];
            let offset = (data_offset + placement) as i64;
            let size = object.data.len() as i64;

            slot[0..4].copy_from_slice(&object.data_type.to_le_bytes());
            slot[4] = 1;
            slot[5..9].copy_from_slice(&object.id.to_le_bytes());
            let group = if object.group == 0 {
                GROUP_MASK
            } else {
                GROUP_MASK | object.group
            };
            slot[9..13].copy_from_slice(&group.to_le_bytes());
            slot[13..17].copy_from_slice(&object.link.to_le_bytes());
            slot[17..25].copy_from_slice(&offset.to_le_bytes());
            slot[25..33].copy_from_slice(&size.to_le_bytes());
            slot[33..41].copy_from_slice(&size.to_le_bytes());
            slot[41..49].copy_from_slice(&self.created_at.to_le_bytes());
            slot[49..57].copy_from_slice(&self.modified_at.to_le_bytes());
            slot[73..73 + object.name.len()].copy_from_slice(object.name.as_bytes());
            slot[201..201 + object.extra.len()].copy_from_slice(&object.extra);
        }

        file.extend_from_slice(&data);
        file
    }

    pub fn write(&self) -> NamedTempFile {
        write_bytes(&self.build())
    }
}

pub fn write_bytes(bytes: &[u8]) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(bytes).unwrap();
    temp.flush().unwrap();
    temp
}

/// Byte offset of descriptor slot `index` inside a built image
pub fn slot_offset(index: usize) -> usize {
    DESCRIPTORS_OFFSET as usize + index * DESCRIPTOR_SIZE
}
