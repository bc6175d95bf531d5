//! Descriptor entity
//!
//! One slot of the descriptor table, describing a data object's identity,
//! type and byte range inside the data section.

use super::image::Arch;
use serde::{Serialize, Serializer};
use std::fmt;

fn serialize_display<T: fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode_upper(bytes))
}

/// Object type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Deffile,
    EnvVar,
    Labels,
    Partition,
    Signature,
    GenericJson,
    Generic,
    CryptoMessage,
    Sbom,
    OciRootIndex,
    OciBlob,
    Unknown(i32),
}

impl DataType {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0x4001 => DataType::Deffile,
            0x4002 => DataType::EnvVar,
            0x4003 => DataType::Labels,
            0x4004 => DataType::Partition,
            0x4005 => DataType::Signature,
            0x4006 => DataType::GenericJson,
            0x4007 => DataType::Generic,
            0x4008 => DataType::CryptoMessage,
            0x4009 => DataType::Sbom,
            0x400a => DataType::OciRootIndex,
            0x400b => DataType::OciBlob,
            other => DataType::Unknown(other),
        }
    }

    pub fn raw(&self) -> i32 {
        match self {
            DataType::Deffile => 0x4001,
            DataType::EnvVar => 0x4002,
            DataType::Labels => 0x4003,
            DataType::Partition => 0x4004,
            DataType::Signature => 0x4005,
            DataType::GenericJson => 0x4006,
            DataType::Generic => 0x4007,
            DataType::CryptoMessage => 0x4008,
            DataType::Sbom => 0x4009,
            DataType::OciRootIndex => 0x400a,
            DataType::OciBlob => 0x400b,
            DataType::Unknown(raw) => *raw,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Deffile => "Def.FILE",
            DataType::EnvVar => "Env.Vars",
            DataType::Labels => "JSON.Labels",
            DataType::Partition => "FS",
            DataType::Signature => "Signature",
            DataType::GenericJson => "JSON.Generic",
            DataType::Generic => "Generic/Raw",
            DataType::CryptoMessage => "Cryptographic Message",
            DataType::Sbom => "SBOM",
            DataType::OciRootIndex => "OCI.RootIndex",
            DataType::OciBlob => "OCI.Blob",
            DataType::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Filesystem held by a partition object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsType {
    Squashfs,
    Ext3,
    ImmutableObject,
    Raw,
    EncryptedSquashfs,
    Unknown(i32),
}

impl FsType {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => FsType::Squashfs,
            2 => FsType::Ext3,
            3 => FsType::ImmutableObject,
            4 => FsType::Raw,
            5 => FsType::EncryptedSquashfs,
            other => FsType::Unknown(other),
        }
    }
}

impl fmt::Display for FsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FsType::Squashfs => "Squashfs",
            FsType::Ext3 => "Ext3",
            FsType::ImmutableObject => "Data.Immutable",
            FsType::Raw => "Raw",
            FsType::EncryptedSquashfs => "Encrypted squashfs",
            FsType::Unknown(_) => "Unknown",
        })
    }
}

/// Role of a partition object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartType {
    System,
    PrimarySystem,
    Data,
    Overlay,
    Unknown(i32),
}

impl PartType {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => PartType::System,
            2 => PartType::PrimarySystem,
            3 => PartType::Data,
            4 => PartType::Overlay,
            other => PartType::Unknown(other),
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PartType::System => "System",
            PartType::PrimarySystem => "*System",
            PartType::Data => "Data",
            PartType::Overlay => "Overlay",
            PartType::Unknown(_) => "Unknown",
        })
    }
}

/// Digest used by a signature object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    Sha256,
    Sha384,
    Sha512,
    Blake2s,
    Blake2b,
    Unknown(i32),
}

impl HashType {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => HashType::Sha256,
            2 => HashType::Sha384,
            3 => HashType::Sha512,
            4 => HashType::Blake2s,
            5 => HashType::Blake2b,
            other => HashType::Unknown(other),
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HashType::Sha256 => "SHA256",
            HashType::Sha384 => "SHA384",
            HashType::Sha512 => "SHA512",
            HashType::Blake2s => "BLAKE2S",
            HashType::Blake2b => "BLAKE2B",
            HashType::Unknown(_) => "Unknown",
        })
    }
}

/// Encoding of a cryptographic message object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    OpenPgp,
    Pem,
    Unknown(i32),
}

impl FormatType {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => FormatType::OpenPgp,
            2 => FormatType::Pem,
            other => FormatType::Unknown(other),
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormatType::OpenPgp => "OpenPGP",
            FormatType::Pem => "PEM",
            FormatType::Unknown(_) => "Unknown",
        })
    }
}

/// Kind of a cryptographic message object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    ClearSignature,
    RsaOaep,
    Unknown(i32),
}

impl MessageType {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0x100 => MessageType::ClearSignature,
            0x200 => MessageType::RsaOaep,
            other => MessageType::Unknown(other),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MessageType::ClearSignature => "Clear Signature",
            MessageType::RsaOaep => "RSA-OAEP",
            MessageType::Unknown(_) => "Unknown",
        })
    }
}

/// Document format of an SBOM object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbomFormat {
    CycloneDxJson,
    CycloneDxXml,
    GithubJson,
    SpdxJson,
    SpdxRdf,
    SpdxTagValue,
    SpdxYaml,
    SyftJson,
    Unknown(i32),
}

impl SbomFormat {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => SbomFormat::CycloneDxJson,
            2 => SbomFormat::CycloneDxXml,
            3 => SbomFormat::GithubJson,
            4 => SbomFormat::SpdxJson,
            5 => SbomFormat::SpdxRdf,
            6 => SbomFormat::SpdxTagValue,
            7 => SbomFormat::SpdxYaml,
            8 => SbomFormat::SyftJson,
            other => SbomFormat::Unknown(other),
        }
    }
}

impl fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SbomFormat::CycloneDxJson => "cyclonedx-json",
            SbomFormat::CycloneDxXml => "cyclonedx-xml",
            SbomFormat::GithubJson => "github-json",
            SbomFormat::SpdxJson => "spdx-json",
            SbomFormat::SpdxRdf => "spdx-rdf",
            SbomFormat::SpdxTagValue => "spdx-tag-value",
            SbomFormat::SpdxYaml => "spdx-yaml",
            SbomFormat::SyftJson => "syft-json",
            SbomFormat::Unknown(_) => "unknown",
        })
    }
}

/// Reference from one descriptor to another object or to a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Link {
    #[default]
    None,
    Object(u32),
    Group(u32),
}

/// Type-specific attributes carried in a slot's extra area
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeInfo {
    #[default]
    None,
    Partition {
        #[serde(serialize_with = "serialize_display")]
        fs_type: FsType,
        #[serde(serialize_with = "serialize_display")]
        part_type: PartType,
        arch: Arch,
    },
    Signature {
        #[serde(serialize_with = "serialize_display")]
        hash_type: HashType,
        /// Signing entity fingerprint
        #[serde(serialize_with = "serialize_hex")]
        entity: Vec<u8>,
    },
    CryptoMessage {
        #[serde(serialize_with = "serialize_display")]
        format_type: FormatType,
        #[serde(serialize_with = "serialize_display")]
        message_type: MessageType,
    },
    Sbom {
        #[serde(serialize_with = "serialize_display")]
        format: SbomFormat,
    },
}

impl TypeInfo {
    pub fn is_none(&self) -> bool {
        matches!(self, TypeInfo::None)
    }
}

/// One descriptor table slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Unique while the slot is occupied
    pub id: u32,
    #[serde(rename = "type", serialize_with = "serialize_display")]
    pub data_type: DataType,
    #[serde(skip)]
    pub used: bool,
    /// Zero when the object belongs to no group
    pub group_id: u32,
    pub link: Link,
    /// Offset from the start of the data section
    pub offset: u64,
    /// Exact payload length in bytes
    pub size: u64,
    pub size_with_padding: u64,
    pub created_at: i64,
    pub modified_at: i64,
    pub name: String,
    #[serde(skip_serializing_if = "TypeInfo::is_none")]
    pub type_info: TypeInfo,
}

impl Descriptor {
    /// Creates an occupied slot with no group, link, name or extras
    pub fn new(id: u32, data_type: DataType, offset: u64, size: u64) -> Self {
        Self {
            id,
            data_type,
            used: true,
            group_id: 0,
            link: Link::None,
            offset,
            size,
            size_with_padding: size,
            created_at: 0,
            modified_at: 0,
            name: String::new(),
            type_info: TypeInfo::None,
        }
    }

    pub fn with_group(mut self, group_id: u32) -> Self {
        self.group_id = group_id;
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.link = link;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_type_info(mut self, type_info: TypeInfo) -> Self {
        self.type_info = type_info;
        self
    }
}
