//! Image entity
//!
//! The decoded view of one SIF file: its global header and descriptor table.

use super::descriptor::Descriptor;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Architecture codes stored in the header, paired with their display names
const ARCH_NAMES: [(&str, &str); 13] = [
    ("00", "unknown"),
    ("01", "386"),
    ("02", "amd64"),
    ("03", "arm"),
    ("04", "arm64"),
    ("05", "ppc64"),
    ("06", "ppc64le"),
    ("07", "mips"),
    ("08", "mipsle"),
    ("09", "mips64"),
    ("10", "mips64le"),
    ("11", "s390x"),
    ("12", "riscv64"),
];

/// Target architecture tag as stored on disk (a two-digit code)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arch {
    code: String,
}

impl Arch {
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
        }
    }

    /// Looks up the code for a name such as `amd64`
    pub fn from_name(name: &str) -> Option<Self> {
        ARCH_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(code, _)| Self::from_code(code))
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &'static str {
        ARCH_NAMES
            .iter()
            .find(|(code, _)| *code == self.code)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }
}

impl Default for Arch {
    fn default() -> Self {
        Self::from_code("00")
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Arch {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Decoded container image
///
/// Owned by the loader for the lifetime of one open-use-close scope. Nothing in
/// this crate mutates it, so shared references may be used from several
/// threads at once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Image {
    /// Launch script, NUL padding already removed
    pub launch_script: String,
    pub version: String,
    pub arch: Arch,
    pub id: Uuid,
    /// Unix seconds
    pub created_at: i64,
    /// Unix seconds
    pub modified_at: i64,
    pub descriptors_free: u64,
    pub descriptors_total: u64,
    pub descriptors_offset: u64,
    pub descriptors_size: u64,
    pub data_offset: u64,
    pub data_size: u64,
    /// Every slot of the descriptor table, occupied or free, in slot order
    #[serde(skip)]
    pub descriptors: Vec<Descriptor>,
}

impl Image {
    /// Launch script with a single trailing newline stripped
    pub fn launch_script_display(&self) -> &str {
        let script = self.launch_script.as_str();
        script.strip_suffix('\n').unwrap_or(script)
    }

    /// Occupied slots in slot order
    pub fn occupied(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter().filter(|d| d.used)
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Absolute file offset of a position inside the data section
    pub fn file_offset(&self, data_offset: u64) -> u64 {
        self.data_offset.saturating_add(data_offset)
    }
}
