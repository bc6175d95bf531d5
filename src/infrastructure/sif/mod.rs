//! SIF file loader
//!
//! Reference implementation of the loader seam for Singularity Image Format
//! files. Only structure is checked; magic bytes and signatures are not.

mod descriptor;
mod file_loader;
mod file_source;
mod header;

pub use file_loader::FileImageLoader;
pub use file_source::FileDataSource;

/// Global header size in bytes
pub const HEADER_SIZE: usize = 128;

/// Size of one descriptor table slot in bytes
pub const DESCRIPTOR_SIZE: usize = 585;

/// High bits marking a group ID
pub const GROUP_MASK: u32 = 0xf000_0000;

/// Decodes a NUL-padded byte field
pub(crate) fn trim_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
