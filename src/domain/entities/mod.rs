//! Domain entities
//!
//! The decoded image header and descriptor table.

mod descriptor;
mod image;

pub use descriptor::{
    DataType, Descriptor, FormatType, FsType, HashType, Link, MessageType, PartType, SbomFormat,
    TypeInfo,
};
pub use image::{Arch, Image};
