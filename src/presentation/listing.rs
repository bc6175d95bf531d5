//! Summary listing of an image's occupied descriptors

use super::fields::format_timestamp;
use crate::domain::entities::{Descriptor, Image, Link, TypeInfo};
use serde::Serialize;
use std::io::{self, Write};

const SEPARATOR: &str = "----------------------------------------------------";
const ROW_SEPARATOR: &str =
    "------------------------------------------------------------------------------";

/// TYPE column text, with type-specific attributes in parentheses
pub fn type_summary(descriptor: &Descriptor) -> String {
    let name = descriptor.data_type.name();
    match &descriptor.type_info {
        TypeInfo::None => name.to_string(),
        TypeInfo::Partition {
            fs_type,
            part_type,
            arch,
        } => format!("{name} ({fs_type}/{part_type}/{arch})"),
        TypeInfo::Signature { hash_type, .. } => format!("{name} ({hash_type})"),
        TypeInfo::CryptoMessage {
            format_type,
            message_type,
        } => format!("{name} ({format_type}/{message_type})"),
        TypeInfo::Sbom { format } => format!("{name} ({format})"),
    }
}

fn group_column(descriptor: &Descriptor) -> String {
    match descriptor.group_id {
        0 => "NONE".to_string(),
        id => id.to_string(),
    }
}

fn link_column(descriptor: &Descriptor) -> String {
    match descriptor.link {
        Link::None => "NONE".to_string(),
        Link::Object(id) => id.to_string(),
        Link::Group(id) => format!("{id:<3} (G)"),
    }
}

/// Writes the container summary followed by one row per occupied slot
pub fn write_listing<W: Write + ?Sized>(sink: &mut W, image: &Image) -> io::Result<()> {
    writeln!(sink, "Container id: {}", image.id)?;
    writeln!(sink, "Created on:   {}", format_timestamp(image.created_at))?;
    writeln!(sink, "Modified on:  {}", format_timestamp(image.modified_at))?;
    writeln!(sink, "{SEPARATOR}")?;

    writeln!(sink, "Descriptor list:")?;
    writeln!(
        sink,
        "{:<4} {:<8} {:<8} {:<26} {}",
        "ID", "|GROUP", "|LINK", "|SIF POSITION (start-end)", "|TYPE"
    )?;
    writeln!(sink, "{ROW_SEPARATOR}")?;

    for descriptor in image.occupied() {
        let start = image.file_offset(descriptor.offset);
        let end = start.saturating_add(descriptor.size);
        writeln!(
            sink,
            "{:<4} |{:<7} |{:<7} {:<26} |{}",
            descriptor.id,
            group_column(descriptor),
            link_column(descriptor),
            format!("|{start}-{end}"),
            type_summary(descriptor)
        )?;
    }

    Ok(())
}

/// JSON shape of the listing
#[derive(Debug, Serialize)]
pub struct ListingView<'a> {
    pub id: String,
    pub created: String,
    pub modified: String,
    pub descriptors: Vec<&'a Descriptor>,
}

impl<'a> ListingView<'a> {
    pub fn new(image: &'a Image) -> Self {
        Self {
            id: image.id.to_string(),
            created: format_timestamp(image.created_at),
            modified: format_timestamp(image.modified_at),
            descriptors: image.occupied().collect(),
        }
    }
}
