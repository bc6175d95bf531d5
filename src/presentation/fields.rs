//! Structured label/value views of the header and of a single descriptor
//!
//! Data retrieval ends here; layout is decided by the table renderer.

use crate::domain::entities::{Descriptor, Image, Link, TypeInfo};
use crate::domain::services::readable_size;
use chrono::{DateTime, Utc};

/// One row of a two-column table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    pub fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

/// Unix seconds as a UTC calendar time, or the raw number when out of range
pub fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// Header fields in display order
pub fn header_fields(image: &Image) -> Vec<Field> {
    vec![
        Field::new("Launch script:", image.launch_script_display()),
        Field::new("Version:", &image.version),
        Field::new("Primary Architecture:", image.arch.name()),
        Field::new("ID:", image.id),
        Field::new("Created:", format_timestamp(image.created_at)),
        Field::new("Modified:", format_timestamp(image.modified_at)),
        Field::new("Descriptors Free:", image.descriptors_free),
        Field::new("Descriptors Total:", image.descriptors_total),
        Field::new("Descriptors Offset:", image.descriptors_offset),
        Field::new("Descriptors Size:", readable_size(image.descriptors_size)),
        Field::new("Data Offset:", image.data_offset),
        Field::new("Data Size:", readable_size(image.data_size)),
    ]
}

/// Detail fields of one descriptor in display order
///
/// Optional attributes (group, link, name) only appear when set.
pub fn descriptor_fields(descriptor: &Descriptor) -> Vec<Field> {
    let mut fields = vec![
        Field::new("ID:", descriptor.id),
        Field::new("Type:", descriptor.data_type),
    ];

    if descriptor.group_id != 0 {
        fields.push(Field::new("Group ID:", descriptor.group_id));
    }
    match descriptor.link {
        Link::None => {}
        Link::Object(id) => fields.push(Field::new("Linked ID:", id)),
        Link::Group(id) => fields.push(Field::new("Linked Group ID:", id)),
    }

    fields.push(Field::new("Offset:", descriptor.offset));
    fields.push(Field::new("Size:", descriptor.size));
    fields.push(Field::new("Created:", format_timestamp(descriptor.created_at)));
    fields.push(Field::new("Modified:", format_timestamp(descriptor.modified_at)));

    if !descriptor.name.is_empty() {
        fields.push(Field::new("Name:", &descriptor.name));
    }

    match &descriptor.type_info {
        TypeInfo::None => {}
        TypeInfo::Partition {
            fs_type,
            part_type,
            arch,
        } => {
            fields.push(Field::new("Filesystem Type:", fs_type));
            fields.push(Field::new("Partition Type:", part_type));
            fields.push(Field::new("Architecture:", arch.name()));
        }
        TypeInfo::Signature { hash_type, entity } => {
            fields.push(Field::new("Hash Type:", hash_type));
            fields.push(Field::new("Entity:", hex::encode_upper(entity)));
        }
        TypeInfo::CryptoMessage {
            format_type,
            message_type,
        } => {
            fields.push(Field::new("Format Type:", format_type));
            fields.push(Field::new("Message Type:", message_type));
        }
        TypeInfo::Sbom { format } => {
            fields.push(Field::new("Format:", format));
        }
    }

    fields
}
