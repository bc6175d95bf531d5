//! Presentation layer
//!
//! Text and JSON renderings of images and descriptors, and the CLI surface.

pub mod cli;
mod fields;
pub mod listing;
mod table;

pub use fields::{Field, descriptor_fields, format_timestamp, header_fields};
pub use table::{OutputFormat, RenderContext, TableStyle};
