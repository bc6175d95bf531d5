//! Repository traits (interfaces)
//!
//! Contracts for the loader that opens and decodes an image and for the
//! byte source backing its data section.

mod data_source;
mod image_loader;

pub use data_source::DataSource;
pub use image_loader::{ImageLoader, LoadError};
